//! Property-based tests for the config normalizer

use crate::discovery::config::{ServerConfig, DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_READ_TIMEOUT_MS};
use crate::discovery::error::ConfigError;
use proptest::prelude::*;
use serde_json::json;

prop_compose! {
    /// Raw config entries with a valid URL and optional second-valued timeouts
    fn raw_entry()(
        host in "[a-z][a-z0-9]{0,15}",
        connect_secs in proptest::option::of(1u64..=3600),
        read_secs in proptest::option::of(1u64..=3600),
    ) -> serde_json::Value {
        let mut entry = serde_json::Map::new();
        entry.insert("url".to_string(), json!(format!("https://{}.example/mcp", host)));
        if let Some(secs) = connect_secs {
            entry.insert("timeout".to_string(), json!(secs));
        }
        if let Some(secs) = read_secs {
            entry.insert("sse_read_timeout".to_string(), json!(secs));
        }
        json!({ "server_name": entry })
    }
}

proptest! {
    #[test]
    fn normalize_converts_seconds_or_defaults(raw in raw_entry()) {
        let config = ServerConfig::from_raw(&raw).unwrap();
        let entry = &raw["server_name"];

        match entry.get("timeout").and_then(serde_json::Value::as_u64) {
            Some(secs) => prop_assert_eq!(config.connect_timeout_ms, secs * 1000),
            None => prop_assert_eq!(config.connect_timeout_ms, DEFAULT_CONNECT_TIMEOUT_MS),
        }
        match entry.get("sse_read_timeout").and_then(serde_json::Value::as_u64) {
            Some(secs) => prop_assert_eq!(config.read_timeout_ms, secs * 1000),
            None => prop_assert_eq!(config.read_timeout_ms, DEFAULT_READ_TIMEOUT_MS),
        }

        // Budgets are always strictly positive
        prop_assert!(config.connect_timeout_ms > 0);
        prop_assert!(config.read_timeout_ms > 0);
    }

    #[test]
    fn normalize_is_idempotent(raw in raw_entry()) {
        let first = ServerConfig::from_raw(&raw).unwrap();

        let round_trip = json!({
            "server_name": {
                "url": first.url.clone(),
                "headers": first.headers.clone(),
                "timeout": first.connect_timeout_ms / 1000,
                "sse_read_timeout": first.read_timeout_ms / 1000,
            }
        });
        let second = ServerConfig::from_raw(&round_trip).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn entries_without_url_always_rejected(key in "[a-z_]{1,12}", secs in 1u64..=600) {
        let raw = json!({ key: { "timeout": secs } });
        prop_assert_eq!(
            ServerConfig::from_raw(&raw).unwrap_err(),
            ConfigError::MissingUrl
        );
    }
}
