//! Server Configuration
//!
//! This module normalizes the loosely-typed server configuration shape
//! (`{ "<server_key>": { "url", "headers"?, "timeout"?, "sse_read_timeout"? } }`,
//! timeouts expressed in whole seconds) into a strict [`ServerConfig`] with
//! millisecond budgets and defaulted headers.
//!
//! Normalization is a pure transform: it performs no I/O and is idempotent
//! with respect to an already-normalized shape.

use crate::discovery::error::ConfigError;
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Default connect budget: 5 seconds
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;

/// Default read budget: 60 seconds
///
/// The known config variants in the wild disagree between 60 and 300
/// seconds; 60 is the documented choice here.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 60_000;

/// Validated, unit-normalized server configuration
///
/// Created once per invocation and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Absolute endpoint URL
    pub url: String,

    /// Static headers passed through to the transport
    pub headers: HashMap<String, String>,

    /// Connect phase budget in milliseconds (strictly positive)
    pub connect_timeout_ms: u64,

    /// Discovery phase budget in milliseconds (strictly positive)
    pub read_timeout_ms: u64,
}

impl ServerConfig {
    /// Normalize the sole server entry of a raw config object
    ///
    /// The raw shape maps server names to entries; configs in the source
    /// convention carry exactly one entry. With multiple entries the one
    /// with the lexicographically smallest name is taken (`serde_json`
    /// objects iterate in key order); use [`Self::from_raw_named`] to pick
    /// a specific entry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingUrl`] if no entry with a non-empty
    /// `url` exists at the expected nesting, and the other `ConfigError`
    /// variants for malformed urls, headers, or timeouts.
    pub fn from_raw(raw: &Value) -> Result<Self, ConfigError> {
        let entry = raw
            .as_object()
            .and_then(|map| map.values().next())
            .ok_or(ConfigError::MissingUrl)?;
        Self::from_entry(entry)
    }

    /// Normalize a named server entry of a raw config object
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownServer`] if `server` is not a key of
    /// the raw config, otherwise behaves like [`Self::from_raw`].
    pub fn from_raw_named(raw: &Value, server: &str) -> Result<Self, ConfigError> {
        let entry = raw
            .as_object()
            .and_then(|map| map.get(server))
            .ok_or_else(|| ConfigError::UnknownServer(server.to_string()))?;
        Self::from_entry(entry)
    }

    /// Normalize a single server entry
    fn from_entry(entry: &Value) -> Result<Self, ConfigError> {
        let url = entry
            .get("url")
            .and_then(Value::as_str)
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingUrl)?;

        // Must parse as an absolute URI
        reqwest::Url::parse(url).map_err(|_| ConfigError::InvalidUrl(url.to_string()))?;

        let headers = match entry.get("headers") {
            None | Some(Value::Null) => HashMap::new(),
            Some(Value::Object(map)) => map
                .iter()
                .map(|(k, v)| match v.as_str() {
                    Some(s) => Ok((k.clone(), s.to_string())),
                    None => Err(ConfigError::InvalidHeaders),
                })
                .collect::<Result<HashMap<_, _>, _>>()?,
            Some(_) => return Err(ConfigError::InvalidHeaders),
        };

        let connect_timeout_ms =
            timeout_ms(entry, "timeout").map(|s| s.unwrap_or(DEFAULT_CONNECT_TIMEOUT_MS))?;
        let read_timeout_ms =
            timeout_ms(entry, "sse_read_timeout").map(|s| s.unwrap_or(DEFAULT_READ_TIMEOUT_MS))?;

        Ok(Self {
            url: url.to_string(),
            headers,
            connect_timeout_ms,
            read_timeout_ms,
        })
    }
}

/// Read a second-valued timeout field and convert it to milliseconds
///
/// Returns `Ok(None)` when the field is absent so the caller can apply its
/// default. Zero, negative, and fractional values are rejected, as are
/// values too large to express in milliseconds.
fn timeout_ms(entry: &Value, field: &'static str) -> Result<Option<u64>, ConfigError> {
    match entry.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => match value.as_u64() {
            Some(secs) if secs > 0 => secs
                .checked_mul(1000)
                .map(Some)
                .ok_or(ConfigError::InvalidTimeout { field }),
            _ => Err(ConfigError::InvalidTimeout { field }),
        },
    }
}

/// Load a raw JSON config from disk
///
/// Kept separate from normalization so the normalizer stays pure; only the
/// CLI reads files.
pub fn load_raw_config(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Config file {} is not valid JSON", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_config(entry: Value) -> Value {
        json!({ "server_name": entry })
    }

    #[test]
    fn test_normalize_full_entry() {
        let raw = raw_config(json!({
            "url": "https://example.com/mcp",
            "headers": {"Authorization": "Bearer token"},
            "timeout": 5,
            "sse_read_timeout": 300
        }));

        let config = ServerConfig::from_raw(&raw).unwrap();
        assert_eq!(config.url, "https://example.com/mcp");
        assert_eq!(config.headers.get("Authorization").unwrap(), "Bearer token");
        assert_eq!(config.connect_timeout_ms, 5_000);
        assert_eq!(config.read_timeout_ms, 300_000);
    }

    #[test]
    fn test_normalize_applies_defaults() {
        let raw = raw_config(json!({"url": "https://example.com/mcp"}));

        let config = ServerConfig::from_raw(&raw).unwrap();
        assert!(config.headers.is_empty());
        assert_eq!(config.connect_timeout_ms, DEFAULT_CONNECT_TIMEOUT_MS);
        assert_eq!(config.read_timeout_ms, DEFAULT_READ_TIMEOUT_MS);
    }

    #[test]
    fn test_missing_url_variants() {
        // Entry without a url field
        assert_eq!(
            ServerConfig::from_raw(&raw_config(json!({}))).unwrap_err(),
            ConfigError::MissingUrl
        );

        // Empty url
        assert_eq!(
            ServerConfig::from_raw(&raw_config(json!({"url": ""}))).unwrap_err(),
            ConfigError::MissingUrl
        );

        // Wrong nesting: url at the top level instead of inside an entry
        assert_eq!(
            ServerConfig::from_raw(&json!({"url": "https://example.com"})).unwrap_err(),
            ConfigError::MissingUrl
        );

        // Not an object at all
        assert_eq!(
            ServerConfig::from_raw(&json!([1, 2, 3])).unwrap_err(),
            ConfigError::MissingUrl
        );
    }

    #[test]
    fn test_relative_url_rejected() {
        let raw = raw_config(json!({"url": "/just/a/path"}));
        assert!(matches!(
            ServerConfig::from_raw(&raw).unwrap_err(),
            ConfigError::InvalidUrl(_)
        ));
    }

    #[test]
    fn test_invalid_timeouts_rejected() {
        for bad in [json!(0), json!(-5), json!(1.5), json!("5")] {
            let raw = raw_config(json!({"url": "https://example.com", "timeout": bad}));
            assert_eq!(
                ServerConfig::from_raw(&raw).unwrap_err(),
                ConfigError::InvalidTimeout { field: "timeout" }
            );
        }

        let raw = raw_config(json!({"url": "https://example.com", "sse_read_timeout": 0}));
        assert_eq!(
            ServerConfig::from_raw(&raw).unwrap_err(),
            ConfigError::InvalidTimeout {
                field: "sse_read_timeout"
            }
        );
    }

    #[test]
    fn test_oversized_timeouts_rejected_not_wrapped() {
        // Values whose millisecond conversion would overflow u64 must be
        // rejected like any other invalid timeout, never panic or wrap
        let huge = u64::MAX / 1000 + 1;

        let raw = raw_config(json!({"url": "https://example.com", "timeout": huge}));
        assert_eq!(
            ServerConfig::from_raw(&raw).unwrap_err(),
            ConfigError::InvalidTimeout { field: "timeout" }
        );

        let raw = raw_config(json!({
            "url": "https://example.com",
            "sse_read_timeout": u64::MAX
        }));
        assert_eq!(
            ServerConfig::from_raw(&raw).unwrap_err(),
            ConfigError::InvalidTimeout {
                field: "sse_read_timeout"
            }
        );

        // The largest convertible value still normalizes
        let raw = raw_config(json!({"url": "https://example.com", "timeout": u64::MAX / 1000}));
        let config = ServerConfig::from_raw(&raw).unwrap();
        assert_eq!(config.connect_timeout_ms, (u64::MAX / 1000) * 1000);
    }

    #[test]
    fn test_invalid_headers_rejected() {
        let raw = raw_config(json!({"url": "https://example.com", "headers": "nope"}));
        assert_eq!(
            ServerConfig::from_raw(&raw).unwrap_err(),
            ConfigError::InvalidHeaders
        );

        let raw = raw_config(json!({"url": "https://example.com", "headers": {"a": 1}}));
        assert_eq!(
            ServerConfig::from_raw(&raw).unwrap_err(),
            ConfigError::InvalidHeaders
        );
    }

    #[test]
    fn test_null_headers_default_to_empty() {
        let raw = raw_config(json!({"url": "https://example.com", "headers": null}));
        assert!(ServerConfig::from_raw(&raw).unwrap().headers.is_empty());
    }

    #[test]
    fn test_multi_entry_config_selects_smallest_key() {
        // serde_json objects iterate in key order, regardless of file order
        let raw: Value = serde_json::from_str(
            r#"{
                "zeta": {"url": "https://zeta.example/mcp"},
                "alpha": {"url": "https://alpha.example/mcp"}
            }"#,
        )
        .unwrap();

        let config = ServerConfig::from_raw(&raw).unwrap();
        assert_eq!(config.url, "https://alpha.example/mcp");
    }

    #[test]
    fn test_named_server_lookup() {
        let raw = json!({
            "alpha": {"url": "https://alpha.example/mcp"},
            "beta": {"url": "https://beta.example/mcp"}
        });

        let config = ServerConfig::from_raw_named(&raw, "beta").unwrap();
        assert_eq!(config.url, "https://beta.example/mcp");

        assert_eq!(
            ServerConfig::from_raw_named(&raw, "gamma").unwrap_err(),
            ConfigError::UnknownServer("gamma".to_string())
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let raw = raw_config(json!({
            "url": "https://example.com/mcp",
            "headers": {"X-Key": "v"},
            "timeout": 2,
            "sse_read_timeout": 30
        }));
        let first = ServerConfig::from_raw(&raw).unwrap();

        // Re-express the normalized record in the raw shape and normalize again
        let round_trip = raw_config(json!({
            "url": first.url,
            "headers": first.headers,
            "timeout": first.connect_timeout_ms / 1000,
            "sse_read_timeout": first.read_timeout_ms / 1000
        }));
        let second = ServerConfig::from_raw(&round_trip).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_load_raw_config_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"server_name": {{"url": "https://ok.example/mcp", "timeout": 1}}}}"#
        )
        .unwrap();

        let raw = load_raw_config(file.path()).unwrap();
        let config = ServerConfig::from_raw(&raw).unwrap();
        assert_eq!(config.url, "https://ok.example/mcp");
        assert_eq!(config.connect_timeout_ms, 1_000);
    }

    #[test]
    fn test_load_raw_config_rejects_invalid_json() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(load_raw_config(file.path()).is_err());
    }
}
