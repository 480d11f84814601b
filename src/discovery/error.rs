//! Discovery Error Types
//!
//! This module defines all error types that can occur during capability
//! discovery. Every failure mode is a distinct variant so callers can tell
//! "server unreachable" from "server slow to answer" from "server reachable
//! but the discovery call itself failed".

/// Error types for configuration normalization
///
/// Config errors fail fast, before any network activity.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The `url` field is absent, empty, or not at the expected nesting
    #[error("Invalid configuration: URL not found")]
    MissingUrl,

    /// The `url` field does not parse as an absolute URI
    #[error("Invalid configuration: malformed URL: {0}")]
    InvalidUrl(String),

    /// The `headers` field is not a mapping of string to string
    #[error("Invalid configuration: headers must map strings to strings")]
    InvalidHeaders,

    /// A timeout field is not a strictly positive whole number of seconds
    #[error("Invalid configuration: {field} must be a positive integer (seconds)")]
    InvalidTimeout {
        /// Name of the offending config field
        field: &'static str,
    },

    /// The named server entry does not exist in the config
    #[error("Invalid configuration: no entry for server {0:?}")]
    UnknownServer(String),
}

/// Error types for the connect-then-discover workflow
///
/// All variants are terminal per invocation; the client never retries
/// internally. Timeout variants carry the budget that was exceeded,
/// transport variants carry the opaque underlying cause.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// Invalid configuration, rejected before any network call
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Connect phase exceeded its deadline
    #[error("Connect phase timed out after {budget_ms}ms")]
    ConnectTimeout {
        /// The configured connect budget in milliseconds
        budget_ms: u64,
    },

    /// Transport-level failure during connect (DNS, refused, TLS, ...)
    #[error("Connect phase failed: {cause:#}")]
    Connect {
        /// Opaque underlying cause, passed through from the transport
        cause: anyhow::Error,
    },

    /// Discovery phase exceeded its deadline after a successful connect
    #[error("Discovery phase timed out after {budget_ms}ms")]
    ReadTimeout {
        /// The configured read budget in milliseconds
        budget_ms: u64,
    },

    /// Transport-level failure during the capability listing
    #[error("Discovery phase failed: {cause:#}")]
    Discover {
        /// Opaque underlying cause, passed through from the transport
        cause: anyhow::Error,
    },
}

impl DiscoveryError {
    /// The workflow phase this error occurred in
    pub fn phase(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::ConnectTimeout { .. } | Self::Connect { .. } => "connect",
            Self::ReadTimeout { .. } | Self::Discover { .. } => "discover",
        }
    }

    /// The exceeded budget in milliseconds, for timeout variants
    pub fn budget_ms(&self) -> Option<u64> {
        match self {
            Self::ConnectTimeout { budget_ms } | Self::ReadTimeout { budget_ms } => {
                Some(*budget_ms)
            }
            _ => None,
        }
    }
}
