//! Bounded Connection Client
//!
//! This module owns the connect-then-discover workflow. Each phase races the
//! transport operation against a timer armed with that phase's budget:
//! `tokio::time::timeout` polls both concurrently, so whichever finishes
//! first decides the outcome and the loser is cancelled by drop. A slow but
//! eventually-successful operation never blocks past its budget, and a fast
//! operation is never delayed by the timer.
//!
//! Phases are strictly sequential: the read race only starts after the
//! connect race has resolved to success. The session acquired by a
//! successful connect is closed on every subsequent exit path.

use crate::discovery::config::ServerConfig;
use crate::discovery::error::DiscoveryError;
use crate::discovery::http::HttpConnector;
use crate::discovery::protocol::Tool;
use crate::discovery::transport::{Connector, Session};
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;

/// Client for one-shot capability discovery against a single endpoint
///
/// Generic over the [`Connector`] so tests can substitute deterministic
/// doubles for the network. One call to [`run`](Self::run) is one full pass
/// through the state machine; no state survives between calls and no retries
/// are attempted.
pub struct DiscoveryClient<C>
where
    C: Connector,
{
    connector: C,
}

impl<C> DiscoveryClient<C>
where
    C: Connector,
{
    /// Create a client over the given connector
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    /// Execute the two-phase bounded workflow
    ///
    /// # Errors
    ///
    /// Every failure mode is a distinct [`DiscoveryError`] variant:
    /// connect timeout, connect failure, read timeout, or discovery failure.
    pub async fn run(&self, config: &ServerConfig) -> Result<Vec<Tool>, DiscoveryError> {
        tracing::debug!(
            "Connecting to {} (budget {}ms)",
            config.url,
            config.connect_timeout_ms
        );

        // Connect race: open vs timer. On timeout the open future is
        // dropped, which aborts the in-flight attempt.
        let connect_budget = Duration::from_millis(config.connect_timeout_ms);
        let mut session = match timeout(
            connect_budget,
            self.connector.open(&config.url, &config.headers),
        )
        .await
        {
            Ok(Ok(session)) => session,
            Ok(Err(cause)) => {
                tracing::warn!("Connect to {} failed: {:#}", config.url, cause);
                return Err(DiscoveryError::Connect { cause });
            }
            Err(_elapsed) => {
                tracing::warn!(
                    "Connect to {} timed out after {}ms",
                    config.url,
                    config.connect_timeout_ms
                );
                return Err(DiscoveryError::ConnectTimeout {
                    budget_ms: config.connect_timeout_ms,
                });
            }
        };

        tracing::debug!(
            "Listing capabilities from {} (budget {}ms)",
            config.url,
            config.read_timeout_ms
        );

        // Discovery race, same shape. The session outlives a lost race, so
        // it is closed explicitly below on every exit path.
        let read_budget = Duration::from_millis(config.read_timeout_ms);
        let outcome = match timeout(read_budget, session.list_capabilities()).await {
            Ok(Ok(tools)) => {
                tracing::info!("Discovered {} capabilities from {}", tools.len(), config.url);
                Ok(tools)
            }
            Ok(Err(cause)) => {
                tracing::warn!("Capability listing from {} failed: {:#}", config.url, cause);
                Err(DiscoveryError::Discover { cause })
            }
            Err(_elapsed) => {
                tracing::warn!(
                    "Capability listing from {} timed out after {}ms",
                    config.url,
                    config.read_timeout_ms
                );
                Err(DiscoveryError::ReadTimeout {
                    budget_ms: config.read_timeout_ms,
                })
            }
        };

        session.close().await;
        outcome
    }
}

/// Discover a server's capabilities from a raw config value
///
/// Normalizes the config, then runs one pass of the bounded workflow over
/// the given connector. Config errors fail fast with zero collaborator
/// calls.
pub async fn discover_capabilities<C>(raw: &Value, connector: C) -> Result<Vec<Tool>, DiscoveryError>
where
    C: Connector,
{
    let config = ServerConfig::from_raw(raw)?;
    DiscoveryClient::new(connector).run(&config).await
}

/// Discover a server's capabilities over HTTP from a raw config value
pub async fn discover_capabilities_http(raw: &Value) -> Result<Vec<Tool>, DiscoveryError> {
    discover_capabilities(raw, HttpConnector::new()).await
}
