//! Endpoint Reachability Probe
//!
//! A plain HTTP GET against the endpoint, bounded by the same race pattern
//! as the discovery client. Useful for telling "server unreachable" from
//! "server up but MCP handshake broken" before running a full discovery.
//!
//! This is peripheral plumbing, surfaced only through the CLI; the
//! discovery core never calls it.

use std::time::Duration;
use tokio::time::timeout;

/// Error types for the reachability probe
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// No response within the budget
    #[error("Probe timed out after {budget_ms}ms")]
    Timeout {
        /// The configured probe budget in milliseconds
        budget_ms: u64,
    },

    /// Transport-level failure (DNS, refused, TLS, ...)
    #[error("Probe request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Server returned status {0}")]
    Status(u16),
}

/// Probe an endpoint with a GET request bounded by `budget_ms`
///
/// Returns the HTTP status code on success. The in-flight request is
/// dropped when the timer wins the race.
pub async fn probe_endpoint(url: &str, budget_ms: u64) -> Result<u16, ProbeError> {
    tracing::debug!("Probing {} (budget {}ms)", url, budget_ms);

    let client = reqwest::Client::new();
    let response = match timeout(Duration::from_millis(budget_ms), client.get(url).send()).await {
        Ok(Ok(response)) => response,
        Ok(Err(cause)) => return Err(ProbeError::Request(cause)),
        Err(_elapsed) => return Err(ProbeError::Timeout { budget_ms }),
    };

    let status = response.status();
    if status.is_success() {
        tracing::info!("Probe of {} succeeded with status {}", url, status);
        Ok(status.as_u16())
    } else {
        Err(ProbeError::Status(status.as_u16()))
    }
}
