//! HTTP Transport
//!
//! Production [`Connector`] for remote MCP servers reachable over HTTP(S).
//! Each JSON-RPC message is a separate HTTP POST; the connect phase is the
//! `initialize` handshake, discovery is `tools/list`.
//!
//! The reqwest client is built without a request timeout on purpose: phase
//! deadlines belong to the discovery client, which races every operation
//! against its own budget.

use crate::discovery::protocol::{
    InitializeParams, JsonRpcRequest, JsonRpcResponse, Tool, METHOD_INITIALIZE, METHOD_TOOLS_LIST,
};
use crate::discovery::transport::{Connector, Session};
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;

/// Connector for HTTP-based MCP servers
#[derive(Debug, Clone, Default)]
pub struct HttpConnector;

impl HttpConnector {
    /// Create a new HTTP connector
    pub fn new() -> Self {
        Self
    }
}

impl Connector for HttpConnector {
    type Session = HttpSession;

    /// Build an HTTP client with the configured headers and perform the
    /// `initialize` handshake
    async fn open(&self, url: &str, headers: &HashMap<String, String>) -> Result<Self::Session> {
        let client = reqwest::Client::builder()
            .default_headers(build_header_map(headers)?)
            .build()
            .context("Failed to build HTTP client")?;

        let mut session = HttpSession {
            client,
            url: url.to_string(),
            next_id: 1,
            connected: true,
        };

        let params = serde_json::to_value(InitializeParams::for_this_client())
            .context("Failed to serialize initialize params")?;
        let result = session
            .call(METHOD_INITIALIZE, Some(params))
            .await
            .context("Initialize handshake failed")?;

        tracing::info!(
            "Connected to {} ({} {})",
            url,
            result["serverInfo"]["name"].as_str().unwrap_or("unknown"),
            result["serverInfo"]["version"].as_str().unwrap_or("?"),
        );

        Ok(session)
    }
}

/// An established HTTP session with an MCP server
pub struct HttpSession {
    /// Reqwest client carrying the configured default headers
    client: reqwest::Client,

    /// Server endpoint URL
    url: String,

    /// Next JSON-RPC request id
    next_id: u64,

    /// Cleared by `close`; subsequent calls fail without network activity
    connected: bool,
}

impl HttpSession {
    /// Send one JSON-RPC request and return the server's result payload
    async fn call(
        &mut self,
        method: &str,
        params: Option<serde_json::Value>,
    ) -> Result<serde_json::Value> {
        if !self.connected {
            return Err(anyhow::anyhow!("Session is closed"));
        }

        let id = self.next_id;
        self.next_id += 1;
        let request = JsonRpcRequest::new(id, method, params);

        tracing::debug!("POST {} method={}", self.url, method);

        let http_response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("HTTP request to {} failed", self.url))?;

        let status = http_response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!("Server returned HTTP status {}", status));
        }

        let response: JsonRpcResponse = http_response
            .json()
            .await
            .context("Failed to parse JSON-RPC response body")?;

        response
            .into_result()
            .map_err(|e| anyhow::Error::from(e).context(format!("Server rejected {}", method)))
    }
}

impl Session for HttpSession {
    async fn list_capabilities(&mut self) -> Result<Vec<Tool>> {
        let result = self.call(METHOD_TOOLS_LIST, None).await?;

        let tools = result
            .get("tools")
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("tools/list result missing \"tools\" field"))?;

        serde_json::from_value(tools).context("Failed to parse tools from tools/list response")
    }

    async fn close(&mut self) {
        if self.connected {
            tracing::debug!("Closing session to {}", self.url);
            self.connected = false;
        }
    }
}

/// Convert the config's header mapping into a reqwest header map
fn build_header_map(headers: &HashMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .with_context(|| format!("Invalid header name {:?}", name))?;
        let value = HeaderValue::from_str(value)
            .with_context(|| format!("Invalid value for header {}", name))?;
        map.insert(name, value);
    }
    Ok(map)
}
