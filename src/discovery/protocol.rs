//! MCP Wire Types (JSON-RPC 2.0)
//!
//! Serialization types for the subset of the Model Context Protocol that
//! capability discovery needs: the `initialize` handshake and `tools/list`.
//!
//! - JSON-RPC 2.0: <https://www.jsonrpc.org/specification>
//! - MCP Spec: <https://modelcontextprotocol.io/specification/2025-03-26>
//!
//! Tool input schemas are deliberately opaque (`serde_json::Value`); the
//! client passes them through without validating schema internals.

use serde::{Deserialize, Serialize};

/// JSON-RPC 2.0 version constant
pub const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol version sent during the handshake
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Method name for the connection handshake
pub const METHOD_INITIALIZE: &str = "initialize";

/// Method name for capability listing
pub const METHOD_TOOLS_LIST: &str = "tools/list";

/// A JSON-RPC 2.0 request message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonRpcRequest {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,

    /// Request identifier, matched against the response
    pub id: u64,

    /// Method name to invoke
    pub method: String,

    /// Method parameters (method-dependent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

impl JsonRpcRequest {
    /// Create a new request
    pub fn new(id: u64, method: impl Into<String>, params: Option<serde_json::Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method: method.into(),
            params,
        }
    }
}

/// A JSON-RPC 2.0 response message
///
/// Carries either a `result` or an `error`, never both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonRpcResponse {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,

    /// Identifier of the request this answers
    pub id: u64,

    /// Result payload (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,

    /// Error information (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl JsonRpcResponse {
    /// Extract the result, or the server's error if unsuccessful
    pub fn into_result(self) -> Result<serde_json::Value, RpcError> {
        match (self.result, self.error) {
            (Some(result), None) => Ok(result),
            (None, Some(error)) => Err(error),
            _ => Err(RpcError {
                code: -32603,
                message: "invalid response: both result and error present".to_string(),
                data: None,
            }),
        }
    }
}

/// A JSON-RPC 2.0 error object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RpcError {
    /// Error code (JSON-RPC defined or server-specific)
    pub code: i32,

    /// Human-readable error message
    pub message: String,

    /// Additional error data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[Error {}] {}", self.code, self.message)
    }
}

impl std::error::Error for RpcError {}

/// A capability ("tool") advertised by the remote server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tool {
    /// Tool name, unique within one response
    pub name: String,

    /// Tool description
    #[serde(default)]
    pub description: String,

    /// Structured input schema, treated as an opaque document
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// Parameters for the `initialize` handshake
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InitializeParams {
    /// Client protocol version
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,

    /// Client capabilities (empty object; discovery needs none)
    pub capabilities: serde_json::Value,

    /// Client identification
    #[serde(rename = "clientInfo")]
    pub client_info: ClientInfo,
}

impl InitializeParams {
    /// Handshake parameters identifying this crate
    pub fn for_this_client() -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: serde_json::json!({}),
            client_info: ClientInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Client identification sent during the handshake
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientInfo {
    /// Client name
    pub name: String,

    /// Client version
    pub version: String,
}
