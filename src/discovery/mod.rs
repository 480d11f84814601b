//! Bounded-Time Capability Discovery
//!
//! Given an MCP server endpoint and per-phase timeout budgets, this module
//! connects, asks the server for its advertised tools, and returns them or
//! fails deterministically within the configured deadlines.
//!
//! # Architecture
//!
//! - **Config layer** (`config`): normalizes the loosely-typed server
//!   config into a strict, millisecond-valued [`ServerConfig`]
//! - **Protocol layer** (`protocol`): JSON-RPC 2.0 wire types for the
//!   `initialize` handshake and `tools/list`
//! - **Transport seam** (`transport`): the [`Connector`]/[`Session`]
//!   capability interface the client depends on
//! - **HTTP transport** (`http`): production connector over reqwest
//! - **Client layer** (`client`): the two-phase bounded workflow, racing
//!   each network operation against its budget
//!
//! Failure classification lives in [`error`]: connect timeout, connect
//! failure, read timeout, and discovery failure are distinct outcomes, so
//! callers can apply their own retry or backoff policy externally.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod protocol;
pub mod transport;

// Property-based tests for the normalizer
#[cfg(test)]
mod proptests;

pub use client::{discover_capabilities, discover_capabilities_http, DiscoveryClient};
pub use config::{load_raw_config, ServerConfig};
pub use error::{ConfigError, DiscoveryError};
pub use http::HttpConnector;
pub use protocol::Tool;
pub use transport::{Connector, Session};
