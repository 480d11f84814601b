//! mcp-scout Library
//!
//! Bounded-time capability discovery for remote MCP servers: connect within
//! a budget, list the server's advertised tools within another, and classify
//! every failure mode distinctly. See [`discovery`] for the core workflow.

pub mod discovery;
pub mod probe;
pub mod report;
