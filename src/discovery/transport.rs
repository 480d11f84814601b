//! Transport Abstraction
//!
//! This module defines the collaborator seam between the bounded connection
//! client and whatever actually moves bytes. The client only ever sees these
//! two capabilities:
//!
//! - [`Connector`]: performs the connect phase and yields a session
//! - [`Session`]: answers exactly one concern, listing capabilities, and can
//!   be closed
//!
//! Test doubles implement both traits to simulate slow, failing, or
//! successful servers deterministically.

use crate::discovery::protocol::Tool;
use anyhow::Result;
use std::collections::HashMap;

/// Connect-phase collaborator
///
/// `open` covers everything required before discovery can start (transport
/// setup plus the protocol handshake). The returned session is exclusively
/// owned by the caller for the duration of one discovery call.
///
/// Open futures must be cancel-safe: the client drops them when the connect
/// budget elapses, and dropping must release any underlying resources.
#[allow(async_fn_in_trait)]
pub trait Connector: Send + Sync {
    /// Session type produced by a successful connect
    type Session: Session;

    /// Establish a session against the endpoint
    async fn open(&self, url: &str, headers: &HashMap<String, String>) -> Result<Self::Session>;
}

/// An established session with a remote server
#[allow(async_fn_in_trait)]
pub trait Session: Send + Sync {
    /// Ask the server for its full capability list
    ///
    /// Order is server-defined and must be preserved.
    async fn list_capabilities(&mut self) -> Result<Vec<Tool>>;

    /// Release the session
    ///
    /// Idempotent; safe to call after a partial failure or more than once.
    async fn close(&mut self);
}
