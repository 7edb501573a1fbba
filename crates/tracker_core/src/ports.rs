//! crates/tracker_core/src/ports.rs
//!
//! Defines the transport contract the client core is written against.
//! The trait forms the boundary of the hexagonal architecture: the session store
//! and data sync only ever see `Transport`, never a concrete HTTP library.

use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;

//=========================================================================================
// Endpoints
//=========================================================================================

/// HTTP method of a backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// Every backend route the client consumes. Paths are relative to the
/// deployment's base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Signup,
    Login,
    Logout,
    CheckAuth,
    AdminEngineers,
    AdminComplaints,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Signup => "/signup",
            Endpoint::Login => "/login",
            Endpoint::Logout => "/logout",
            Endpoint::CheckAuth => "/check-auth",
            Endpoint::AdminEngineers => "/admin/engineers",
            Endpoint::AdminComplaints => "/admin/complaints",
        }
    }

    /// The method the backend expects on this route.
    pub fn method(&self) -> Method {
        match self {
            Endpoint::Signup | Endpoint::Login | Endpoint::Logout => Method::Post,
            Endpoint::CheckAuth | Endpoint::AdminEngineers | Endpoint::AdminComplaints => {
                Method::Get
            }
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

//=========================================================================================
// Transport Error and Result Types
//=========================================================================================

/// Failures of a single transport round trip. Decoding the body is the
/// caller's concern and is not represented here.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request timed out: {0}")]
    Timeout(String),
    /// The server answered with a non-2xx status. The body is kept because the
    /// backend explains rejections in it.
    #[error("Server responded with status {status}")]
    Status { status: u16, body: Bytes },
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// A convenience type alias for `Result<T, TransportError>`.
pub type TransportResult<T> = Result<T, TransportError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues one request and returns the raw response body.
    ///
    /// Implementations set a JSON content type whenever `body` is present and
    /// never retry.
    async fn send(
        &self,
        endpoint: Endpoint,
        method: Method,
        body: Option<Bytes>,
    ) -> TransportResult<Bytes>;
}
