//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network — the [`Transport`] implementation owned by the
//! host executes the actual I/O. This separation keeps the core deterministic
//! and easy to test: every view-level property (validation gating, fan-out
//! counts, merge ordering) can be checked without a socket in sight.
//!
//! All fields use owned types (`String`, `Vec`) so requests can be moved into
//! concurrently running futures without lifetime concerns.

use async_trait::async_trait;

use crate::error::ApiError;

/// HTTP method for a request. Only the verbs the remote API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An HTTP request described as plain data.
///
/// Built by `ApiClient::build_*` methods. The transport executes this request
/// against the network and returns the corresponding `HttpResponse`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the transport after executing an `HttpRequest`, then passed
/// to `ApiClient::parse_*` methods for status interpretation and decoding.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Executes a single HTTP round trip.
///
/// Implementations must return non-2xx responses as `Ok` data — status
/// interpretation belongs to the client's `parse_*` methods. `Err` is
/// reserved for failures where no response exists at all (DNS, refused
/// connection, closed socket), reported as [`ApiError::Transport`].
///
/// No retries, no caching: every call is a fresh round trip.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}
