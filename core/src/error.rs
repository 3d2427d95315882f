//! Error types for the user-management API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server rejected the request." All
//! other non-2xx responses land in `RequestFailed`, carrying the status code
//! plus a display-ready message already extracted from the response body (the
//! server's `{"message": ...}` object or field-error array), so views can
//! surface it without re-parsing anything.

use std::fmt;

/// Errors produced while building, executing or parsing an API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server returned 404 — the requested resource does not exist.
    NotFound,

    /// The server returned a non-2xx status other than 404. `message` is the
    /// server-provided explanation, or a generic fallback when the body
    /// carried none.
    RequestFailed { status: u16, message: String },

    /// The request never produced a response (DNS, connect, socket failure).
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    SerializationError(String),
}

impl ApiError {
    /// Human-readable message suitable for a banner or notification.
    pub fn display_message(&self) -> String {
        match self {
            ApiError::RequestFailed { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "resource not found"),
            ApiError::RequestFailed { status, message } => {
                write!(f, "HTTP {status}: {message}")
            }
            ApiError::Transport(msg) => write!(f, "transport error: {msg}"),
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
