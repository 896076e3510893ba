//! Error types for the car store API client.
//!
//! # Design
//! The backend reports every application failure the same way: a non-2xx
//! status with a JSON body carrying a `detail` message. `RequestFailed`
//! collapses all of those into one variant holding the normalized message —
//! either the server's `detail` or a fixed per-operation fallback. The
//! serialization variants cover the build/parse side and never describe a
//! network outcome.

use std::fmt;

/// Errors returned by `CarStoreClient` build and parse methods.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned a non-2xx status. `message` is the error body's
    /// `detail` field when present, otherwise the operation's default.
    RequestFailed { message: String },

    /// A successful response body could not be deserialized into the
    /// expected type.
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    Serialization(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::RequestFailed { message } => write!(f, "{message}"),
            ApiError::Deserialization(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::Serialization(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
