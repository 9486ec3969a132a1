//! Storefront API errors.

use reqwest::{StatusCode, header::InvalidHeaderValue};
use thiserror::Error;

/// Errors that can occur when calling the storefront API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An HTTP transport or deserialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configured credentials cannot be sent as a header.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),

    /// The API answered with a non-success status.
    #[error("request failed with status {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Status {
        /// Response status
        status: StatusCode,

        /// The `error` field of the response body, if present
        message: Option<String>,
    },
}

impl ApiError {
    /// Error text the server put in the response body.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }
}
