//! Transports that turn a [`SuggestionRequest`](giftwise_common::SuggestionRequest)
//! into a raw JSON reply. Shape checking of the reply is left to the caller.

mod http;
mod mock;

pub use http::HttpBackend;
pub use mock::{MockBackend, DEFAULT_MOCK_DELAY};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    /// The endpoint answered with a non-success status.
    #[error("backend http {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("network error: {message}")]
    Network {
        status: Option<u16>,
        message: String,
    },

    /// The body was not valid JSON.
    #[error("response body is not JSON: {0}")]
    Decode(String),

    #[error("invalid backend setup: {0}")]
    Setup(String),
}

impl BackendError {
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Http { status, .. } => Some(*status),
            BackendError::Network { status, .. } => *status,
            BackendError::Decode(_) | BackendError::Setup(_) => None,
        }
    }
}
