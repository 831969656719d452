//! Errors raised by the HTTP collaborators.
//!
//! These never reach the chat: the sports-data client maps them to
//! `Lookup::NotFound` and the predictor to `Prediction::Failed`.

/// Failure of an upstream HTTP service call
#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    /// Request could not be sent or the connection failed
    #[error("http request failed for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    /// Server answered with a non-success status
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Response body was not the expected JSON
    #[error("failed to decode response from {url}: {source}")]
    Decode { url: String, source: reqwest::Error },

    /// Response decoded but carried nothing usable
    #[error("empty response from {url}")]
    EmptyResponse { url: String },

    /// Calls are suspended after repeated failures
    #[error("circuit breaker open for {service}")]
    CircuitOpen { service: &'static str },

    #[error("operation timed out after {secs}s")]
    Timeout { secs: u64 },
}

impl ServiceError {
    /// Whether retrying the same call may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            ServiceError::Http { .. } | ServiceError::Timeout { .. } => true,
            ServiceError::UnexpectedStatus { status, .. } => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            ServiceError::Decode { .. }
            | ServiceError::EmptyResponse { .. }
            | ServiceError::CircuitOpen { .. } => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
