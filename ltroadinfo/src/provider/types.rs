//! Provider error type

use thiserror::Error;

/// Errors that can occur while talking to a remote feature service.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP request failed or returned a non-success status
    #[error("HTTP error: {0}")]
    Http(String),

    /// Response body could not be decoded
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The service answered with an error object instead of data
    #[error("Service error {code} from {url}: {message}")]
    Service {
        url: String,
        code: i64,
        message: String,
    },

    /// Response decoded but is not usable
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    pub(crate) fn decode(url: &str, source: serde_json::Error) -> Self {
        ProviderError::Decode {
            url: url.to_string(),
            source,
        }
    }
}
