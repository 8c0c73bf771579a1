//! HTTP client abstraction for testability

use std::time::Duration;

use super::types::ProviderError;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Trait for HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP GET request and returns the raw body.
    fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError>;

    /// Performs an HTTP GET request and returns the body as text.
    ///
    /// Implementations that know the response charset should decode with
    /// it. The default assumes UTF-8.
    fn get_text(&self, url: &str) -> Result<String, ProviderError> {
        let body = self.get(url)?;
        String::from_utf8(body)
            .map_err(|e| ProviderError::InvalidResponse(format!("{} is not UTF-8: {}", url, e)))
    }
}

impl<T: HttpClient + ?Sized> HttpClient for &T {
    fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        (**self).get(url)
    }

    fn get_text(&self, url: &str) -> Result<String, ProviderError> {
        (**self).get_text(url)
    }
}

/// Real HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with default configuration.
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a new ReqwestClient with custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("lt-road-info/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProviderError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    fn send(&self, url: &str) -> Result<reqwest::blocking::Response, ProviderError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ProviderError::Http(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ProviderError::Http(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        Ok(response)
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        self.send(url)?
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| ProviderError::Http(format!("Failed to read response: {}", e)))
    }

    /// Decodes using the charset from the `Content-Type` header, so legacy
    /// 8-bit payloads arrive as proper text.
    fn get_text(&self, url: &str) -> Result<String, ProviderError> {
        self.send(url)?
            .text()
            .map_err(|e| ProviderError::Http(format!("Failed to read response: {}", e)))
    }
}
