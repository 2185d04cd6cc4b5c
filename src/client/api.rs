//! HTTP transport
//!
//! Implements MetadataTransport over the Dataverse Web API using reqwest.
//!
//! ## Security
//!
//! The bearer token is installed once as a sensitive default header when the
//! client is built. It is never logged and cannot change for the lifetime of
//! the transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use super::wire::ErrorEnvelope;
use super::{ConnectionConfig, FetchError, FetchResult, MetadataTransport};

/// Transport that talks to the Web API over HTTP
#[derive(Debug)]
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a new HTTP transport
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use dataverse_erd::client::{ConnectionConfig, api::HttpTransport};
    ///
    /// let config = ConnectionConfig::new("https://contoso.crm.dynamics.com", "token");
    /// let transport = HttpTransport::new(&config).unwrap();
    /// ```
    pub fn new(config: &ConnectionConfig) -> FetchResult<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .default_headers(Self::default_headers(config)?)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| FetchError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url(),
            client,
        })
    }

    fn default_headers(config: &ConnectionConfig) -> FetchResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.access_token()))
            .map_err(|_| FetchError::Config("Access token contains invalid characters".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static("odata-maxversion"),
            HeaderValue::from_static("4.0"),
        );
        headers.insert(
            HeaderName::from_static("odata-version"),
            HeaderValue::from_static("4.0"),
        );

        Ok(headers)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl MetadataTransport for HttpTransport {
    async fn get_json(&self, path: &str) -> FetchResult<serde_json::Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!(path, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("Request to {path} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = ErrorEnvelope::message_from(&body)
                .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()))
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });
            return Err(FetchError::from_status(status.as_u16(), message));
        }

        response
            .json()
            .await
            .map_err(|e| FetchError::Decode(format!("{path}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ConnectionConfig::new("https://org.crm.dynamics.com", "");
        assert!(matches!(HttpTransport::new(&config), Err(FetchError::Config(_))));
    }

    #[test]
    fn test_new_rejects_token_with_newline() {
        let config = ConnectionConfig::new("https://org.crm.dynamics.com", "abc\ndef");
        assert!(matches!(HttpTransport::new(&config), Err(FetchError::Config(_))));
    }

    #[test]
    fn test_base_url() {
        let config = ConnectionConfig::new("https://org.crm.dynamics.com/", "token");
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.base_url(), "https://org.crm.dynamics.com/api/data/v9.2");
    }
}
