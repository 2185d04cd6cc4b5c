//! Remote metadata service access
//!
//! Defines the MetadataTransport trait and its building blocks:
//! - ConnectionConfig: immutable connection settings
//! - HttpTransport: reqwest-backed transport (feature `api-backend`)
//! - queries: OData request paths
//! - wire: typed decoding of service responses

use async_trait::async_trait;
use serde::de::DeserializeOwned;

pub mod config;
pub mod queries;
pub mod wire;

#[cfg(feature = "api-backend")]
pub mod api;

pub use config::ConnectionConfig;

/// Error type for metadata fetch operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("Solution '{0}' not found")]
    NotFound(String),
    #[error("Authentication rejected ({status}): {message}")]
    Auth { status: u16, message: String },
    #[error("Dataverse API error: {status} - {message}")]
    Upstream { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Failed to decode response: {0}")]
    Decode(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FetchError {
    /// Build the error for a non-success HTTP status.
    ///
    /// 401 and 403 become [`FetchError::Auth`], everything else
    /// [`FetchError::Upstream`].
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => FetchError::Auth { status, message },
            _ => FetchError::Upstream { status, message },
        }
    }

    /// HTTP status carried by upstream failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Auth { status, .. } | FetchError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, FetchError::Auth { .. })
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

/// Result type for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;

/// Trait for metadata transports
///
/// A transport issues one read-only GET against a path relative to the
/// service's API root and returns the JSON body. Non-success responses must
/// surface as [`FetchError::Auth`] or [`FetchError::Upstream`].
#[async_trait]
pub trait MetadataTransport: Send + Sync {
    async fn get_json(&self, path: &str) -> FetchResult<serde_json::Value>;
}

/// GET `path` and decode the body into `T`.
pub async fn get_typed<T, M>(transport: &M, path: &str) -> FetchResult<T>
where
    T: DeserializeOwned,
    M: MetadataTransport + ?Sized,
{
    let value = transport.get_json(path).await?;
    serde_json::from_value(value).map_err(|e| FetchError::Decode(format!("{path}: {e}")))
}
