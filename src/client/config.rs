//! Connection configuration for the metadata service
//!
//! A `ConnectionConfig` is assembled once and handed to a transport at
//! construction. Targeting another environment or credential means building a
//! new config and a new fetcher.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::FetchError;

/// Environment variable holding the environment URL
pub const ENV_URL: &str = "DATAVERSE_URL";
/// Environment variable holding the bearer token
pub const ENV_TOKEN: &str = "DATAVERSE_TOKEN";
/// Environment variable overriding the Web API version
pub const ENV_API_VERSION: &str = "DATAVERSE_API_VERSION";

#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectionConfig {
    /// Environment URL (e.g., https://contoso.crm.dynamics.com)
    pub environment_url: String,

    /// Bearer token, never serialized or logged
    #[serde(skip_serializing, default)]
    access_token: String,

    /// Web API version
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Maximum number of tables fetched concurrently
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

fn default_api_version() -> String {
    "9.2".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_concurrency() -> usize {
    8
}

impl ConnectionConfig {
    /// Create a config for an environment and token
    pub fn new(environment_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            environment_url: environment_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            api_version: default_api_version(),
            timeout_seconds: default_timeout_seconds(),
            max_concurrency: default_max_concurrency(),
        }
    }

    /// Create from environment variables
    ///
    /// Reads DATAVERSE_URL and DATAVERSE_TOKEN, plus DATAVERSE_API_VERSION when set.
    pub fn from_env() -> Result<Self, FetchError> {
        let url = std::env::var(ENV_URL)
            .map_err(|_| FetchError::Config(format!("{ENV_URL} environment variable not set")))?;
        let token = std::env::var(ENV_TOKEN)
            .map_err(|_| FetchError::Config(format!("{ENV_TOKEN} environment variable not set")))?;

        let mut config = Self::new(url, token);
        if let Ok(version) = std::env::var(ENV_API_VERSION) {
            config = config.with_api_version(version);
        }
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document.
    ///
    /// The token may be left out of the file and supplied with
    /// [`ConnectionConfig::with_access_token`].
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(content: &str) -> Result<Self, FetchError> {
        let mut config: Self = toml::from_str(content)
            .map_err(|e| FetchError::Config(format!("Invalid config file: {e}")))?;
        config.environment_url = config.environment_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = access_token.into();
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Set the table fetch parallelism. Zero is clamped to one.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Check that the config can address a service.
    pub fn validate(&self) -> Result<(), FetchError> {
        if self.environment_url.is_empty() {
            return Err(FetchError::Config("Environment URL cannot be empty".to_string()));
        }
        if !self.environment_url.starts_with("https://") && !self.environment_url.starts_with("http://") {
            return Err(FetchError::Config(format!(
                "Environment URL must start with http:// or https://: {}",
                self.environment_url
            )));
        }
        if self.access_token.is_empty() {
            return Err(FetchError::Config("Access token cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Root of the Web API, e.g. `https://contoso.crm.dynamics.com/api/data/v9.2`
    pub fn base_url(&self) -> String {
        format!("{}/api/data/v{}", self.environment_url, self.api_version)
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Effective parallelism, never zero
    pub fn concurrency(&self) -> usize {
        self.max_concurrency.max(1)
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("environment_url", &self.environment_url)
            .field("access_token", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("max_concurrency", &self.max_concurrency)
            .finish()
    }
}

// Display only shows the environment so configs can be logged safely
impl fmt::Display for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.environment_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ConnectionConfig::new("https://contoso.crm.dynamics.com/", "token");
        assert_eq!(config.environment_url, "https://contoso.crm.dynamics.com");
        assert_eq!(config.api_version, "9.2");
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.max_concurrency, 8);
        assert_eq!(
            config.base_url(),
            "https://contoso.crm.dynamics.com/api/data/v9.2"
        );
    }

    #[test]
    fn test_config_builders() {
        let config = ConnectionConfig::new("https://org.crm4.dynamics.com", "token")
            .with_api_version("9.1")
            .with_timeout(10)
            .with_max_concurrency(0);
        assert_eq!(config.base_url(), "https://org.crm4.dynamics.com/api/data/v9.1");
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.concurrency(), 1);
    }

    #[test]
    fn test_validate() {
        assert!(ConnectionConfig::new("https://org.crm.dynamics.com", "t").validate().is_ok());
        assert!(matches!(
            ConnectionConfig::new("", "t").validate(),
            Err(FetchError::Config(_))
        ));
        assert!(matches!(
            ConnectionConfig::new("org.crm.dynamics.com", "t").validate(),
            Err(FetchError::Config(_))
        ));
        assert!(matches!(
            ConnectionConfig::new("https://org.crm.dynamics.com", "").validate(),
            Err(FetchError::Config(_))
        ));
    }

    #[test]
    fn test_token_not_leaked() {
        let config = ConnectionConfig::new("https://org.crm.dynamics.com", "super-secret");
        assert!(!format!("{config:?}").contains("super-secret"));
        assert_eq!(config.to_string(), "https://org.crm.dynamics.com");

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super-secret"));
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let config: ConnectionConfig =
            serde_json::from_str(r#"{"environment_url": "https://org.crm.dynamics.com"}"#).unwrap();
        assert_eq!(config.api_version, "9.2");
        assert_eq!(config.max_concurrency, 8);
        assert_eq!(config.access_token(), "");
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn test_from_toml_str() {
        let config = ConnectionConfig::from_toml_str(
            "environment_url = \"https://org.crm.dynamics.com/\"\nmax_concurrency = 4\n",
        )
        .unwrap()
        .with_access_token("token");
        assert_eq!(config.environment_url, "https://org.crm.dynamics.com");
        assert_eq!(config.max_concurrency, 4);
        assert!(config.validate().is_ok());
    }
}
