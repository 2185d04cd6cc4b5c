//! CLI command implementations

pub mod generate;
pub mod solutions;

use std::path::PathBuf;

use crate::cli::error::CliError;
use crate::client::ConnectionConfig;
use crate::client::config::{ENV_TOKEN, ENV_URL};

/// Connection options shared by every command
#[derive(Debug, Default, Clone)]
pub struct ConnectionArgs {
    /// TOML config file
    pub config: Option<PathBuf>,
    /// Environment URL, overrides the config file and DATAVERSE_URL
    pub url: Option<String>,
    /// Bearer token, overrides the config file and DATAVERSE_TOKEN
    pub token: Option<String>,
    /// Per-request timeout in seconds
    pub request_timeout: Option<u64>,
    /// Table fetch parallelism
    pub concurrency: Option<usize>,
}

/// Build the connection config.
///
/// Precedence, highest first: flags, environment variables, config file.
pub fn resolve_connection(args: &ConnectionArgs) -> Result<ConnectionConfig, CliError> {
    let env_url = std::env::var(ENV_URL).ok();
    let env_token = std::env::var(ENV_TOKEN).ok();
    resolve_connection_with(args, env_url, env_token)
}

fn resolve_connection_with(
    args: &ConnectionArgs,
    env_url: Option<String>,
    env_token: Option<String>,
) -> Result<ConnectionConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| CliError::FileReadError(path.clone(), e.to_string()))?;
            ConnectionConfig::from_toml_str(&content)?
        }
        None => {
            let url = args.url.clone().or(env_url.clone()).ok_or_else(|| {
                CliError::InvalidArgument(format!(
                    "No environment URL: pass --url, set {ENV_URL} or use --config"
                ))
            })?;
            ConnectionConfig::new(url, "")
        }
    };

    if let Some(url) = args.url.clone().or(env_url) {
        config.environment_url = url.trim_end_matches('/').to_string();
    }
    if let Some(token) = args.token.clone().or(env_token) {
        config = config.with_access_token(token);
    }
    if let Some(seconds) = args.request_timeout {
        config = config.with_timeout(seconds);
    }
    if let Some(concurrency) = args.concurrency {
        config = config.with_max_concurrency(concurrency);
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FetchError;
    use std::io::Write;

    #[test]
    fn test_flags_build_config() {
        let args = ConnectionArgs {
            url: Some("https://contoso.crm.dynamics.com/".to_string()),
            token: Some("secret".to_string()),
            concurrency: Some(0),
            ..Default::default()
        };
        let config = resolve_connection_with(&args, None, None).unwrap();
        assert_eq!(config.environment_url, "https://contoso.crm.dynamics.com");
        assert_eq!(config.access_token(), "secret");
        assert_eq!(config.concurrency(), 1);
    }

    #[test]
    fn test_flags_override_environment() {
        let args = ConnectionArgs {
            url: Some("https://flag.crm.dynamics.com".to_string()),
            ..Default::default()
        };
        let config = resolve_connection_with(
            &args,
            Some("https://env.crm.dynamics.com".to_string()),
            Some("env-token".to_string()),
        )
        .unwrap();
        assert_eq!(config.environment_url, "https://flag.crm.dynamics.com");
        assert_eq!(config.access_token(), "env-token");
    }

    #[test]
    fn test_config_file_with_environment_token() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "environment_url = \"https://contoso.crm.dynamics.com\"\napi_version = \"9.1\"\nmax_concurrency = 4"
        )
        .unwrap();

        let args = ConnectionArgs {
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let config = resolve_connection_with(&args, None, Some("env-token".to_string())).unwrap();
        assert_eq!(config.base_url(), "https://contoso.crm.dynamics.com/api/data/v9.1");
        assert_eq!(config.max_concurrency, 4);
        assert_eq!(config.access_token(), "env-token");
    }

    #[test]
    fn test_missing_url_is_rejected() {
        let args = ConnectionArgs::default();
        let err = resolve_connection_with(&args, None, Some("token".to_string())).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn test_missing_token_is_rejected() {
        let args = ConnectionArgs {
            url: Some("https://contoso.crm.dynamics.com".to_string()),
            ..Default::default()
        };
        let err = resolve_connection_with(&args, None, None).unwrap_err();
        assert!(matches!(err, CliError::Fetch(FetchError::Config(_))));
    }
}
