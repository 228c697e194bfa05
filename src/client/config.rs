//! Configuration management for the repository client

use std::{path::PathBuf, time::Duration};

use compact_str::CompactString;

use super::error::{ClientError, Result};
use crate::config::AppConfig;

pub const DEFAULT_OFFICIAL_URL: &str = "https://api.github.com";
pub const DEFAULT_TRENDING_URL: &str = "https://trendings.herokuapp.com/repo";
pub const DEFAULT_ACCEPT: &str = "application/vnd.github.mercy-preview+json";
pub const DEFAULT_USER_AGENT: &str = concat!("repolens/", env!("CARGO_PKG_VERSION"));

/// Main configuration for the repository client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// GitHub REST API root
    pub official_url: CompactString,
    /// Trending service root
    pub trending_url: CompactString,
    /// Value of the `User-Agent` header
    pub user_agent: CompactString,
    /// Value of the `Accept` header sent on every request
    pub accept: CompactString,
    /// Request timeout applied to the transport
    pub timeout: Duration,
    /// Debug configuration
    pub debug: DebugConfig,
}

/// Debug and logging configuration
#[derive(Debug, Clone, Default)]
pub struct DebugConfig {
    /// Dump every response body to `log_directory`
    pub log_responses: bool,
    /// Directory for storing response dumps
    pub log_directory: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_OFFICIAL_URL, DEFAULT_TRENDING_URL)
    }
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(
        official_url: impl Into<CompactString>,
        trending_url: impl Into<CompactString>,
    ) -> Self {
        Self {
            official_url: official_url.into(),
            trending_url: trending_url.into(),
            user_agent: DEFAULT_USER_AGENT.into(),
            accept: DEFAULT_ACCEPT.into(),
            timeout: Duration::from_secs(30),
            debug: DebugConfig::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validate_url("official_url", &self.official_url)?;
        validate_url("trending_url", &self.trending_url)?;

        if self.timeout.is_zero() {
            return Err(ClientError::config_validation(
                "timeout",
                "Timeout must be greater than zero",
            ));
        }

        if self.debug.log_responses && self.debug.log_directory.is_none() {
            return Err(ClientError::config_validation(
                "log_directory",
                "Response logging needs a log directory",
            ));
        }

        Ok(())
    }

    /// Official API root without a trailing slash
    pub(crate) fn official_root(&self) -> &str {
        self.official_url.trim_end_matches('/')
    }
}

fn validate_url(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ClientError::config_validation(field, "URL cannot be empty"));
    }

    if !value.starts_with("http://") && !value.starts_with("https://") {
        return Err(ClientError::config_validation(
            field,
            "URL must start with http:// or https://",
        ));
    }

    url::Url::parse(value).map_err(|e| ClientError::invalid_url(value, e))?;

    Ok(())
}

impl From<&AppConfig> for ClientConfig {
    fn from(config: &AppConfig) -> Self {
        Self::new(config.official_url.clone(), config.trending_url.clone())
            .with_timeout(Duration::from_secs(config.timeout_secs))
    }
}

impl ClientConfig {
    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable dumping of response bodies into `directory`
    pub fn with_response_dump(mut self, directory: impl Into<PathBuf>) -> Self {
        self.debug = DebugConfig {
            log_responses: true,
            log_directory: Some(directory.into()),
        };
        self
    }
}
