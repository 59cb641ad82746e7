//! Application configuration structures.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote stats service and HTTP settings
    #[serde(default)]
    pub client: ClientConfig,

    /// Batch scheduling and retry policy
    #[serde(default)]
    pub batch: BatchConfig,

    /// Profile reference resolution rules
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Tabular input settings
    #[serde(default)]
    pub input: InputConfig,

    /// Leaderboard output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log filter settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.client.user_agent.trim().is_empty() {
            return Err(AppError::validation("client.user_agent is empty"));
        }
        if self.client.timeout_secs == 0 {
            return Err(AppError::validation("client.timeout_secs must be > 0"));
        }
        url::Url::parse(&self.client.endpoint)
            .map_err(|e| AppError::validation(format!("client.endpoint is invalid: {e}")))?;
        if self.batch.max_concurrent == 0 {
            return Err(AppError::validation("batch.max_concurrent must be > 0"));
        }
        if self.input.column.trim().is_empty() {
            return Err(AppError::validation("input.column is empty"));
        }
        Ok(())
    }
}

/// Remote stats service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// GraphQL endpoint URL
    #[serde(default = "defaults::endpoint")]
    pub endpoint: String,

    /// Referer header sent with every query
    #[serde(default = "defaults::referer")]
    pub referer: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::endpoint(),
            referer: defaults::referer(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Batch scheduling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Maximum concurrent remote lookups
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Extra attempts for transport failures
    #[serde(default = "defaults::max_retries")]
    pub max_retries: u32,

    /// Base backoff between attempts in milliseconds
    #[serde(default = "defaults::retry_backoff")]
    pub retry_backoff_ms: u64,

    /// Delay after each completed item in milliseconds
    #[serde(default)]
    pub request_delay_ms: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent: defaults::max_concurrent(),
            max_retries: defaults::max_retries(),
            retry_backoff_ms: defaults::retry_backoff(),
            request_delay_ms: 0,
        }
    }
}

/// Reference resolution settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Accepted URL hosts; empty accepts any host
    #[serde(default)]
    pub hosts: Vec<String>,
}

/// Tabular input settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Column holding profile references
    #[serde(default = "defaults::column")]
    pub column: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            column: defaults::column(),
        }
    }
}

/// Leaderboard output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(AppError::config(format!("Unknown output format: {other}"))),
        }
    }
}

/// Leaderboard output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[serde(default = "defaults::pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: defaults::pretty(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    #[serde(default = "defaults::level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::level(),
        }
    }
}

mod defaults {
    // Client defaults
    pub fn endpoint() -> String {
        "https://leetcode.com/graphql".into()
    }
    pub fn referer() -> String {
        "https://leetcode.com/".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; leaderboard/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Batch defaults
    pub fn max_concurrent() -> usize {
        5
    }
    pub fn max_retries() -> u32 {
        1
    }
    pub fn retry_backoff() -> u64 {
        250
    }

    pub fn column() -> String {
        "profile_url".into()
    }
    pub fn pretty() -> bool {
        true
    }
    pub fn level() -> String {
        "info".into()
    }
}
