// src/error.rs

//! Unified error handling for the leaderboard application.

use thiserror::Error;

/// Result type alias for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for a single remote lookup.
pub type LookupResult<T> = std::result::Result<T, LookupError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client setup failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// CSV reading or writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Input table lacks the column holding profile references
    #[error("Input must contain a '{column}' column")]
    InputSchema { column: String },

    /// Remote lookup failed for a single account
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an input schema error for a missing column.
    pub fn input_schema(column: impl Into<String>) -> Self {
        Self::InputSchema {
            column: column.into(),
        }
    }
}

/// Failure of one remote statistics lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Connection could not be established or the body could not be read
    #[error("transport failure: {0}")]
    Transport(String),

    /// Request exceeded the configured timeout
    #[error("request timed out")]
    Timeout,

    /// Remote answered with a non-2xx status
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// Response was well-formed but carried no matching account
    #[error("account not found")]
    AccountNotFound,

    /// Response did not match the expected schema
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Coarse classification of a [`LookupError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupErrorKind {
    TransportError,
    AccountNotFound,
    MalformedResponse,
}

impl LookupError {
    /// Classify this error.
    pub fn kind(&self) -> LookupErrorKind {
        match self {
            Self::Transport(_) | Self::Timeout | Self::Status(_) => LookupErrorKind::TransportError,
            Self::AccountNotFound => LookupErrorKind::AccountNotFound,
            Self::MalformedResponse(_) => LookupErrorKind::MalformedResponse,
        }
    }

    /// Whether a later attempt could succeed.
    pub fn is_transient(&self) -> bool {
        self.kind() == LookupErrorKind::TransportError
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if let Some(status) = error.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Transport(error.to_string())
        }
    }
}
