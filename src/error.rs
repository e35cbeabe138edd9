//! Error types for the EventSync client

use reqwest::StatusCode;
use thiserror::Error;
use validator::ValidationErrors;

/// Main client error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Rejected by a client-side schema before reaching the network
    #[error("Validation error: {0}")]
    Validation(String),

    /// A successful response whose body does not match the expected schema
    #[error("Decode error: {0}")]
    Decode(String),

    /// Non-success status returned by the events service
    #[error("Server returned HTTP {status}")]
    Status { status: StatusCode, body: String },

    /// 401 from any endpoint; credentials have already been cleared
    #[error("Authentication required")]
    Unauthorized,

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Credential storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Status { status, .. } => Some(*status),
            AppError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            AppError::Transport(e) => e.status(),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::Decode(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        AppError::Storage(error.to_string())
    }
}

/// Result type alias for client operations
pub type AppResult<T> = Result<T, AppError>;
