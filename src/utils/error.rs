//! Error handling for the console
//!
//! This module defines all error types used throughout the console.

use thiserror::Error;

/// Result type alias for the console
pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Main error type for the console
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or unusable session token
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Current role does not permit the operation
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Non-2xx HTTP status from the backend
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error body or free-text message
        message: String,
    },

    /// `success: false` envelope from the backend
    #[error("Backend rejected the request: {0}")]
    Backend(String),

    /// Client-side input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation attempted in the wrong flow state
    #[error("Flow state error: {0}")]
    FlowState(String),
}

impl ConsoleError {
    /// Whether this error came back from the backend rather than the client
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::Backend(_))
    }

    /// Collapse the structured taxonomy into the single user-facing line
    /// shown by the console binary. Diagnostics stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => format!("invalid input: {msg}"),
            Self::Authorization(_) => "you do not have permission for this action".to_string(),
            Self::Auth(_) => "no session token; sign in first".to_string(),
            _ => "operation failed, please retry".to_string(),
        }
    }
}
