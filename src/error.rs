//! Error types for the career navigator.

use crate::session::Stage;

/// Top-level error type for the navigator.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Navigator error: {0}")]
    Navigator(#[from] NavigatorError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Local, pre-flight failures. No network call is made when one of these is raised.
///
/// The messages are shown inline to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please paste your resume or upload a PDF.")]
    MissingResume,

    #[error("Please select a dream role or type a custom one.")]
    MissingRole,

    #[error("Invalid adaptation request: {field} {reason}")]
    InvalidAdaptation { field: &'static str, reason: String },
}

/// Failures of a remote call to the plan service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The upload endpoint rejected the file; `detail` comes from the server.
    #[error("{detail}")]
    Upload { detail: String },

    #[error("Server error: {status}")]
    Status { status: u16 },

    /// Connection, timeout, or an undecodable response body.
    #[error("Could not reach the career service: {reason}")]
    Network { reason: String },
}

impl ServiceError {
    /// HTTP status code, when the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => Self::Status {
                status: status.as_u16(),
            },
            None => Self::Network {
                reason: e.to_string(),
            },
        }
    }
}

/// Errors raised by the stage state machine itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigatorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Cannot {action} while {stage}")]
    InvalidTransition { stage: Stage, action: &'static str },

    #[error("Please wait for the resume upload to finish.")]
    UploadInProgress,
}

/// Result type alias for the navigator.
pub type Result<T> = std::result::Result<T, Error>;
