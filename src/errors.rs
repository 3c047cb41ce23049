//! Error types shared by the HTTP client, services and the query layer.

use thiserror::Error;

/// Result alias used across the crate
pub type ApiResult<T> = Result<T, ApiError>;

/// Everything that can go wrong between a form submit and a parsed response.
///
/// Errors are `Clone + PartialEq` because they are stored in the query cache and
/// shared between every caller coalesced onto the same in-flight request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// An outbound payload failed local schema validation; nothing was sent
    #[error("Invalid {resource} payload")]
    InvalidPayload { resource: &'static str },

    /// The backend answered with a non-2xx status
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The backend answered 2xx but the body did not match the expected shape
    #[error("Invalid {resource} response")]
    InvalidResponse { resource: &'static str },

    /// The request never produced a response
    #[error("{0}")]
    Transport(String),

    /// A form field failed validation; carries the user-facing message
    #[error("{0}")]
    Validation(String),

    /// The client was configured with unusable values
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Builds an HTTP error from a status code and an optional server message.
    pub fn http(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP {status}"));
        ApiError::Http { status, message }
    }

    /// HTTP status code, when the error came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this failure was produced locally and never reached the network
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ApiError::InvalidPayload { .. } | ApiError::Validation(_) | ApiError::Config(_)
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}
