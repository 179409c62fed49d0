//! Authentication error types.

use thiserror::Error;

use super::ApiError;

/// Authentication error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum AuthError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("failed to retrieve stored session: {message}")]
    SessionRetrievalFailed { message: String },

    #[error("failed to store session: {message}")]
    SessionStorageFailed { message: String },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("secure storage error: {0}")]
    Secret(#[from] super::SecretError),
}

impl AuthError {
    /// Creates invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates retrieval failed error.
    #[must_use]
    pub fn retrieval_failed(message: impl Into<String>) -> Self {
        Self::SessionRetrievalFailed {
            message: message.into(),
        }
    }

    /// Creates storage failed error.
    #[must_use]
    pub fn storage_failed(message: impl Into<String>) -> Self {
        Self::SessionStorageFailed {
            message: message.into(),
        }
    }

    /// Returns the alert text shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput { reason } => reason.clone(),
            Self::Api(err) => err.user_message("Something went wrong"),
            _ => "Something went wrong".to_string(),
        }
    }
}
