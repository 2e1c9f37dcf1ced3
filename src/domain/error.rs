use thiserror::Error;

use super::user::ValidationErrors;

/// Core domain errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid ID format: {message}")]
    InvalidId { message: String },

    #[error("Username '{username}' already exists")]
    UsernameConflict { username: String },
}

impl DomainError {
    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }

    pub fn username_conflict(username: impl Into<String>) -> Self {
        Self::UsernameConflict {
            username: username.into(),
        }
    }

    /// Check if this error signals a uniqueness violation
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::UsernameConflict { .. })
    }
}
