//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{NotificationId, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not present on board: {0}")]
    UserNotFound(UserId),

    #[error("Notification not found: {0}")]
    NotificationNotFound(NotificationId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Identifier must not be empty: {0}")]
    EmptyIdentifier(&'static str),
}

impl DomainError {
    /// Get an error code string for views
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::EmptyIdentifier(_) => "EMPTY_IDENTIFIER",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_) | Self::NotificationNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidEmail | Self::EmptyIdentifier(_)
        )
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields = errors.field_errors();
        if fields.contains_key("id") {
            return Self::EmptyIdentifier("id");
        }
        if fields.contains_key("email") || fields.contains_key("user_email") {
            return Self::InvalidEmail;
        }
        Self::ValidationError(errors.to_string())
    }
}

/// Result alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
