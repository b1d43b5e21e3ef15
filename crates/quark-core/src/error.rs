//! Unified error handling for Quark Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Quark Core operations.
#[derive(Debug, Error, Clone)]
pub enum QuarkError {
    /// Errors from the domain layer (answer and plan rule violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl QuarkError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Inspect the effective settings with 'quark config list'".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in Quark".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    External,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type QuarkResult<T> = Result<T, QuarkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_category_is_mapped() {
        let err: QuarkError = DomainError::UnknownLicense { id: "WTFPL".into() }.into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn registry_failures_are_external() {
        let err: QuarkError = ApplicationError::Registry {
            reason: "timed out".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::External);
    }

    #[test]
    fn cancellation_is_a_user_error() {
        let err: QuarkError = ApplicationError::Cancelled.into();
        assert_eq!(err.category(), ErrorCategory::Validation);
    }
}
