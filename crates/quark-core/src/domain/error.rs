// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (answers can be re-derived after a fix)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Answer Errors
    // ========================================================================
    #[error("Invalid answer for '{question}': {reason}")]
    InvalidAnswer {
        question: &'static str,
        reason: String,
    },

    #[error("'{value}' is not a valid choice for '{question}'")]
    UnknownChoice {
        question: &'static str,
        value: String,
    },

    #[error("Answer for '{question}' has the wrong type: expected {expected}")]
    AnswerType {
        question: &'static str,
        expected: &'static str,
    },

    #[error("Required answer missing: {question}")]
    MissingAnswer { question: &'static str },

    #[error("Unsupported license '{id}'")]
    UnknownLicense { id: String },

    // ========================================================================
    // File Plan Errors
    // ========================================================================
    #[error("Invalid file plan: {0}")]
    InvalidPlan(String),

    #[error("Duplicate path in file plan: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path leaves the package directory: {path}")]
    PathEscapesRoot { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidAnswer { question, reason } => vec![
                format!("The answer to '{}' was rejected: {}", question, reason),
                "Run the generator again and correct the answer".into(),
            ],
            Self::UnknownChoice { question, value } => vec![
                format!("'{}' is not offered by the '{}' question", value, question),
                "A cached answer may be stale; clear it with 'quark config clear-cache'".into(),
            ],
            Self::UnknownLicense { id } => vec![
                format!("'{}' is not in the license table", id),
                "List supported licenses: quark licenses".into(),
            ],
            Self::MissingAnswer { question } => vec![
                format!("The '{}' question was never answered", question),
                "This is likely a bug in the question catalogue".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidAnswer { .. } | Self::UnknownChoice { .. } | Self::AnswerType { .. } => {
                ErrorCategory::Validation
            }
            Self::UnknownLicense { .. } => ErrorCategory::NotFound,
            _ => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
