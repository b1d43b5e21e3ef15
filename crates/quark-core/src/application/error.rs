//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// No template source registered under this path.
    #[error("Template not found: {path}")]
    TemplateNotFound { path: String },

    /// Template rendering failed.
    #[error("Template rendering failed for {path}: {reason}")]
    RenderingFailed { path: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Template store error")]
    StoreLockError,

    /// The interactive prompt could not be shown.
    #[error("Prompt failed: {reason}")]
    Prompt { reason: String },

    /// The user backed out of a prompt with Esc or Ctrl-C.
    #[error("Cancelled by user")]
    Cancelled,

    /// The package registry could not be queried.
    #[error("Package registry unavailable: {reason}")]
    Registry { reason: String },

    /// Reading or writing the answer cache failed.
    #[error("Answer cache error: {reason}")]
    Cache { reason: String },

    /// An external command could not be started or exited unsuccessfully.
    #[error("Command '{command}' failed: {reason}")]
    CommandFailed { command: String, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { path } => vec![
                format!("No template for '{}'", path),
                "Check the templates.local_path setting, or unset it to use the built-in set"
                    .into(),
            ],
            Self::RenderingFailed { path, .. } => vec![
                format!("The template '{}' could not be rendered", path),
                "If you override templates locally, check its syntax".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::Registry { .. } => vec![
                "Check your network connection".into(),
                "The registry URL can be changed with QUARK_REGISTRY__URL".into(),
            ],
            Self::Cache { .. } => vec![
                "Clear stored answers with 'quark config clear-cache'".into(),
                "Or disable caching with QUARK_CACHE__ENABLED=false".into(),
            ],
            Self::CommandFailed { command, .. } => vec![
                format!("Make sure '{}' is installed and on your PATH", command),
                "Pass --skip-install to generate files without installing".into(),
            ],
            Self::Prompt { .. } => vec!["Run quark from an interactive terminal".into()],
            Self::Cancelled => vec!["Nothing was written; run 'quark new' again to restart".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::FilesystemError { .. } | Self::StoreLockError => ErrorCategory::Internal,
            Self::RenderingFailed { .. } | Self::Cache { .. } => ErrorCategory::Internal,
            Self::Registry { .. } | Self::CommandFailed { .. } => ErrorCategory::External,
            Self::Prompt { .. } => ErrorCategory::Configuration,
            Self::Cancelled => ErrorCategory::Validation,
        }
    }
}
