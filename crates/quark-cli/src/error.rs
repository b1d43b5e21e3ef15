//! Error presentation for the `quark` binary.
//!
//! Every failure that reaches `main` is a [`CliError`].  Each one knows:
//! - the hints printed under the message
//! - its [`ErrorCategory`], which picks the log level and the exit code
//! - how to render itself with or without ANSI colours

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use quark_core::{application::ApplicationError, error::QuarkError};

pub use quark_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Input that clap accepted but the command cannot use.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// `init` would overwrite an existing file.
    #[error("Configuration file already exists at {path}")]
    ConfigExists { path: PathBuf },

    /// `config get` with a key the configuration does not have.
    #[error("Unknown configuration key '{key}'")]
    UnknownConfigKey { key: String },

    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Anything raised by the core services or the adapters.
    #[error("Generation failed: {0}")]
    Core(#[from] QuarkError),

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The user backed out of a prompt.
    #[error("Operation cancelled")]
    Cancelled,

    /// The binary was built without a cargo feature the command needs.
    #[error("Feature not available: {feature}")]
    FeatureNotAvailable { feature: &'static str },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Hints printed under the error message.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Rejected input: {message}"),
                "Run 'quark <command> --help' to see the accepted values".into(),
            ],
            Self::ConfigExists { path } => vec![
                format!("Inspect it first: {}", path.display()),
                "Replace it with the defaults: quark init --force".into(),
            ],
            Self::UnknownConfigKey { key } => vec![
                format!("'{key}' is not a configuration key"),
                "List all keys and values: quark config list".into(),
            ],
            Self::ConfigError { .. } => vec![
                "Show which file is read: quark config path".into(),
                "Write a fresh default file: quark init --force".into(),
            ],
            Self::Core(core) => core.suggestions(),
            Self::IoError { .. } => vec![
                "Check that the destination is writable".into(),
                "Check that the disk is not full".into(),
            ],
            Self::Cancelled => vec!["Nothing was written; run 'quark new' again to restart".into()],
            Self::FeatureNotAvailable { feature } => vec![format!(
                "Rebuild with the feature enabled: cargo install quark-cli --features {feature}"
            )],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::ConfigExists { .. } | Self::Cancelled => {
                ErrorCategory::UserError
            }
            Self::UnknownConfigKey { .. } => ErrorCategory::NotFound,
            Self::ConfigError { .. } | Self::FeatureNotAvailable { .. } => {
                ErrorCategory::Configuration
            }
            Self::IoError { .. } => ErrorCategory::Internal,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::External | CoreCategory::Internal => ErrorCategory::Internal,
            },
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Internal => 1,
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
        }
    }

    /// Message, optional cause chain and hints, ready for stderr.
    pub fn render(&self, verbose: bool, color: bool) -> String {
        let paint = Painter(color);
        let mut lines = vec![
            String::new(),
            format!("{} {}", paint.red("\u{2717}"), paint.red(&format!("Error: {self}"))),
        ];

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                lines.push(paint.dim(&format!("  caused by: {err}")));
                cause = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            lines.push(String::new());
            lines.push(paint.yellow("Suggestions:"));
            lines.extend(suggestions.iter().map(|s| format!("  {s}")));
        }

        if !verbose {
            lines.push(String::new());
            lines.push(paint.dim("Run again with -v for the full cause chain."));
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// Record the failure at a level matching its category.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(category = ?self.category(), "{self}")
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(category = ?self.category(), "{self}")
            }
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {source}");
        }
    }
}

/// Applies owo-colors styles only when colour is on.
struct Painter(bool);

impl Painter {
    fn red(&self, s: &str) -> String {
        if self.0 { s.red().bold().to_string() } else { s.to_string() }
    }

    fn yellow(&self, s: &str) -> String {
        if self.0 { s.yellow().bold().to_string() } else { s.to_string() }
    }

    fn dim(&self, s: &str) -> String {
        if self.0 { s.dimmed().to_string() } else { s.to_string() }
    }
}

/// Coarse classification driving exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input, a refused overwrite, or a cancelled prompt.
    UserError,
    NotFound,
    Configuration,
    /// System failures, including external commands that exited non-zero.
    Internal,
}

/// Whether a core error is the user backing out of a prompt.
pub fn is_cancellation(err: &QuarkError) -> bool {
    matches!(
        err,
        QuarkError::Application(ApplicationError::Cancelled)
    )
}

/// Converts foreign errors into [`CliError`] at call sites, attaching a
/// short description of what was being done.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for Result<T, QuarkError> {
    /// Core errors carry their own context; the description only reaches
    /// the debug log.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| {
            if is_cancellation(&e) {
                return CliError::Cancelled;
            }
            let step: String = f().into();
            tracing::debug!(step = %step, "Step failed");
            CliError::Core(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quark_core::domain::DomainError;
    use std::io;

    fn core(err: impl Into<QuarkError>) -> CliError {
        CliError::Core(err.into())
    }

    #[test]
    fn config_exists_suggests_force() {
        let err = CliError::ConfigExists {
            path: PathBuf::from("/tmp/quark/config.toml"),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("--force")));
    }

    #[test]
    fn unknown_license_points_to_licenses_command() {
        let err = core(DomainError::UnknownLicense { id: "WTFPL".into() });
        assert!(err.suggestions().iter().any(|s| s.contains("quark licenses")));
    }

    #[test]
    fn exit_codes_follow_category() {
        assert_eq!(CliError::Cancelled.exit_code(), 2);
        assert_eq!(
            CliError::InvalidInput {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            2
        );
        assert_eq!(CliError::UnknownConfigKey { key: "x".into() }.exit_code(), 3);
        assert_eq!(core(DomainError::UnknownLicense { id: "x".into() }).exit_code(), 3);
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
        assert_eq!(CliError::from(io::Error::other("disk on fire")).exit_code(), 1);
    }

    #[test]
    fn failed_install_is_internal() {
        let err = core(ApplicationError::CommandFailed {
            command: "yarn add typescript".into(),
            reason: "exit status: 1".into(),
        });
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn plain_render_has_no_ansi() {
        let s = CliError::UnknownConfigKey { key: "nope".into() }.render(false, false);
        assert!(s.contains("Error: Unknown configuration key 'nope'"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("-v"));
        assert!(!s.contains('\u{1b}'));
    }

    #[test]
    fn verbose_render_shows_causes() {
        let err = CliError::IoError {
            message: "writing README.md".into(),
            source: io::Error::other("read-only file system"),
        };
        let s = err.render(true, false);
        assert!(s.contains("caused by: read-only file system"));
        assert!(!s.contains("Run again with -v"));
    }

    #[test]
    fn io_results_gain_context() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let err = result.with_cli_context(|| "reading config").unwrap_err();
        assert_eq!(err.to_string(), "I/O error: reading config");
    }

    #[test]
    fn cancelled_prompt_becomes_cancelled() {
        let result: Result<(), QuarkError> = Err(ApplicationError::Cancelled.into());
        assert!(matches!(
            result.with_cli_context(|| "asking"),
            Err(CliError::Cancelled)
        ));
    }

    #[test]
    fn prompt_failure_mentioning_cancel_is_not_cancellation() {
        let err: QuarkError = ApplicationError::Prompt {
            reason: "cancelled by user".into(),
        }
        .into();
        assert!(!is_cancellation(&err));
    }
}
