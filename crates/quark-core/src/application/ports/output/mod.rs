//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `quark-adapters` crate provides implementations; the interactive
//! prompter lives in the CLI.

use std::path::Path;

use crate::domain::{AnswerSet, Choice, Package};
use crate::error::QuarkResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `quark_adapters::filesystem::LocalFilesystem` (production)
/// - `quark_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> QuarkResult<()>;

    /// Write content to a file, replacing any existing content.
    fn write_file(&self, path: &Path, content: &str) -> QuarkResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for template source lookup.
///
/// Templates are addressed by their relative path inside the template set,
/// e.g. `keymaps/keymap.json`.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateStore: Send + Sync {
    /// Source text of one template.
    fn get(&self, path: &str) -> QuarkResult<String>;

    /// All template paths, sorted.
    fn list(&self) -> QuarkResult<Vec<String>>;
}

/// Port for template rendering.
///
/// The package is exposed to templates as `pkg`.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, name: &str, source: &str, package: &Package) -> QuarkResult<String>;
}

/// Port for asking the user one question at a time.
///
/// Implementations only present and read; validation and re-prompting are
/// owned by `QuestionFlow`.
pub trait Prompter {
    fn input(&mut self, message: &str, default: Option<String>) -> QuarkResult<String>;

    fn confirm(&mut self, message: &str, default: bool) -> QuarkResult<bool>;

    /// Index of the chosen entry.
    fn select(&mut self, message: &str, choices: &[Choice], default: usize) -> QuarkResult<usize>;

    /// Indices of the checked entries.
    fn multi_select(
        &mut self,
        message: &str,
        choices: &[Choice],
        checked: &[bool],
    ) -> QuarkResult<Vec<usize>>;

    /// Show why the last answer was rejected.
    fn report_invalid(&mut self, reason: &str);
}

/// Port for the remote package registry.
#[cfg_attr(test, mockall::automock)]
pub trait PackageRegistry: Send + Sync {
    /// Whether a package with this name is published.
    fn package_exists(&self, name: &str) -> QuarkResult<bool>;
}

/// Port for persisting answers between runs.
#[cfg_attr(test, mockall::automock)]
pub trait AnswerCache: Send + Sync {
    /// Previously stored answers; empty when nothing was stored yet.
    fn load(&self) -> QuarkResult<AnswerSet>;

    fn save(&self, answers: &AnswerSet) -> QuarkResult<()>;

    fn clear(&self) -> QuarkResult<()>;
}

/// Port for running external programs.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Run to completion; a non-zero exit is an error.
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> QuarkResult<()>;

    /// Start without waiting for the process to finish.
    fn spawn(&self, program: &str, args: &[String], cwd: &Path) -> QuarkResult<()>;
}
