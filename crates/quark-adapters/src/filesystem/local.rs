//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use quark_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{QuarkError, QuarkResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> QuarkResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> QuarkResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> QuarkError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_nested_file_after_creating_parents() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let file = temp.path().join("keymaps/linter.json");

        fs.create_dir_all(file.parent().unwrap()).unwrap();
        fs.write_file(&file, "{}").unwrap();

        assert!(fs.exists(&file));
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "{}");
    }

    #[test]
    fn write_into_missing_directory_is_a_filesystem_error() {
        let temp = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .write_file(&temp.path().join("missing/file.txt"), "x")
            .unwrap_err();

        assert!(matches!(
            err,
            QuarkError::Application(ApplicationError::FilesystemError { .. })
        ));
    }
}
