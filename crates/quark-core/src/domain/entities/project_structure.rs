use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use crate::domain::error::DomainError;

/// Rendered file plan ready for materialization.
///
/// This is the output of the rendering step.
/// It contains no business logic, only data; paths are relative to `root`.
#[derive(Debug, Clone)]
pub struct ProjectStructure {
    pub(crate) root: PathBuf,
    pub(crate) entries: Vec<FsEntry>,
}

impl ProjectStructure {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
        }
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: String) {
        self.entries.push(FsEntry::File(FileToWrite {
            path: path.into(),
            content,
        }));
    }

    pub fn add_directory(&mut self, path: impl Into<PathBuf>) {
        self.entries.push(FsEntry::Directory(DirectoryToCreate { path: path.into() }));
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: String) -> Self {
        self.add_file(path, content);
        self
    }

    pub fn with_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.add_directory(path);
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::InvalidPlan("file plan is empty".into()));
        }

        let mut seen = HashSet::new();
        for entry in &self.entries {
            let path = entry.path();

            if path.is_absolute() {
                return Err(DomainError::AbsolutePathNotAllowed {
                    path: path.display().to_string(),
                });
            }

            if path.components().any(|c| c == Component::ParentDir) {
                return Err(DomainError::PathEscapesRoot {
                    path: path.display().to_string(),
                });
            }

            let path_str = path.display().to_string();
            if !seen.insert(path_str.clone()) {
                return Err(DomainError::DuplicatePath { path: path_str });
            }
        }

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[FsEntry] {
        &self.entries
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::File(f) => Some(f),
            _ => None,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &DirectoryToCreate> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::Directory(d) => Some(d),
            _ => None,
        })
    }

    /// The planned file at `path`, if any.
    pub fn file(&self, path: impl AsRef<Path>) -> Option<&FileToWrite> {
        let path = path.as_ref();
        self.files().find(|f| f.path == path)
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone)]
pub enum FsEntry {
    File(FileToWrite),
    Directory(DirectoryToCreate),
}

impl FsEntry {
    pub fn path(&self) -> &Path {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileToWrite {
    pub path: PathBuf,
    pub content: String,
}

impl FileToWrite {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}

#[derive(Debug, Clone)]
pub struct DirectoryToCreate {
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_plan_is_invalid() {
        assert!(ProjectStructure::new("out").validate().is_err());
    }

    #[test]
    fn duplicate_paths_are_rejected() {
        let plan = ProjectStructure::new("out")
            .with_file("README.md", "a".into())
            .with_file("README.md", "b".into());
        assert!(matches!(
            plan.validate(),
            Err(DomainError::DuplicatePath { .. })
        ));
    }

    #[test]
    fn absolute_paths_are_rejected() {
        let plan = ProjectStructure::new("out").with_file("/etc/passwd", String::new());
        assert!(matches!(
            plan.validate(),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
    }

    #[test]
    fn parent_components_are_rejected() {
        let plan = ProjectStructure::new("out")
            .with_file("README.md", String::new())
            .with_file("src/../../escaped.ts", String::new());
        assert!(matches!(
            plan.validate(),
            Err(DomainError::PathEscapesRoot { .. })
        ));
    }

    #[test]
    fn file_lookup_by_path() {
        let plan = ProjectStructure::new("out")
            .with_directory("keymaps")
            .with_file("keymaps/linter.json", "{}".into());
        assert!(plan.validate().is_ok());
        assert_eq!(plan.file("keymaps/linter.json").map(|f| f.size()), Some(2));
        assert!(plan.file("styles/linter.less").is_none());
        assert_eq!(plan.directories().count(), 1);
    }
}
