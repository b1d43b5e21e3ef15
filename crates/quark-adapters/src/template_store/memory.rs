//! In-memory template store with built-in templates.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use tracing::info;

use quark_core::{
    application::{ApplicationError, ports::TemplateStore},
    error::QuarkResult,
};

use crate::{builtin_templates, template_loader::FilesystemTemplateLoader};

/// Thread-safe in-memory template store.
#[derive(Clone, Debug)]
pub struct InMemoryStore {
    inner: Arc<RwLock<BTreeMap<String, String>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Create a store with built-in templates loaded.
    pub fn with_builtin() -> QuarkResult<Self> {
        let store = Self::new();
        store.load_builtin()?;
        Ok(store)
    }

    /// Load built-in templates.
    pub fn load_builtin(&self) -> QuarkResult<()> {
        for (path, source) in builtin_templates::all_templates() {
            self.insert(path, source)?;
        }
        Ok(())
    }

    /// Replace templates with the files found by `loader`.
    ///
    /// Returns how many templates were overridden or added.
    pub fn load_overrides(&self, loader: &FilesystemTemplateLoader) -> QuarkResult<usize> {
        let templates = loader.load_all()?;
        let count = templates.len();
        for (path, source) in templates {
            self.insert(path, source)?;
        }
        info!(count, dir = %loader.dir().display(), "Template overrides loaded");
        Ok(count)
    }

    /// Insert or replace one template.
    pub fn insert(&self, path: impl Into<String>, source: impl Into<String>) -> QuarkResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.insert(path.into(), source.into());
        Ok(())
    }

    /// Get the number of templates.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateStore for InMemoryStore {
    fn get(&self, path: &str) -> QuarkResult<String> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.get(path).cloned().ok_or_else(|| {
            ApplicationError::TemplateNotFound {
                path: path.to_string(),
            }
            .into()
        })
    }

    fn list(&self) -> QuarkResult<Vec<String>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(inner.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn builtin_set_is_complete() {
        let store = InMemoryStore::with_builtin().unwrap();
        assert_eq!(store.len(), builtin_templates::TEMPLATES.len());
        assert!(store.get("package.json").unwrap().contains("pkg.name"));
    }

    #[test]
    fn unknown_template_is_not_found() {
        let store = InMemoryStore::new();
        assert!(store.is_empty());
        assert!(store.get("nope").is_err());
    }

    #[test]
    fn overrides_replace_file_by_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("README.md"), "custom readme").unwrap();

        let store = InMemoryStore::with_builtin().unwrap();
        let count = store
            .load_overrides(&FilesystemTemplateLoader::new(temp.path()))
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(store.get("README.md").unwrap(), "custom readme");
        assert!(store.get("LICENSE").unwrap().contains("pkg.license.text"));
        assert_eq!(store.len(), builtin_templates::TEMPLATES.len());
    }
}
