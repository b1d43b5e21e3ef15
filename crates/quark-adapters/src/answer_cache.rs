//! JSON file answer cache.
//!
//! Stored answers live in a single JSON object keyed by question name, e.g.
//! `{"license": "MIT", "features": ["keymaps"]}`.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};

use quark_core::{
    application::{ApplicationError, ports::AnswerCache},
    domain::AnswerSet,
    error::QuarkResult,
};

pub const CACHE_FILE_NAME: &str = "answers.json";

/// Answer cache backed by one JSON file.
#[derive(Debug, Clone)]
pub struct JsonAnswerCache {
    path: PathBuf,
}

impl JsonAnswerCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Cache file inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(CACHE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self, action: &str, e: impl std::fmt::Display) -> ApplicationError {
        ApplicationError::Cache {
            reason: format!("failed to {action} {}: {e}", self.path.display()),
        }
    }
}

impl AnswerCache for JsonAnswerCache {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> QuarkResult<AnswerSet> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No stored answers yet");
                return Ok(AnswerSet::new());
            }
            Err(e) => return Err(self.error("read", e).into()),
        };

        let answers: AnswerSet =
            serde_json::from_str(&raw).map_err(|e| self.error("parse", e))?;
        debug!(answers = answers.len(), "Stored answers loaded");
        Ok(answers)
    }

    #[instrument(skip_all, fields(path = %self.path.display()))]
    fn save(&self, answers: &AnswerSet) -> QuarkResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.error("create directory for", e))?;
        }
        let json = serde_json::to_string_pretty(answers).map_err(|e| self.error("encode", e))?;
        fs::write(&self.path, json).map_err(|e| self.error("write", e))?;
        debug!(answers = answers.len(), "Answers stored");
        Ok(())
    }

    fn clear(&self) -> QuarkResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.error("remove", e).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quark_core::domain::{AnswerValue, QuestionId};
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let cache = JsonAnswerCache::in_dir(temp.path());
        assert!(cache.load().unwrap().is_empty());
    }

    #[test]
    fn saved_answers_load_back() {
        let temp = TempDir::new().unwrap();
        let cache = JsonAnswerCache::in_dir(temp.path().join("nested"));
        let answers = AnswerSet::new()
            .with(QuestionId::License, AnswerValue::Text("ISC".into()))
            .with(QuestionId::OpenInEditor, AnswerValue::Bool(false))
            .with(
                QuestionId::Features,
                AnswerValue::List(vec!["keymaps".into()]),
            );

        cache.save(&answers).unwrap();

        assert_eq!(cache.load().unwrap(), answers);
        let raw = fs::read_to_string(cache.path()).unwrap();
        assert!(raw.contains("\"license\": \"ISC\""));
    }

    #[test]
    fn corrupt_file_is_a_cache_error() {
        let temp = TempDir::new().unwrap();
        let cache = JsonAnswerCache::in_dir(temp.path());
        fs::write(cache.path(), "{not json").unwrap();

        let err = cache.load().unwrap_err();
        assert!(err.to_string().contains("Answer cache error"));
    }

    #[test]
    fn clear_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let cache = JsonAnswerCache::in_dir(temp.path());
        cache.save(&AnswerSet::new()).unwrap();

        cache.clear().unwrap();
        cache.clear().unwrap();
        assert!(!cache.path().exists());
    }
}
