//! Filesystem-based template loader.
//!
//! Reads a local override directory laid out like the built-in template set.
//! Every regular file found becomes a template keyed by its path relative to
//! the directory root, so `my-templates/README.md` replaces the built-in
//! `README.md` and leaves all others untouched.
//!
//! # Directory layout expected
//!
//! ```text
//! my-templates/
//! ├── README.md
//! ├── package.json
//! └── keymaps/
//!     └── keymap.json
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use quark_core::error::{QuarkError, QuarkResult};

/// Loads template sources from a directory tree.
pub struct FilesystemTemplateLoader {
    templates_dir: PathBuf,
}

impl FilesystemTemplateLoader {
    /// Create a loader pointed at `templates_dir`.
    ///
    /// The directory does not need to exist yet; [`load_all`](Self::load_all)
    /// will return an error if it is missing when called.
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Load every readable file under the directory as `(path, source)`.
    ///
    /// Files that are not valid UTF-8 are skipped with a `WARN` log rather
    /// than failing the whole batch.
    #[instrument(skip(self), fields(dir = %self.templates_dir.display()))]
    pub fn load_all(&self) -> QuarkResult<Vec<(String, String)>> {
        if !self.templates_dir.is_dir() {
            return Err(QuarkError::Configuration {
                message: format!(
                    "templates directory not found: {}",
                    self.templates_dir.display()
                ),
            });
        }

        let mut templates = Vec::new();

        for walk_entry in WalkDir::new(&self.templates_dir)
            .min_depth(1)
            .sort_by_file_name()
        {
            let walk_entry = walk_entry.map_err(|e| QuarkError::Configuration {
                message: format!("directory walk error: {e}"),
            })?;

            if !walk_entry.file_type().is_file() {
                continue; // Directories come implicitly; skip symlinks and other special types.
            }

            let abs_path = walk_entry.path();
            let Ok(rel) = abs_path.strip_prefix(&self.templates_dir) else {
                continue;
            };
            let path = normalize_path(&rel.to_string_lossy());

            match fs::read_to_string(abs_path) {
                Ok(source) => {
                    debug!(template = %path, "loaded template override");
                    templates.push((path, source));
                }
                Err(e) => {
                    warn!(
                        file = %abs_path.display(),
                        error = %e,
                        "skipping unreadable template file"
                    );
                }
            }
        }

        debug!(count = templates.len(), "finished loading templates");
        Ok(templates)
    }
}

/// Normalise a filesystem path to forward slashes so Windows and Unix paths
/// compare identically with built-in template names.
fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}
