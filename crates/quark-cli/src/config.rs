//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `QUARK_<SECTION>__<KEY>`, e.g.
//!    `QUARK_INSTALL__CLIENT=pnpm`
//! 3. Config file: `--config FILE`, or `config.toml` in the platform config
//!    directory
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use quark_adapters::registry::{DEFAULT_REGISTRY_URL, DEFAULT_TIMEOUT_SECS};
use quark_core::application::DEFAULT_INSTALL_CLIENT;

const ENV_PREFIX: &str = "QUARK";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Package registry used to check Atom dependencies.
    pub registry: RegistryConfig,
    /// Package manager settings.
    pub install: InstallConfig,
    /// Template settings.
    pub templates: TemplateConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Answer cache settings.
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REGISTRY_URL.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl RegistryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    /// Package manager binary; must understand `add` and `--dev`.
    pub client: String,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            client: DEFAULT_INSTALL_CLIENT.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory whose files replace the built-in templates of the same path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Remember answers between runs.
    pub enabled: bool,
    /// Overrides the platform cache directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then `QUARK_*`
    /// environment variables.
    ///
    /// `config_file` is the path the user passed via `--config`; it must
    /// exist.  The default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        tracing::debug!(path = %path.display(), required, "Loading configuration");

        let defaults =
            Config::try_from(&Self::default()).context("Failed to encode default configuration")?;

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(path.as_path()).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from '{}'", path.display()))?
            .try_deserialize()
            .context("Invalid configuration values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.quark.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        project_dirs()
            .map(|d| d.config_dir().join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(".quark.toml"))
    }

    /// The file `init` writes and `config path` reports.
    pub fn active_path(config_file: Option<&PathBuf>) -> PathBuf {
        config_file.cloned().unwrap_or_else(Self::config_path)
    }

    /// Directory holding the answer cache.
    pub fn cache_dir(&self) -> PathBuf {
        self.cache
            .dir
            .clone()
            .or_else(|| project_dirs().map(|d| d.cache_dir().to_path_buf()))
            .unwrap_or_else(|| Path::new(".quark").join("cache"))
    }

    /// Value of a dotted key such as `registry.url`, rendered for display.
    ///
    /// Returns `None` for unknown keys.  Unset optional keys render as an
    /// empty string.
    pub fn lookup(&self, key: &str) -> Option<String> {
        let tree = serde_json::to_value(self).ok()?;
        let (section, field) = key.split_once('.')?;
        let section = tree.get(section)?;

        match section.get(field) {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(value) => Some(value.to_string()),
            None if Self::OPTIONAL_KEYS.contains(&key) => Some(String::new()),
            None => None,
        }
    }

    /// Keys skipped when unset, still valid for [`Self::lookup`].
    const OPTIONAL_KEYS: &'static [&'static str] = &["templates.local_path", "cache.dir"];
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "quark", "quark")
}
