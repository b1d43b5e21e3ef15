//! Action Runner - external processes after the files are written.
//!
//! Runs, in order: dependency installation, `git init`, and opening the
//! editor. Installs and git are awaited; the editor is started and left
//! running. Nothing is retried.

use std::path::Path;
use tracing::{info, instrument};

use crate::{
    application::ports::{CommandRunner, Filesystem},
    domain::{InstallPlan, Package},
    error::QuarkResult,
};

pub const DEFAULT_INSTALL_CLIENT: &str = "yarn";

/// Runs package manager, git and editor commands in the package root.
pub struct ActionRunner {
    commands: Box<dyn CommandRunner>,
    filesystem: Box<dyn Filesystem>,
    client: String,
}

impl ActionRunner {
    pub fn new(commands: Box<dyn CommandRunner>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            commands,
            filesystem,
            client: DEFAULT_INSTALL_CLIENT.to_string(),
        }
    }

    /// Use a different package manager binary (must accept `add` and `--dev`).
    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = client.into();
        self
    }

    pub fn client(&self) -> &str {
        &self.client
    }

    /// Install runtime then development dependencies; empty lists are skipped.
    #[instrument(skip_all, fields(client = %self.client, cwd = %cwd.display()))]
    pub fn install(&self, plan: &InstallPlan, cwd: &Path) -> QuarkResult<()> {
        if !plan.runtime.is_empty() {
            info!(packages = ?plan.runtime, "Installing dependencies");
            let args = add_args(&plan.runtime, "--ignore-scripts");
            self.commands.run(&self.client, &args, cwd)?;
        }

        if !plan.dev.is_empty() {
            info!(packages = ?plan.dev, "Installing development dependencies");
            let args = add_args(&plan.dev, "--dev");
            self.commands.run(&self.client, &args, cwd)?;
        }

        Ok(())
    }

    /// Run `git init` when asked for and no repository exists yet.
    ///
    /// Returns whether a repository was initialized.
    #[instrument(skip_all, fields(cwd = %cwd.display()))]
    pub fn init_git(&self, package: &Package, cwd: &Path) -> QuarkResult<bool> {
        if !package.init_git {
            return Ok(false);
        }
        if self.filesystem.exists(&cwd.join(".git")) {
            info!("Git repository already present, skipping init");
            return Ok(false);
        }

        self.commands.run("git", &["init".to_string()], cwd)?;
        info!("Git repository initialized");
        Ok(true)
    }

    /// Start `<editor> .` without waiting for it.
    ///
    /// The editor command may carry its own arguments, e.g. `code --wait`.
    /// Returns whether an editor was started.
    #[instrument(skip_all, fields(cwd = %cwd.display()))]
    pub fn open_editor(
        &self,
        package: &Package,
        editor: Option<&str>,
        cwd: &Path,
    ) -> QuarkResult<bool> {
        if !package.open_in_editor {
            return Ok(false);
        }
        let Some(mut parts) = editor.map(str::split_whitespace) else {
            return Ok(false);
        };
        let Some(program) = parts.next() else {
            return Ok(false);
        };

        let mut args: Vec<String> = parts.map(str::to_string).collect();
        args.push(".".to_string());

        self.commands.spawn(program, &args, cwd)?;
        info!(editor = program, "Editor opened");
        Ok(true)
    }
}

fn add_args(packages: &[String], flag: &str) -> Vec<String> {
    std::iter::once("add".to_string())
        .chain(packages.iter().cloned())
        .chain(std::iter::once(flag.to_string()))
        .collect()
}
