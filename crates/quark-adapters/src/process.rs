//! External process runner using `std::process`.

use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use tracing::{debug, instrument};

use quark_core::{
    application::{ApplicationError, ports::CommandRunner},
    error::QuarkResult,
};

/// Runs programs found on `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }

    fn resolve(program: &str) -> QuarkResult<PathBuf> {
        which::which(program).map_err(|e| {
            ApplicationError::CommandFailed {
                command: program.to_string(),
                reason: format!("not found on PATH ({e})"),
            }
            .into()
        })
    }
}

impl CommandRunner for SystemCommandRunner {
    #[instrument(skip(self), fields(cwd = %cwd.display()))]
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> QuarkResult<()> {
        let executable = Self::resolve(program)?;
        let output = Command::new(executable)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ApplicationError::CommandFailed {
                command: program.to_string(),
                reason: e.to_string(),
            })?;

        if output.status.success() {
            debug!("Command finished");
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let last_line = stderr.lines().rev().find(|l| !l.trim().is_empty());
        Err(ApplicationError::CommandFailed {
            command: format!("{program} {}", args.join(" ")),
            reason: match last_line {
                Some(line) => format!("{}: {}", output.status, line.trim()),
                None => output.status.to_string(),
            },
        }
        .into())
    }

    #[instrument(skip(self), fields(cwd = %cwd.display()))]
    fn spawn(&self, program: &str, args: &[String], cwd: &Path) -> QuarkResult<()> {
        let executable = Self::resolve(program)?;
        let child = Command::new(executable)
            .args(args)
            .current_dir(cwd)
            .spawn()
            .map_err(|e| ApplicationError::CommandFailed {
                command: program.to_string(),
                reason: e.to_string(),
            })?;
        debug!(pid = child.id(), "Process started");
        Ok(())
    }
}
