//! Implementation of the `quark config` subcommands.

use quark_adapters::JsonAnswerCache;
use quark_core::application::AnswerCache;

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = config
                .lookup(&key)
                .ok_or(CliError::UnknownConfigKey { key })?;
            output.data(&value)?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.data(serialised.trim_end())?;
        }

        ConfigCommands::Path => {
            output.data(
                &AppConfig::active_path(global.config.as_ref())
                    .display()
                    .to_string(),
            )?;
        }

        ConfigCommands::ClearCache => {
            let cache = JsonAnswerCache::in_dir(config.cache_dir());
            cache.clear()?;
            output.success(&format!(
                "Cleared stored answers ({})",
                cache.path().display()
            ))?;
        }
    }

    Ok(())
}
