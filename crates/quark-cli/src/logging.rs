//! Tracing subscriber setup.
//!
//! Only the binary installs a subscriber. `quark-core` and `quark-adapters`
//! only emit spans and events.
//!
//! | Flag(s)   | Level |
//! |-----------|-------|
//! | (none)    | WARN  |
//! | `-v`      | INFO  |
//! | `-vv`     | DEBUG |
//! | `-vvv`    | TRACE |
//! | `--quiet` | ERROR |
//!
//! A set `RUST_LOG` replaces the table entirely.

use std::io::IsTerminal as _;

use anyhow::Context as _;
use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::GlobalArgs;

/// Crates whose events pass the verbosity filter; dependencies stay at WARN.
const OWN_TARGETS: [&str; 3] = ["quark", "quark_core", "quark_adapters"];

/// Install the global subscriber, logging to stderr.
///
/// Fails if a subscriber is already installed in this process.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(level_for(args))));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_target(args.verbose >= 2)
        .without_time();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialise tracing")
}

fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn directives(level: LevelFilter) -> String {
    let mut parts = vec!["warn".to_string()];
    let level = level.to_string().to_lowercase();
    parts.extend(OWN_TARGETS.iter().map(|t| format!("{t}={level}")));
    parts.join(",")
}
