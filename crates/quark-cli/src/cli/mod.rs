//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "quark",
    bin_name = "quark",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{269b} Scaffold Atom packages written in TypeScript",
    long_about = "Quark asks a few questions about your new Atom package, writes \
                  the manifest, license, lint and CI configuration and source stubs, \
                  then installs dependencies, initializes git and opens your editor.",
    after_help = "EXAMPLES:\n\
        \x20 quark new my-package\n\
        \x20 quark new --allow-atom-prefix atom-tools\n\
        \x20 quark licenses\n\
        \x20 quark completions bash > /usr/share/bash-completion/completions/quark",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new Atom package.
    #[command(
        visible_alias = "n",
        about = "Generate a new Atom package",
        after_help = "EXAMPLES:\n\
            \x20 quark new                     # in the current directory\n\
            \x20 quark new my-package          # creates ./my-package\n\
            \x20 quark new my-package --skip-install --editor code"
    )]
    New(NewArgs),

    /// List supported licenses.
    #[command(
        visible_alias = "ls",
        about = "List supported licenses",
        after_help = "EXAMPLES:\n\
            \x20 quark licenses\n\
            \x20 quark ls --ids"
    )]
    Licenses(LicensesArgs),

    /// Initialise a Quark configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 quark init           # default location\n\
            \x20 quark init --force   # overwrite an existing file\n\
            \x20 quark -c ./quark.toml init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 quark completions bash > ~/.local/share/bash-completion/completions/quark\n\
            \x20 quark completions zsh  > ~/.zfunc/_quark\n\
            \x20 quark completions fish > ~/.config/fish/completions/quark.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Quark configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 quark config get install.client\n\
            \x20 quark config list\n\
            \x20 quark config clear-cache"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `quark new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Directory to generate into; created when missing.  Its name is the
    /// default package name.
    #[arg(
        value_name = "DIR",
        default_value = ".",
        help = "Destination directory"
    )]
    pub dir: PathBuf,

    /// Accept package names starting with `atom-`.
    #[arg(long = "allow-atom-prefix", help = "Allow the \"atom-\" name prefix")]
    pub allow_atom_prefix: bool,

    /// Accept an empty package description.
    #[arg(
        long = "allow-empty-description",
        help = "Allow an empty package description"
    )]
    pub allow_empty_description: bool,

    /// Keep the terminal contents instead of clearing before the first question.
    #[arg(long = "no-clear", help = "Do not clear the console before prompting")]
    pub no_clear: bool,

    /// Print the collected answers as JSON before generating.
    #[arg(long = "debug", help = "Echo collected answers as JSON")]
    pub debug: bool,

    /// Write files only; do not run the package manager.
    #[arg(long = "skip-install", help = "Skip dependency installation")]
    pub skip_install: bool,

    /// Editor command used to open the package when done.
    #[arg(
        long = "editor",
        value_name = "CMD",
        env = "EDITOR",
        help = "Editor used to open the generated package"
    )]
    pub editor: Option<String>,
}

// ── licenses ──────────────────────────────────────────────────────────────────

/// Arguments for `quark licenses`.
#[derive(Debug, Args)]
pub struct LicensesArgs {
    /// Print identifiers only, one per line.
    #[arg(long = "ids", help = "Print license identifiers only")]
    pub ids: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `quark init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `quark completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `quark config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `registry.url`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
    /// Forget the answers stored by the previous run.
    ClearCache,
}

// ── tests ─────────────────────────────────────────────────────────────────────
