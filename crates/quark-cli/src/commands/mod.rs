//! One module per subcommand; each exposes `execute`.

pub mod completions;
pub mod config;
pub mod init;
pub mod licenses;
pub mod new;
