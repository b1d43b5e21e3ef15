//! Application layer for Quark.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (QuestionFlow, MaterializeService, ActionRunner)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    ActionRunner, DEFAULT_INSTALL_CLIENT, MaterializeService, QuestionFlow, stored_answers,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    AnswerCache, CommandRunner, Filesystem, PackageRegistry, Prompter, TemplateRenderer,
    TemplateStore,
};

pub use error::ApplicationError;
