//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `quark-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateStore`, `TemplateRenderer`: Template lookup and rendering
//!   - `Prompter`: Interactive questions
//!   - `PackageRegistry`: Package existence checks
//!   - `AnswerCache`: Stored answers
//!   - `CommandRunner`: Package manager, git and editor processes

pub mod output;

pub use output::{
    AnswerCache, CommandRunner, Filesystem, PackageRegistry, Prompter, TemplateRenderer,
    TemplateStore,
};
