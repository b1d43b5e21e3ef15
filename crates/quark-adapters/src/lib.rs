//! Infrastructure adapters for Quark.
//!
//! This crate implements the ports defined in `quark-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod answer_cache;
pub mod builtin_templates;
pub mod filesystem;
pub mod process;
pub mod registry;
pub mod renderer;
pub mod template_loader;
pub mod template_store;

// Re-export commonly used adapters
pub use answer_cache::JsonAnswerCache;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::SystemCommandRunner;
pub use registry::AtomRegistry;
pub use renderer::TeraRenderer;
pub use template_loader::FilesystemTemplateLoader;
pub use template_store::InMemoryStore;
