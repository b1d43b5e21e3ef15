//! [`Filesystem`](quark_core::application::Filesystem) implementations: the
//! real disk for generator runs, memory for tests and previews.

mod local;
mod memory;

pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;
