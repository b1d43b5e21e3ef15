// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Quark.
//!
//! This module contains the pure decision logic of the generator: which
//! questions exist and when they are asked, how answers are validated, and
//! how the answer set is turned into a package description, an install plan
//! and a file plan. All I/O (prompting, registry lookups, rendering, writing
//! files, running processes) is handled via ports defined in the application
//! layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Few external crates**: std, thiserror, serde and regex
//! - **Immutable results**: derived records are Clone + PartialEq
pub mod entities;
pub mod error;
pub mod license;
pub mod naming;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use entities::{
    AnswerSet, AnswerValue, Choice, DirectoryToCreate, FileToWrite, FlowContext, FsEntry,
    InstallPlan, Package, ProjectStructure, PromptKind, Question, QuestionId, ScriptEntry,
    Validation,
    question::{MAX_NAME_LENGTH, catalogue, split_list},
};

pub use error::{DomainError, ErrorCategory};
pub use license::{License, LicenseInfo};
pub use value_objects::{BuildScript, CiProvider, Feature, LinterHook};

pub use validation::DomainValidator;
