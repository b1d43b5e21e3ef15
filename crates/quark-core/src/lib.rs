//! Quark Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Quark
//! Atom package generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            quark-cli (CLI)              │
//! │   (Prompter, config, output, commands)  │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (QuestionFlow, MaterializeService,      │
//! │  ActionRunner)                          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, TemplateStore, Registry,   │
//! │  AnswerCache, CommandRunner, Prompter)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     quark-adapters (Infrastructure)     │
//! │ (InMemoryStore, TeraRenderer, etc)      │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (Question catalogue, Package,           │
//! │  InstallPlan, ProjectStructure)         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quark_core::prelude::*;
//!
//! // 1. Ask the questions
//! let mut flow = QuestionFlow::new(prompter, registry);
//! let answers = flow.run(&catalogue(), &ctx)?;
//!
//! // 2. Derive the package and write the skeleton
//! let package = Package::derive(&answers)?;
//! let service = MaterializeService::new(store, renderer, filesystem);
//! service.materialize(&package, "./my-package")?;
//!
//! // 3. Install, git init, open the editor
//! runner.install(&InstallPlan::for_package(&package), root)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ActionRunner, MaterializeService, QuestionFlow, stored_answers,
        ports::{
            AnswerCache, CommandRunner, Filesystem, PackageRegistry, Prompter, TemplateRenderer,
            TemplateStore,
        },
    };
    pub use crate::domain::{
        AnswerSet, AnswerValue, Choice, FlowContext, InstallPlan, License, LicenseInfo, Package,
        ProjectStructure, PromptKind, Question, QuestionId, catalogue,
    };
    pub use crate::error::{QuarkError, QuarkResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
