//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the three
//! phases of a generator run: asking, writing and the external actions.

pub mod action_runner;
pub mod materialize_service;
pub mod question_flow;

pub use action_runner::{ActionRunner, DEFAULT_INSTALL_CLIENT};
pub use materialize_service::MaterializeService;
pub use question_flow::{QuestionFlow, stored_answers};
