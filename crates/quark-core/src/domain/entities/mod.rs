pub mod answers;
pub mod install_plan;
pub mod package;
pub mod project_structure;
pub mod question;

pub use answers::{AnswerSet, AnswerValue, QuestionId};
pub use install_plan::InstallPlan;
pub use package::{Package, ScriptEntry};
pub use project_structure::{DirectoryToCreate, FileToWrite, FsEntry, ProjectStructure};
pub use question::{Choice, FlowContext, PromptKind, Question, Validation};
