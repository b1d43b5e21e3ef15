//! The question catalogue.
//!
//! Each [`Question`] is a declarative descriptor: prompt kind, default,
//! activation predicate and validation. The flow engine in
//! `application::services::question_flow` walks the catalogue in order; all
//! the rules about *what* gets asked live here as plain functions over the
//! answers collected so far and the [`FlowContext`].

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{
    entities::answers::{AnswerSet, AnswerValue, QuestionId},
    license::{DEFAULT_LICENSE, LICENSES},
    naming::{ATOM_PREFIX, slugify},
    value_objects::{BuildScript, CiProvider, Feature, LinterHook},
};

/// npm refuses package names longer than this.
pub const MAX_NAME_LENGTH: usize = 214;

/// Lowercase npm name characters; the first one may not be `.` or `_`.
static NAME_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9~-][a-z0-9._~-]*$").expect("package name pattern is a valid regex")
});

/// Decides whether a question is shown.
pub type Predicate = fn(&AnswerSet, &FlowContext) -> bool;

/// Synchronous check of a text answer; `Err` carries the reason shown inline.
pub type Check = fn(&str, &FlowContext) -> Result<(), String>;

/// Everything outside the answers themselves that shapes the flow.
///
/// Built once by the CLI from flags, environment and cache; read-only for
/// the rest of the run.
#[derive(Debug, Clone, Default)]
pub struct FlowContext {
    /// Destination directory name, the source of the default package name.
    pub app_name: String,
    /// `git config user.name`, if configured.
    pub git_user: Option<String>,
    /// The destination already contains a `.git` directory.
    pub has_git_repo: bool,
    /// Editor command (`$EDITOR`); enables the "open in editor" question.
    pub editor: Option<String>,
    pub allow_atom_prefix: bool,
    pub allow_empty_description: bool,
    /// Answers cached by the previous run; override static defaults.
    pub previous: AnswerSet,
}

/// One option of a select or multi-select prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub value: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// How a question is presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    /// Free text.
    Input,
    /// Yes / no.
    Confirm,
    /// Exactly one of the choices.
    Select(Vec<Choice>),
    /// Any subset of the choices, in choice order.
    MultiSelect(Vec<Choice>),
}

/// How a text answer is validated.
#[derive(Debug, Clone, Copy)]
pub enum Validation {
    None,
    Local(Check),
    /// Local check, then every comma-separated entry must exist in the
    /// package registry.
    Registry(Check),
}

/// A question descriptor.
#[derive(Debug, Clone)]
pub struct Question {
    pub id: QuestionId,
    pub message: &'static str,
    pub kind: PromptKind,
    pub default: fn(&FlowContext) -> Option<AnswerValue>,
    pub when: Predicate,
    pub validation: Validation,
    /// Cache the answer as next run's default.
    pub store: bool,
}

impl Question {
    /// The default offered for this run: the cached answer for stored
    /// questions, else the question's own default.
    pub fn default_value(&self, ctx: &FlowContext) -> Option<AnswerValue> {
        if self.store {
            if let Some(previous) = ctx.previous.get(self.id) {
                if self.accepts(previous) {
                    return Some(previous.clone());
                }
            }
        }
        (self.default)(ctx)
    }

    pub fn is_active(&self, answers: &AnswerSet, ctx: &FlowContext) -> bool {
        (self.when)(answers, ctx)
    }

    /// Whether a value has the right shape for this question's prompt kind.
    ///
    /// Stale cache entries (a choice that no longer exists, a value of the
    /// wrong type) fail this and fall back to the static default.
    pub fn accepts(&self, value: &AnswerValue) -> bool {
        match (&self.kind, value) {
            (PromptKind::Input, AnswerValue::Text(_)) => true,
            (PromptKind::Confirm, AnswerValue::Bool(_)) => true,
            (PromptKind::Select(choices), AnswerValue::Text(v)) => {
                choices.iter().any(|c| &c.value == v)
            }
            (PromptKind::MultiSelect(choices), AnswerValue::List(vs)) => {
                vs.iter().all(|v| choices.iter().any(|c| &c.value == v))
            }
            _ => false,
        }
    }
}

// ── Validators ────────────────────────────────────────────────────────────────

pub fn validate_name(name: &str, ctx: &FlowContext) -> Result<(), String> {
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(format!(
            "The name must be less than or equal to {MAX_NAME_LENGTH} characters"
        ));
    }
    if name.trim().is_empty() {
        return Err("You have to provide a package name".into());
    }
    check_name_characters(name)?;
    if name.starts_with(ATOM_PREFIX) && !ctx.allow_atom_prefix {
        return Err("Your package name shouldn't be prefixed with \"atom-\"".into());
    }
    Ok(())
}

/// The name ends up in file paths and in `package.json`, so it must stay a
/// single lowercase npm name segment.
pub fn check_name_characters(name: &str) -> Result<(), String> {
    if name == "." || name.contains("..") {
        return Err("The name can't contain \"..\"".into());
    }
    if !NAME_CHARS.is_match(name) {
        return Err(
            "The name may only contain lowercase letters, digits, '-', '.', '_' and '~', \
             and can't start with '.' or '_'"
                .into(),
        );
    }
    Ok(())
}

pub fn validate_description(description: &str, ctx: &FlowContext) -> Result<(), String> {
    if description.is_empty() && !ctx.allow_empty_description {
        return Err("Please provide a short description for your package".into());
    }
    Ok(())
}

pub fn validate_author(author: &str, _ctx: &FlowContext) -> Result<(), String> {
    if author.is_empty() {
        return Err("You have to provide a username".into());
    }
    Ok(())
}

pub fn validate_dependency_list(list: &str, _ctx: &FlowContext) -> Result<(), String> {
    if split_list(list).is_empty() {
        return Err("You need to specify at least one package".into());
    }
    Ok(())
}

/// Split a comma-separated answer into trimmed, non-empty entries.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ── Catalogue ─────────────────────────────────────────────────────────────────

fn always(_: &AnswerSet, _: &FlowContext) -> bool {
    true
}

fn no_default(_: &FlowContext) -> Option<AnswerValue> {
    None
}

fn license_choices() -> Vec<Choice> {
    LICENSES
        .iter()
        .map(|l| Choice::new(format!("{} ({})", l.id, l.name), l.id))
        .collect()
}

/// The full, ordered question catalogue.
pub fn catalogue() -> Vec<Question> {
    vec![
        Question {
            id: QuestionId::Name,
            message: "What do you want to name your package?",
            kind: PromptKind::Input,
            default: |ctx| Some(AnswerValue::Text(slugify(&ctx.app_name))),
            when: always,
            validation: Validation::Local(validate_name),
            store: true,
        },
        Question {
            id: QuestionId::Description,
            message: "What is your package description?",
            kind: PromptKind::Input,
            default: |_| Some(AnswerValue::Text(String::new())),
            when: always,
            validation: Validation::Local(validate_description),
            store: true,
        },
        Question {
            id: QuestionId::Author,
            message: "What's your GitHub username?",
            kind: PromptKind::Input,
            default: |ctx| ctx.git_user.clone().map(AnswerValue::Text),
            when: always,
            validation: Validation::Local(validate_author),
            store: true,
        },
        Question {
            id: QuestionId::License,
            message: "Choose a license",
            kind: PromptKind::Select(license_choices()),
            default: |_| Some(AnswerValue::Text(DEFAULT_LICENSE.into())),
            when: always,
            validation: Validation::None,
            store: true,
        },
        Question {
            id: QuestionId::Features,
            message: "Package Features",
            kind: PromptKind::MultiSelect(
                Feature::ALL
                    .iter()
                    .map(|f| Choice::new(f.label(), f.as_str()))
                    .collect(),
            ),
            default: |_| Some(AnswerValue::List(Vec::new())),
            when: always,
            validation: Validation::None,
            store: true,
        },
        Question {
            id: QuestionId::ActivationCmd,
            message: "Add activation command?",
            kind: PromptKind::Confirm,
            default: |_| Some(AnswerValue::Bool(true)),
            when: always,
            validation: Validation::None,
            store: false,
        },
        Question {
            id: QuestionId::AtomDependenciesQuestion,
            message: "Depend on other Atom packages?",
            kind: PromptKind::Confirm,
            default: |_| Some(AnswerValue::Bool(false)),
            when: always,
            validation: Validation::None,
            store: true,
        },
        Question {
            id: QuestionId::AtomDependencies,
            message: "Specify Atom packages (comma-separated)",
            kind: PromptKind::Input,
            default: no_default,
            when: |answers, _| answers.flag(QuestionId::AtomDependenciesQuestion),
            validation: Validation::Registry(validate_dependency_list),
            store: true,
        },
        Question {
            id: QuestionId::BuildScript,
            message: "Build Script",
            kind: PromptKind::Select(
                BuildScript::ALL
                    .iter()
                    .map(|b| Choice::new(b.as_str(), b.as_str()))
                    .collect(),
            ),
            default: |_| Some(AnswerValue::Text(BuildScript::default().as_str().into())),
            when: always,
            validation: Validation::None,
            store: true,
        },
        Question {
            id: QuestionId::LinterHook,
            message: "Linter Hook",
            kind: PromptKind::Select(
                LinterHook::ALL
                    .iter()
                    .map(|h| Choice::new(h.as_str(), h.as_str()))
                    .collect(),
            ),
            default: |_| Some(AnswerValue::Text(LinterHook::default().as_str().into())),
            when: always,
            validation: Validation::None,
            store: true,
        },
        Question {
            id: QuestionId::AddConfig,
            message: "Add configuration",
            kind: PromptKind::MultiSelect(
                CiProvider::ALL
                    .iter()
                    .map(|c| Choice::new(c.label(), c.as_str()))
                    .collect(),
            ),
            default: |_| Some(AnswerValue::List(Vec::new())),
            when: always,
            validation: Validation::None,
            store: true,
        },
        Question {
            id: QuestionId::InitGit,
            message: "Initialize Git repository?",
            kind: PromptKind::Confirm,
            default: |ctx| Some(AnswerValue::Bool(!ctx.has_git_repo)),
            when: always,
            validation: Validation::None,
            store: false,
        },
        Question {
            id: QuestionId::OpenInEditor,
            message: "Open in default editor?",
            kind: PromptKind::Confirm,
            default: |_| Some(AnswerValue::Bool(true)),
            when: |_, ctx| ctx.editor.is_some(),
            validation: Validation::None,
            store: true,
        },
    ]
}
