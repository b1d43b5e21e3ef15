//! The derived package description.
//!
//! [`Package::derive`] is the answer post-processor: a pure function from a
//! completed [`AnswerSet`] to a frozen, typed record extended with every
//! derived field the templates need. It is serialized as-is into the
//! template context under `pkg`.

use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::domain::{
    entities::{
        answers::{AnswerSet, QuestionId},
        question::split_list,
    },
    error::DomainError,
    license::{License, LicenseInfo},
    naming::{repository_name, to_pascal_case},
    value_objects::{BuildScript, CiProvider, Feature, LinterHook},
};

/// One `"hook": "command"` line of the manifest's `scripts` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptEntry {
    pub hook: String,
    pub command: String,
}

impl ScriptEntry {
    fn new(hook: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            hook: hook.into(),
            command: command.into(),
        }
    }

    /// JSON member form, e.g. `"prepublishOnly": "npm run build"`.
    pub fn to_json_member(&self) -> String {
        format!("\"{}\": \"{}\"", self.hook, self.command)
    }
}

/// Build and lint script entries for the chosen hooks.
///
/// When both land on the same hook a single combined entry is produced,
/// linting first, instead of two entries with a duplicate key.
pub fn scripts_for(build: BuildScript, lint: LinterHook) -> Vec<ScriptEntry> {
    if build.as_str() == lint.as_str() {
        vec![ScriptEntry::new(
            build.as_str(),
            "npm run lint && npm run build",
        )]
    } else {
        vec![
            ScriptEntry::new(build.as_str(), "npm run build"),
            ScriptEntry::new(lint.as_str(), "npm run lint"),
        ]
    }
}

/// Primary answers plus derived fields for one generator run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    pub name: String,
    pub description: String,
    pub author: Option<String>,
    pub license: LicenseInfo,
    /// Repository name, always carrying the `atom-` prefix.
    pub repository_name: String,
    /// PascalCase name of the main module.
    pub class_name: String,
    /// Activation command registered by the source stub, `None` when the
    /// user opted out.
    pub activation_command: Option<String>,
    pub features: Vec<Feature>,
    /// Present only when the user chose to depend on other Atom packages.
    pub atom_dependencies: Option<Vec<String>>,
    pub build_script: BuildScript,
    pub linter_hook: LinterHook,
    pub scripts: Vec<ScriptEntry>,
    pub ci: Vec<CiProvider>,
    pub init_git: bool,
    pub open_in_editor: bool,
}

impl Package {
    /// Derive the package from a completed answer set.
    pub fn derive(answers: &AnswerSet) -> Result<Self, DomainError> {
        let name = answers.require_text(QuestionId::Name)?.to_string();
        let description = answers
            .text(QuestionId::Description)
            .unwrap_or_default()
            .to_string();
        let author = answers
            .text(QuestionId::Author)
            .filter(|a| !a.is_empty())
            .map(str::to_string);

        let license = License::find(answers.require_text(QuestionId::License)?)?.info();

        let features = parse_all::<Feature>(answers.list_or_empty(QuestionId::Features)?)?;
        let ci = parse_all::<CiProvider>(answers.list_or_empty(QuestionId::AddConfig)?)?;

        let build_script = match answers.text(QuestionId::BuildScript) {
            Some(s) => BuildScript::from_str(s)?,
            None => BuildScript::default(),
        };
        let linter_hook = match answers.text(QuestionId::LinterHook) {
            Some(s) => LinterHook::from_str(s)?,
            None => LinterHook::default(),
        };

        let atom_dependencies = if answers.flag(QuestionId::AtomDependenciesQuestion) {
            answers
                .text(QuestionId::AtomDependencies)
                .map(split_list)
                .filter(|deps| !deps.is_empty())
        } else {
            None
        };

        let activation_command = answers
            .flag(QuestionId::ActivationCmd)
            .then(|| format!("{name}:toggle"));

        let package = Self {
            repository_name: repository_name(&name),
            class_name: to_pascal_case(&name),
            scripts: scripts_for(build_script, linter_hook),
            name,
            description,
            author,
            license,
            activation_command,
            features,
            atom_dependencies,
            build_script,
            linter_hook,
            ci,
            init_git: answers.flag(QuestionId::InitGit),
            open_in_editor: answers.flag(QuestionId::OpenInEditor),
        };

        debug!(
            name = %package.name,
            repository = %package.repository_name,
            license = %package.license.id,
            features = package.features.len(),
            "Package derived"
        );

        Ok(package)
    }

    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    pub fn has_ci(&self, provider: CiProvider) -> bool {
        self.ci.contains(&provider)
    }

    pub fn has_atom_dependencies(&self) -> bool {
        self.atom_dependencies
            .as_ref()
            .is_some_and(|deps| !deps.is_empty())
    }
}

fn parse_all<T>(values: &[String]) -> Result<Vec<T>, DomainError>
where
    T: FromStr<Err = DomainError>,
{
    values.iter().map(|v| T::from_str(v)).collect()
}
