use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Name of a question in the catalogue.
///
/// The wire name (`as_str`) keys both the answer set and the answer cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QuestionId {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "description")]
    Description,
    #[serde(rename = "author")]
    Author,
    #[serde(rename = "license")]
    License,
    #[serde(rename = "features")]
    Features,
    #[serde(rename = "activationCmd")]
    ActivationCmd,
    #[serde(rename = "atomDependenciesQuestion")]
    AtomDependenciesQuestion,
    #[serde(rename = "atomDependencies")]
    AtomDependencies,
    #[serde(rename = "buildScript")]
    BuildScript,
    #[serde(rename = "linterHook")]
    LinterHook,
    #[serde(rename = "addConfig")]
    AddConfig,
    #[serde(rename = "initGit")]
    InitGit,
    #[serde(rename = "openInEditor")]
    OpenInEditor,
}

impl QuestionId {
    pub const ALL: [QuestionId; 13] = [
        Self::Name,
        Self::Description,
        Self::Author,
        Self::License,
        Self::Features,
        Self::ActivationCmd,
        Self::AtomDependenciesQuestion,
        Self::AtomDependencies,
        Self::BuildScript,
        Self::LinterHook,
        Self::AddConfig,
        Self::InitGit,
        Self::OpenInEditor,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Author => "author",
            Self::License => "license",
            Self::Features => "features",
            Self::ActivationCmd => "activationCmd",
            Self::AtomDependenciesQuestion => "atomDependenciesQuestion",
            Self::AtomDependencies => "atomDependencies",
            Self::BuildScript => "buildScript",
            Self::LinterHook => "linterHook",
            Self::AddConfig => "addConfig",
            Self::InitGit => "initGit",
            Self::OpenInEditor => "openInEditor",
        }
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|q| q.as_str() == s)
            .ok_or_else(|| DomainError::InvalidAnswer {
                question: "unknown",
                reason: format!("no question named '{s}'"),
            })
    }
}

/// A single answer as the user gave it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Text(String),
    List(Vec<String>),
}

impl AnswerValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
            Self::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

/// Answers collected during one generator run, keyed by question.
///
/// Built incrementally by the question flow; activation predicates read it
/// through the typed accessors, which treat a missing answer as "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: BTreeMap<QuestionId, AnswerValue>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: QuestionId, value: AnswerValue) {
        self.answers.insert(id, value);
    }

    pub fn with(mut self, id: QuestionId, value: AnswerValue) -> Self {
        self.insert(id, value);
        self
    }

    pub fn get(&self, id: QuestionId) -> Option<&AnswerValue> {
        self.answers.get(&id)
    }

    pub fn contains(&self, id: QuestionId) -> bool {
        self.answers.contains_key(&id)
    }

    /// Boolean answer, `false` when the question was skipped.
    pub fn flag(&self, id: QuestionId) -> bool {
        self.get(id).and_then(AnswerValue::as_bool).unwrap_or(false)
    }

    pub fn text(&self, id: QuestionId) -> Option<&str> {
        self.get(id).and_then(AnswerValue::as_text)
    }

    pub fn list(&self, id: QuestionId) -> Option<&[String]> {
        self.get(id).and_then(AnswerValue::as_list)
    }

    /// Text answer that must be present.
    pub fn require_text(&self, id: QuestionId) -> Result<&str, DomainError> {
        match self.get(id) {
            None => Err(DomainError::MissingAnswer {
                question: id.as_str(),
            }),
            Some(v) => v.as_text().ok_or(DomainError::AnswerType {
                question: id.as_str(),
                expected: "text",
            }),
        }
    }

    /// List answer, empty when the question was skipped.
    pub fn list_or_empty(&self, id: QuestionId) -> Result<&[String], DomainError> {
        match self.get(id) {
            None => Ok(&[]),
            Some(v) => v.as_list().ok_or(DomainError::AnswerType {
                question: id.as_str(),
                expected: "list",
            }),
        }
    }

    /// Keep only the answers whose question satisfies `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(QuestionId) -> bool) {
        self.answers.retain(|id, _| keep(*id));
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, &AnswerValue)> {
        self.answers.iter().map(|(id, v)| (*id, v))
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_ids_round_trip() {
        for id in QuestionId::ALL {
            assert_eq!(QuestionId::from_str(id.as_str()).unwrap(), id);
        }
    }

    #[test]
    fn flag_defaults_to_false_when_skipped() {
        let answers = AnswerSet::new();
        assert!(!answers.flag(QuestionId::AtomDependenciesQuestion));
    }

    #[test]
    fn require_text_reports_missing_and_mistyped() {
        let answers = AnswerSet::new().with(QuestionId::Name, AnswerValue::Bool(true));
        assert!(matches!(
            answers.require_text(QuestionId::Name),
            Err(DomainError::AnswerType { .. })
        ));
        assert!(matches!(
            answers.require_text(QuestionId::Description),
            Err(DomainError::MissingAnswer { .. })
        ));
    }

    #[test]
    fn serializes_as_object_keyed_by_wire_name() {
        let answers = AnswerSet::new()
            .with(QuestionId::Name, AnswerValue::Text("linter".into()))
            .with(QuestionId::InitGit, AnswerValue::Bool(false))
            .with(
                QuestionId::Features,
                AnswerValue::List(vec!["keymaps".into()]),
            );

        let json = serde_json::to_value(&answers).unwrap();
        assert_eq!(json["name"], "linter");
        assert_eq!(json["initGit"], false);
        assert_eq!(json["features"][0], "keymaps");

        let back: AnswerSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, answers);
    }
}
