use crate::domain::{
    entities::{AnswerSet, Package, ProjectStructure, Question, question::check_name_characters},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    /// Every active question has an answer of the shape its prompt produces.
    pub fn validate_answers(
        questions: &[Question],
        answers: &AnswerSet,
        ctx: &crate::domain::FlowContext,
    ) -> Result<(), DomainError> {
        for question in questions {
            if !question.is_active(answers, ctx) {
                continue;
            }
            match answers.get(question.id) {
                None => {
                    return Err(DomainError::MissingAnswer {
                        question: question.id.as_str(),
                    });
                }
                Some(value) if !question.accepts(value) => {
                    return Err(DomainError::InvalidAnswer {
                        question: question.id.as_str(),
                        reason: format!("'{value}' does not fit the question"),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    pub fn validate_package(package: &Package) -> Result<(), DomainError> {
        if package.name.trim().is_empty() {
            return Err(DomainError::InvalidAnswer {
                question: "name",
                reason: "package name is empty".into(),
            });
        }
        check_name_characters(&package.name).map_err(|reason| DomainError::InvalidAnswer {
            question: "name",
            reason,
        })
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }
}
