//! Question Flow - walks the catalogue and collects answers.
//!
//! Questions are asked strictly one at a time, in catalogue order. Each
//! question sees the answers collected before it, so activation predicates
//! can depend on earlier answers. An answer that fails validation is
//! reported through the prompter and the same question is asked again.

use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::{PackageRegistry, Prompter},
    domain::{
        AnswerSet, AnswerValue, Choice, DomainValidator, FlowContext, PromptKind, Question,
        Validation, split_list,
    },
    error::QuarkResult,
};

/// Interactive question engine.
pub struct QuestionFlow {
    prompter: Box<dyn Prompter>,
    registry: Box<dyn PackageRegistry>,
}

impl QuestionFlow {
    pub fn new(prompter: Box<dyn Prompter>, registry: Box<dyn PackageRegistry>) -> Self {
        Self { prompter, registry }
    }

    /// Ask every active question and return the completed answer set.
    #[instrument(skip_all, fields(questions = questions.len()))]
    pub fn run(&mut self, questions: &[Question], ctx: &FlowContext) -> QuarkResult<AnswerSet> {
        let mut answers = AnswerSet::new();

        for question in questions {
            if !question.is_active(&answers, ctx) {
                debug!(question = %question.id, "Skipped inactive question");
                continue;
            }
            let value = self.ask(question, ctx)?;
            debug!(question = %question.id, answer = %value, "Answer accepted");
            answers.insert(question.id, value);
        }

        DomainValidator::validate_answers(questions, &answers, ctx)?;
        info!(answers = answers.len(), "Question flow completed");
        Ok(answers)
    }

    /// Ask one question until it yields a valid answer.
    fn ask(&mut self, question: &Question, ctx: &FlowContext) -> QuarkResult<AnswerValue> {
        let default = question.default_value(ctx);

        loop {
            let value = match &question.kind {
                PromptKind::Input => {
                    let text = default.as_ref().and_then(|d| d.as_text()).map(str::to_string);
                    let answer = self.prompter.input(question.message, text)?;
                    AnswerValue::Text(answer.trim().to_string())
                }
                PromptKind::Confirm => {
                    let flag = default.as_ref().and_then(AnswerValue::as_bool).unwrap_or(false);
                    AnswerValue::Bool(self.prompter.confirm(question.message, flag)?)
                }
                PromptKind::Select(choices) => {
                    let index = default_index(choices, default.as_ref());
                    let picked = self.prompter.select(question.message, choices, index)?;
                    match choices.get(picked) {
                        Some(choice) => AnswerValue::Text(choice.value.clone()),
                        None => {
                            self.prompter.report_invalid("Please pick one of the listed options");
                            continue;
                        }
                    }
                }
                PromptKind::MultiSelect(choices) => {
                    let checked = checked_flags(choices, default.as_ref());
                    let mut picked = self.prompter.multi_select(question.message, choices, &checked)?;
                    picked.sort_unstable();
                    picked.dedup();
                    AnswerValue::List(
                        picked
                            .into_iter()
                            .filter_map(|i| choices.get(i))
                            .map(|c| c.value.clone())
                            .collect(),
                    )
                }
            };

            match self.validate(question, &value, ctx) {
                Ok(()) => return Ok(value),
                Err(reason) => {
                    debug!(question = %question.id, %reason, "Answer rejected");
                    self.prompter.report_invalid(&reason);
                }
            }
        }
    }

    fn validate(
        &self,
        question: &Question,
        value: &AnswerValue,
        ctx: &FlowContext,
    ) -> Result<(), String> {
        let Some(text) = value.as_text() else {
            return Ok(());
        };

        match question.validation {
            Validation::None => Ok(()),
            Validation::Local(check) => check(text, ctx),
            Validation::Registry(check) => {
                check(text, ctx)?;
                for name in split_list(text) {
                    self.check_registry(&name)?;
                }
                Ok(())
            }
        }
    }

    fn check_registry(&self, name: &str) -> Result<(), String> {
        match self.registry.package_exists(name) {
            Ok(true) => Ok(()),
            Ok(false) => Err(not_found(name)),
            Err(e) => {
                warn!(package = name, error = %e, "Registry lookup failed");
                Err(not_found(name))
            }
        }
    }
}

fn not_found(name: &str) -> String {
    format!("The package '{name}' could not be found")
}

fn default_index(choices: &[Choice], default: Option<&AnswerValue>) -> usize {
    default
        .and_then(AnswerValue::as_text)
        .and_then(|d| choices.iter().position(|c| c.value == d))
        .unwrap_or(0)
}

fn checked_flags(choices: &[Choice], default: Option<&AnswerValue>) -> Vec<bool> {
    let selected = default.and_then(AnswerValue::as_list).unwrap_or_default();
    choices
        .iter()
        .map(|c| selected.iter().any(|s| s == &c.value))
        .collect()
}

/// The subset of `answers` worth keeping as next run's defaults.
pub fn stored_answers(questions: &[Question], answers: &AnswerSet) -> AnswerSet {
    let mut stored = answers.clone();
    stored.retain(|id| questions.iter().any(|q| q.id == id && q.store));
    stored
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::application::{ApplicationError, ports::output::MockPackageRegistry};
    use crate::domain::{QuestionId, catalogue};
    use crate::error::QuarkError;

    /// One scripted reply per prompt, in order.
    #[derive(Debug, Clone)]
    enum Reply {
        Text(&'static str),
        /// Accept whatever default is offered.
        Default,
        Yes,
        No,
        Pick(usize),
        Check(Vec<usize>),
        /// Press Esc.
        Cancel,
    }

    #[derive(Default)]
    struct Log {
        asked: Vec<String>,
        rejected: Vec<String>,
        input_defaults: Vec<Option<String>>,
    }

    struct ScriptedPrompter {
        replies: VecDeque<Reply>,
        log: Arc<Mutex<Log>>,
    }

    impl ScriptedPrompter {
        fn new(replies: Vec<Reply>) -> (Self, Arc<Mutex<Log>>) {
            let log = Arc::new(Mutex::new(Log::default()));
            let prompter = Self {
                replies: replies.into(),
                log: Arc::clone(&log),
            };
            (prompter, log)
        }

        fn next(&mut self, message: &str) -> QuarkResult<Reply> {
            self.log.lock().unwrap().asked.push(message.to_string());
            match self.replies.pop_front() {
                Some(Reply::Cancel) => Err(ApplicationError::Cancelled.into()),
                Some(reply) => Ok(reply),
                None => Err(ApplicationError::Prompt {
                    reason: "script exhausted".into(),
                }
                .into()),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn input(&mut self, message: &str, default: Option<String>) -> QuarkResult<String> {
            self.log.lock().unwrap().input_defaults.push(default.clone());
            match self.next(message)? {
                Reply::Text(t) => Ok(t.to_string()),
                _ => Ok(default.unwrap_or_default()),
            }
        }

        fn confirm(&mut self, message: &str, default: bool) -> QuarkResult<bool> {
            Ok(match self.next(message)? {
                Reply::Yes => true,
                Reply::No => false,
                _ => default,
            })
        }

        fn select(&mut self, message: &str, _: &[Choice], default: usize) -> QuarkResult<usize> {
            Ok(match self.next(message)? {
                Reply::Pick(i) => i,
                _ => default,
            })
        }

        fn multi_select(
            &mut self,
            message: &str,
            _: &[Choice],
            checked: &[bool],
        ) -> QuarkResult<Vec<usize>> {
            Ok(match self.next(message)? {
                Reply::Check(indices) => indices,
                _ => (0..checked.len()).filter(|&i| checked[i]).collect(),
            })
        }

        fn report_invalid(&mut self, reason: &str) {
            self.log.lock().unwrap().rejected.push(reason.to_string());
        }
    }

    fn registry_with(known: &'static [&'static str]) -> Box<MockPackageRegistry> {
        let mut registry = MockPackageRegistry::new();
        registry
            .expect_package_exists()
            .returning(move |name| Ok(known.contains(&name)));
        Box::new(registry)
    }

    fn ctx() -> FlowContext {
        FlowContext {
            app_name: "My Package".into(),
            git_user: Some("octocat".into()),
            ..FlowContext::default()
        }
    }

    /// Replies for a run that accepts every default and sets a description.
    fn default_run() -> Vec<Reply> {
        vec![
            Reply::Default,           // name
            Reply::Text("Lints"),     // description
            Reply::Default,           // author
            Reply::Default,           // license
            Reply::Check(vec![1, 4]), // features: keymaps, styles
            Reply::Default,           // activationCmd
            Reply::Default,           // atomDependenciesQuestion
            Reply::Default,           // buildScript
            Reply::Default,           // linterHook
            Reply::Default,           // addConfig
            Reply::Default,           // initGit
        ]
    }

    #[test]
    fn collects_defaults_and_skips_inactive_questions() {
        let (prompter, log) = ScriptedPrompter::new(default_run());
        let mut flow = QuestionFlow::new(Box::new(prompter), registry_with(&[]));

        let answers = flow.run(&catalogue(), &ctx()).unwrap();

        assert_eq!(answers.text(QuestionId::Name), Some("my-package"));
        assert_eq!(answers.text(QuestionId::Author), Some("octocat"));
        assert_eq!(answers.text(QuestionId::License), Some("MIT"));
        assert_eq!(
            answers.list(QuestionId::Features),
            Some(&["keymaps".to_string(), "styles".to_string()][..])
        );
        assert!(answers.flag(QuestionId::InitGit));
        assert!(!answers.contains(QuestionId::AtomDependencies));
        assert!(!answers.contains(QuestionId::OpenInEditor));
        assert_eq!(log.lock().unwrap().asked.len(), 11);
    }

    #[test]
    fn cancelling_stops_the_flow() {
        let (prompter, log) = ScriptedPrompter::new(vec![Reply::Default, Reply::Cancel, Reply::Default]);
        let mut flow = QuestionFlow::new(Box::new(prompter), registry_with(&[]));

        let err = flow.run(&catalogue(), &ctx()).unwrap_err();

        assert!(matches!(
            err,
            QuarkError::Application(ApplicationError::Cancelled)
        ));
        assert_eq!(log.lock().unwrap().asked.len(), 2);
    }

    #[test]
    fn invalid_name_is_asked_again() {
        let mut replies = default_run();
        replies[0] = Reply::Text("atom-linter");
        replies.insert(1, Reply::Text("linter"));
        let (prompter, log) = ScriptedPrompter::new(replies);
        let mut flow = QuestionFlow::new(Box::new(prompter), registry_with(&[]));

        let answers = flow.run(&catalogue(), &ctx()).unwrap();

        assert_eq!(answers.text(QuestionId::Name), Some("linter"));
        let log = log.lock().unwrap();
        assert_eq!(
            log.rejected,
            vec!["Your package name shouldn't be prefixed with \"atom-\"".to_string()]
        );
        assert_eq!(log.asked[0], log.asked[1]);
    }

    #[test]
    fn atom_prefix_accepted_when_allowed() {
        let mut replies = default_run();
        replies[0] = Reply::Text("atom-linter");
        let (prompter, log) = ScriptedPrompter::new(replies);
        let mut flow = QuestionFlow::new(Box::new(prompter), registry_with(&[]));
        let ctx = FlowContext {
            allow_atom_prefix: true,
            ..ctx()
        };

        let answers = flow.run(&catalogue(), &ctx).unwrap();

        assert_eq!(answers.text(QuestionId::Name), Some("atom-linter"));
        assert!(log.lock().unwrap().rejected.is_empty());
    }

    #[test]
    fn unknown_dependency_reports_the_failing_package() {
        let mut replies = default_run();
        replies[6] = Reply::Yes;
        replies.insert(7, Reply::Text("linter, nope"));
        replies.insert(8, Reply::Text("linter, busy-signal"));
        let (prompter, log) = ScriptedPrompter::new(replies);
        let mut flow = QuestionFlow::new(Box::new(prompter), registry_with(&["linter", "busy-signal"]));

        let answers = flow.run(&catalogue(), &ctx()).unwrap();

        assert_eq!(
            answers.text(QuestionId::AtomDependencies),
            Some("linter, busy-signal")
        );
        assert_eq!(
            log.lock().unwrap().rejected,
            vec!["The package 'nope' could not be found".to_string()]
        );
    }

    #[test]
    fn registry_errors_read_as_not_found() {
        let mut registry = MockPackageRegistry::new();
        let mut calls = 0;
        registry.expect_package_exists().returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(ApplicationError::Registry {
                    reason: "timed out".into(),
                }
                .into())
            } else {
                Ok(true)
            }
        });

        let mut replies = default_run();
        replies[6] = Reply::Yes;
        replies.insert(7, Reply::Text("linter"));
        replies.insert(8, Reply::Text("linter"));
        let (prompter, log) = ScriptedPrompter::new(replies);
        let mut flow = QuestionFlow::new(Box::new(prompter), Box::new(registry));

        flow.run(&catalogue(), &ctx()).unwrap();

        assert_eq!(
            log.lock().unwrap().rejected,
            vec!["The package 'linter' could not be found".to_string()]
        );
    }

    #[test]
    fn blank_dependency_list_never_reaches_registry() {
        let mut registry = MockPackageRegistry::new();
        registry.expect_package_exists().times(1).returning(|_| Ok(true));

        let mut replies = default_run();
        replies[6] = Reply::Yes;
        replies.insert(7, Reply::Text(" , "));
        replies.insert(8, Reply::Text("linter"));
        let (prompter, log) = ScriptedPrompter::new(replies);
        let mut flow = QuestionFlow::new(Box::new(prompter), Box::new(registry));

        flow.run(&catalogue(), &ctx()).unwrap();

        assert_eq!(
            log.lock().unwrap().rejected,
            vec!["You need to specify at least one package".to_string()]
        );
    }

    #[test]
    fn editor_question_asked_when_editor_configured() {
        let mut replies = default_run();
        replies.push(Reply::No);
        let (prompter, _) = ScriptedPrompter::new(replies);
        let mut flow = QuestionFlow::new(Box::new(prompter), registry_with(&[]));
        let ctx = FlowContext {
            editor: Some("vim".into()),
            ..ctx()
        };

        let answers = flow.run(&catalogue(), &ctx).unwrap();

        assert_eq!(answers.get(QuestionId::OpenInEditor), Some(&AnswerValue::Bool(false)));
    }

    #[test]
    fn previous_answers_become_defaults() {
        let (prompter, log) = ScriptedPrompter::new(default_run());
        let mut flow = QuestionFlow::new(Box::new(prompter), registry_with(&[]));
        let ctx = FlowContext {
            previous: AnswerSet::new()
                .with(QuestionId::Author, AnswerValue::Text("hubot".into()))
                .with(QuestionId::License, AnswerValue::Text("ISC".into())),
            ..ctx()
        };

        let answers = flow.run(&catalogue(), &ctx).unwrap();

        assert_eq!(answers.text(QuestionId::Author), Some("hubot"));
        assert_eq!(answers.text(QuestionId::License), Some("ISC"));
        assert_eq!(
            log.lock().unwrap().input_defaults[2].as_deref(),
            Some("hubot")
        );
    }

    #[test]
    fn out_of_range_selection_is_asked_again() {
        let mut replies = default_run();
        replies[3] = Reply::Pick(99);
        replies.insert(4, Reply::Pick(4));
        let (prompter, log) = ScriptedPrompter::new(replies);
        let mut flow = QuestionFlow::new(Box::new(prompter), registry_with(&[]));

        let answers = flow.run(&catalogue(), &ctx()).unwrap();

        assert_eq!(answers.text(QuestionId::License), Some("ISC"));
        assert_eq!(log.lock().unwrap().rejected.len(), 1);
    }

    #[test]
    fn prompt_failure_aborts_the_flow() {
        let (prompter, _) = ScriptedPrompter::new(vec![Reply::Default]);
        let mut flow = QuestionFlow::new(Box::new(prompter), registry_with(&[]));

        assert!(flow.run(&catalogue(), &ctx()).is_err());
    }

    #[test]
    fn only_stored_questions_are_kept() {
        let answers = AnswerSet::new()
            .with(QuestionId::Name, AnswerValue::Text("linter".into()))
            .with(QuestionId::ActivationCmd, AnswerValue::Bool(true))
            .with(QuestionId::InitGit, AnswerValue::Bool(true))
            .with(QuestionId::OpenInEditor, AnswerValue::Bool(true));

        let stored = stored_answers(&catalogue(), &answers);

        assert!(stored.contains(QuestionId::Name));
        assert!(stored.contains(QuestionId::OpenInEditor));
        assert!(!stored.contains(QuestionId::ActivationCmd));
        assert!(!stored.contains(QuestionId::InitGit));
    }
}
