//! Tera-backed renderer.
//!
//! Templates are registered one at a time from their source text, so the
//! renderer works the same for built-in and locally overridden templates.
//! Autoescaping is off: the output is JSON, TypeScript, Markdown and Less,
//! never HTML.

use quark_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::Package,
    error::QuarkResult,
};
use tera::{Context, Tera};
use tracing::{instrument, trace};

/// Renders template sources with the package as `pkg`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TeraRenderer;

impl TeraRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for TeraRenderer {
    #[instrument(skip(self, source, package), fields(package = %package.name))]
    fn render(&self, name: &str, source: &str, package: &Package) -> QuarkResult<String> {
        let failed = |e: tera::Error| ApplicationError::RenderingFailed {
            path: name.to_string(),
            reason: error_chain(&e),
        };

        let mut tera = Tera::default();
        tera.autoescape_on(Vec::new());
        tera.add_raw_template(name, source).map_err(failed)?;

        let mut context = Context::new();
        context.insert("pkg", package);

        let rendered = tera.render(name, &context).map_err(failed)?;
        trace!(bytes = rendered.len(), "Template rendered");
        Ok(rendered)
    }
}

/// Tera nests the useful message in the error source chain.
fn error_chain(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryStore;
    use quark_core::{
        application::ports::TemplateStore,
        domain::{AnswerSet, AnswerValue, QuestionId},
    };

    fn package(build: &str, lint: &str, activation: bool) -> Package {
        let answers = AnswerSet::new()
            .with(QuestionId::Name, AnswerValue::Text("linter".into()))
            .with(
                QuestionId::Description,
                AnswerValue::Text("Says \"hello\"".into()),
            )
            .with(QuestionId::Author, AnswerValue::Text("octocat".into()))
            .with(QuestionId::License, AnswerValue::Text("MIT".into()))
            .with(QuestionId::ActivationCmd, AnswerValue::Bool(activation))
            .with(QuestionId::AtomDependenciesQuestion, AnswerValue::Bool(true))
            .with(QuestionId::AtomDependencies, AnswerValue::Text("busy-signal".into()))
            .with(QuestionId::BuildScript, AnswerValue::Text(build.into()))
            .with(QuestionId::LinterHook, AnswerValue::Text(lint.into()))
            .with(
                QuestionId::AddConfig,
                AnswerValue::List(vec!["travisCI".into()]),
            );
        Package::derive(&answers).unwrap()
    }

    fn render_builtin(path: &str, package: &Package) -> String {
        let store = InMemoryStore::with_builtin().unwrap();
        TeraRenderer::new()
            .render(path, &store.get(path).unwrap(), package)
            .unwrap()
    }

    #[test]
    fn package_manifest_is_valid_json() {
        let json = render_builtin("package.json", &package("postinstall", "precommit", true));
        let manifest: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(manifest["name"], "linter");
        assert_eq!(manifest["description"], "Says \"hello\"");
        assert_eq!(manifest["license"], "MIT");
        assert_eq!(manifest["scripts"]["postinstall"], "npm run build");
        assert_eq!(manifest["scripts"]["precommit"], "npm run lint");
        assert_eq!(manifest["package-deps"][0], "busy-signal");
        assert_eq!(
            manifest["activationCommands"]["atom-workspace"],
            "linter:toggle"
        );
        assert_eq!(
            manifest["repository"]["url"],
            "https://github.com/octocat/atom-linter"
        );
    }

    #[test]
    fn shared_hook_renders_one_script() {
        let json = render_builtin(
            "package.json",
            &package("prepublishOnly", "prepublishOnly", false),
        );
        let manifest: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            manifest["scripts"]["prepublishOnly"],
            "npm run lint && npm run build"
        );
        assert!(manifest.get("activationCommands").is_none());
    }

    #[test]
    fn keymap_and_menu_render_as_json() {
        for path in ["keymaps/keymap.json", "menus/menu.json"] {
            for activation in [true, false] {
                let out = render_builtin(path, &package("postinstall", "prepush", activation));
                assert!(
                    serde_json::from_str::<serde_json::Value>(&out).is_ok(),
                    "{path} (activation {activation}) is not JSON:\n{out}"
                );
            }
        }
    }

    #[test]
    fn source_stub_uses_class_and_command() {
        let ts = render_builtin("src/index.ts", &package("postinstall", "prepush", true));
        assert!(ts.contains("export class Linter"));
        assert!(ts.contains("'linter:toggle'"));
        assert!(ts.contains("atom-package-deps"));
    }

    #[test]
    fn license_and_readme_carry_license_fields() {
        let pkg = package("postinstall", "prepush", true);
        let license = render_builtin("LICENSE", &pkg);
        assert!(license.starts_with(pkg.license.text.trim_end()));

        let readme = render_builtin("README.md", &pkg);
        assert!(readme.contains(&pkg.license.url));
        assert!(readme.contains("travis-ci.org/octocat/atom-linter"));
    }

    #[test]
    fn syntax_errors_are_rendering_failures() {
        let err = TeraRenderer::new()
            .render("broken", "{{ pkg.name", &package("postinstall", "prepush", true))
            .unwrap_err();
        assert!(err.to_string().contains("broken"));
    }
}
