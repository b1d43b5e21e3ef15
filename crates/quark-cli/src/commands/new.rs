//! Implementation of the `quark new` command.
//!
//! Responsibility: build the flow context from flags, environment and the
//! answer cache, wire adapters into the core services, and display results.
//! No business logic lives here.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info, instrument, warn};

use quark_adapters::{
    AtomRegistry, FilesystemTemplateLoader, InMemoryStore, JsonAnswerCache, LocalFilesystem,
    SystemCommandRunner, TeraRenderer,
};
use quark_core::{
    application::{
        ActionRunner, AnswerCache, ApplicationError, MaterializeService, QuestionFlow, stored_answers,
    },
    domain::{AnswerSet, FlowContext, InstallPlan, Package, catalogue},
    error::QuarkError,
};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the `quark new` command.
///
/// Dispatch sequence:
/// 1. Resolve the destination and gather the flow context
/// 2. Ask the questions, then store the answers for the next run
/// 3. Create the destination, derive the package and write the skeleton
/// 4. Install dependencies, initialize git, open the editor
/// 5. Print next-steps guidance
#[instrument(skip_all, fields(dir = %args.dir.display()))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Destination + context; nothing is created until the questions are done
    let root = resolve_destination(&args.dir)?;
    let cache = config
        .cache
        .enabled
        .then(|| JsonAnswerCache::in_dir(config.cache_dir()));
    let previous = cache
        .as_ref()
        .map(|c| load_previous(c, &output))
        .unwrap_or_default();
    let ctx = build_context(&args, &root, previous);

    debug!(
        app_name = %ctx.app_name,
        git_user = ctx.git_user.as_deref().unwrap_or("none"),
        has_git_repo = ctx.has_git_repo,
        editor = ctx.editor.as_deref().unwrap_or("none"),
        "Flow context ready"
    );

    // 2. Questions
    if !args.no_clear {
        output.clear_screen()?;
    }
    let answers = ask(&ctx, &config, &output)?;

    if let Some(cache) = &cache {
        remember(cache, &answers, &output);
    }
    if args.debug {
        let json = serde_json::to_string_pretty(&answers).map_err(|e| CliError::InvalidInput {
            message: format!("Failed to encode answers: {e}"),
            source: Some(Box::new(e)),
        })?;
        output.data(&json)?;
    }

    // 3. Files
    let package = Package::derive(&answers).map_err(QuarkError::from)?;
    let root = create_destination(&root)?;
    let materializer = MaterializeService::new(
        Box::new(template_store(&config)?),
        Box::new(TeraRenderer::new()),
        Box::new(LocalFilesystem::new()),
    );

    output.header(&format!("Generating '{}'...", package.name))?;
    let written = materializer
        .materialize(&package, &root)
        .with_cli_context(|| "writing package files")?;
    info!(files = written.files().count(), "Package files written");

    // 4. External actions
    let runner = ActionRunner::new(
        Box::new(SystemCommandRunner::new()),
        Box::new(LocalFilesystem::new()),
    )
    .with_client(config.install.client.clone());

    if args.skip_install {
        output.info("Skipping dependency installation")?;
    } else {
        install(&runner, &package, &root, &output)?;
    }

    if runner
        .init_git(&package, &root)
        .with_cli_context(|| "initializing git")?
    {
        output.success("Initialized a git repository")?;
    }

    if runner
        .open_editor(&package, ctx.editor.as_deref(), &root)
        .with_cli_context(|| "opening editor")?
    {
        output.info("Opened the package in your editor")?;
    }

    // 5. Success + next steps
    output.success(&format!(
        "Package '{}' created in {}",
        package.name,
        root.display()
    ))?;

    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        if args.dir != Path::new(".") {
            output.print(&format!("  cd {}", args.dir.display()))?;
        }
        if args.skip_install {
            output.print(&format!("  {} install", runner.client()))?;
        }
        output.print("  apm link")?;
        output.print("  # Reload Atom and start hacking!")?;
    }

    Ok(())
}

// ── Steps ─────────────────────────────────────────────────────────────────────

/// Absolute path of the destination, without creating it.
fn resolve_destination(dir: &Path) -> CliResult<PathBuf> {
    let resolved = if dir.exists() {
        dir.canonicalize()
    } else {
        std::path::absolute(dir)
    };
    resolved.with_cli_context(|| format!("Failed to resolve directory '{}'", dir.display()))
}

/// Create the destination if needed and return its canonical path.
fn create_destination(root: &Path) -> CliResult<PathBuf> {
    std::fs::create_dir_all(root)
        .with_cli_context(|| format!("Failed to create directory '{}'", root.display()))?;
    root.canonicalize()
        .with_cli_context(|| format!("Failed to resolve directory '{}'", root.display()))
}

fn build_context(args: &NewArgs, root: &Path, previous: AnswerSet) -> FlowContext {
    FlowContext {
        app_name: directory_name(root),
        git_user: git_user_name(),
        has_git_repo: root.join(".git").exists(),
        editor: args
            .editor
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string),
        allow_atom_prefix: args.allow_atom_prefix,
        allow_empty_description: args.allow_empty_description,
        previous,
    }
}

#[cfg(feature = "interactive")]
fn ask(ctx: &FlowContext, config: &AppConfig, output: &OutputManager) -> CliResult<AnswerSet> {
    if !console::Term::stderr().is_term() {
        return Err(QuarkError::from(ApplicationError::Prompt {
            reason: "not a terminal".into(),
        })
        .into());
    }

    let registry = AtomRegistry::new(&config.registry.url, config.registry.timeout())?;
    let prompter = crate::prompt::DialoguerPrompter::new(output.supports_color());

    QuestionFlow::new(Box::new(prompter), Box::new(registry))
        .run(&catalogue(), ctx)
        .with_cli_context(|| "asking questions")
}

#[cfg(not(feature = "interactive"))]
fn ask(_ctx: &FlowContext, _config: &AppConfig, _output: &OutputManager) -> CliResult<AnswerSet> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

fn install(
    runner: &ActionRunner,
    package: &Package,
    root: &Path,
    output: &OutputManager,
) -> CliResult<()> {
    let plan = InstallPlan::for_package(package);
    if plan.is_empty() {
        return Ok(());
    }

    let spinner = output.spinner(&format!(
        "Installing dependencies with {}...",
        runner.client()
    ));
    let result = runner.install(&plan, root);
    spinner.finish_and_clear();

    result.with_cli_context(|| "installing dependencies")?;
    output.success("Dependencies installed")?;
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn template_store(config: &AppConfig) -> CliResult<InMemoryStore> {
    let store = InMemoryStore::with_builtin()?;

    if let Some(dir) = &config.templates.local_path {
        let loader = FilesystemTemplateLoader::new(dir);
        let replaced = store.load_overrides(&loader)?;
        info!(dir = %dir.display(), replaced, "Template overrides loaded");
    }

    Ok(store)
}

/// Cache failures never stop a run.
fn load_previous(cache: &dyn AnswerCache, output: &OutputManager) -> AnswerSet {
    cache.load().unwrap_or_else(|e| {
        debug!(error = %e, "Answer cache unreadable");
        notify(output, "Ignoring unreadable stored answers");
        AnswerSet::new()
    })
}

fn remember(cache: &dyn AnswerCache, answers: &AnswerSet, output: &OutputManager) {
    if let Err(e) = cache.save(&stored_answers(&catalogue(), answers)) {
        debug!(error = %e, "Answer cache not written");
        notify(output, "Could not store answers for the next run");
    }
}

fn notify(output: &OutputManager, msg: &str) {
    if let Err(e) = output.warning(msg) {
        warn!(error = %e, "{msg}");
    }
}

fn directory_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `git config user.name`, if git is installed and the name is set.
fn git_user_name() -> Option<String> {
    let out = Command::new("git")
        .args(["config", "user.name"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let name = String::from_utf8_lossy(&out.stdout).trim().to_string();
    (!name.is_empty()).then_some(name)
}
