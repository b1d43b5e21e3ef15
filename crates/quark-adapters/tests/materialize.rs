//! End-to-end materialization through the real adapters.

use std::path::Path;

use quark_adapters::{InMemoryStore, LocalFilesystem, MemoryFilesystem, TeraRenderer};
use quark_core::{
    application::{Filesystem, MaterializeService},
    domain::{AnswerSet, AnswerValue, Package, QuestionId},
};
use tempfile::TempDir;

fn answers(features: &[&str], ci: &[&str]) -> AnswerSet {
    named("linter", features, ci)
}

fn named(name: &str, features: &[&str], ci: &[&str]) -> AnswerSet {
    let list = |items: &[&str]| AnswerValue::List(items.iter().map(|s| s.to_string()).collect());
    AnswerSet::new()
        .with(QuestionId::Name, AnswerValue::Text(name.into()))
        .with(QuestionId::Description, AnswerValue::Text("Lints".into()))
        .with(QuestionId::Author, AnswerValue::Text("octocat".into()))
        .with(QuestionId::License, AnswerValue::Text("ISC".into()))
        .with(QuestionId::Features, list(features))
        .with(QuestionId::ActivationCmd, AnswerValue::Bool(true))
        .with(QuestionId::BuildScript, AnswerValue::Text("prepublishOnly".into()))
        .with(QuestionId::LinterHook, AnswerValue::Text("precommit".into()))
        .with(QuestionId::AddConfig, list(ci))
}

fn service(fs: MemoryFilesystem) -> MaterializeService {
    MaterializeService::new(
        Box::new(InMemoryStore::with_builtin().unwrap()),
        Box::new(TeraRenderer::new()),
        Box::new(fs),
    )
}

#[test]
fn keymaps_without_styles_in_memory() {
    let fs = MemoryFilesystem::new();
    let package = Package::derive(&answers(&["keymaps"], &[])).unwrap();

    service(fs.clone()).materialize(&package, "pkg").unwrap();

    let keymap = fs.read_file(Path::new("pkg/keymaps/linter.json")).unwrap();
    assert!(keymap.contains("linter:toggle"));
    assert!(fs.read_file(Path::new("pkg/styles/linter.less")).is_none());
    assert!(!fs.exists(Path::new("pkg/styles")));

    let files: Vec<_> = fs.list_files();
    assert_eq!(files.len(), 9);
    assert!(files.contains(&Path::new("pkg/.editorconfig").to_path_buf()));
    assert!(!files.contains(&Path::new("pkg/.travis.yml").to_path_buf()));
}

#[test]
fn ci_selection_adds_configs() {
    let fs = MemoryFilesystem::new();
    let package = Package::derive(&answers(&[], &["circleCI", "travisCI"])).unwrap();

    service(fs.clone()).materialize(&package, "pkg").unwrap();

    assert!(fs.exists(Path::new("pkg/.circleci/config.yml")));
    assert!(fs.exists(Path::new("pkg/.travis.yml")));
}

#[test]
fn writes_to_disk_with_local_filesystem() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("linter");
    let package =
        Package::derive(&answers(&["grammars", "menus", "styles"], &["travisCI"])).unwrap();

    let service = MaterializeService::new(
        Box::new(InMemoryStore::with_builtin().unwrap()),
        Box::new(TeraRenderer::new()),
        Box::new(LocalFilesystem::new()),
    );
    service.materialize(&package, &root).unwrap();

    assert!(root.join("grammars").is_dir());
    assert!(root.join("menus/linter.json").is_file());
    assert!(root.join("styles/linter.less").is_file());
    assert!(root.join("src/linter.ts").is_file());

    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(root.join("package.json")).unwrap())
            .unwrap();
    assert_eq!(manifest["license"], "ISC");
    assert_eq!(manifest["scripts"]["prepublishOnly"], "npm run build");
    assert_eq!(manifest["scripts"]["precommit"], "npm run lint");

    let license = std::fs::read_to_string(root.join("LICENSE")).unwrap();
    assert!(!license.contains("\n\n\n"));
}

#[test]
fn names_with_path_segments_write_nothing() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("pkg");
    let service = MaterializeService::new(
        Box::new(InMemoryStore::with_builtin().unwrap()),
        Box::new(TeraRenderer::new()),
        Box::new(LocalFilesystem::new()),
    );

    for name in ["../../escaped", "linter\"x"] {
        let package = Package::derive(&named(name, &["keymaps", "styles"], &[])).unwrap();
        assert!(service.materialize(&package, &root).is_err(), "wrote {name}");
    }

    assert!(!temp.path().join("escaped.ts").exists());
    assert!(!root.exists());
}
