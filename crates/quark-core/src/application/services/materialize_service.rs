//! Materialize Service - turns a package description into files on disk.
//!
//! The workflow has two steps:
//! 1. Plan: pick the templates the package needs and render them into a
//!    `ProjectStructure`
//! 2. Write: create directories, then files, through the `Filesystem` port
//!
//! Writes are best-effort. A failure stops the run and leaves whatever was
//! already written in place.

use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::{
    application::ports::{Filesystem, TemplateRenderer, TemplateStore},
    domain::{CiProvider, DomainValidator, Feature, FsEntry, Package, ProjectStructure},
    error::{QuarkError, QuarkResult},
};

/// How a template source becomes file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Render,
    Copy,
}

/// One planned output: template source, destination, mode.
struct Output {
    template: &'static str,
    destination: PathBuf,
    mode: Mode,
}

impl Output {
    fn render(template: &'static str, destination: impl Into<PathBuf>) -> Self {
        Self {
            template,
            destination: destination.into(),
            mode: Mode::Render,
        }
    }

    fn copy(template: &'static str, destination: impl Into<PathBuf>) -> Self {
        Self {
            template,
            destination: destination.into(),
            mode: Mode::Copy,
        }
    }
}

/// Template source for each feature that produces a file.
fn feature_template(feature: Feature) -> Option<(&'static str, &'static str)> {
    match feature {
        Feature::Keymaps => Some(("keymaps/keymap.json", "json")),
        Feature::Menus => Some(("menus/menu.json", "json")),
        Feature::Styles => Some(("styles/style.less", "less")),
        Feature::Grammars | Feature::Snippets => None,
    }
}

fn ci_template(provider: CiProvider) -> Output {
    match provider {
        CiProvider::CircleCi => Output::copy("_circleci/config.yml", ".circleci/config.yml"),
        CiProvider::TravisCi => Output::copy("_travis.yml", ".travis.yml"),
    }
}

/// Writes the package skeleton.
pub struct MaterializeService {
    store: Box<dyn TemplateStore>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl MaterializeService {
    pub fn new(
        store: Box<dyn TemplateStore>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            store,
            renderer,
            filesystem,
        }
    }

    /// Plan, validate and write the skeleton under `root`.
    ///
    /// Returns the written plan so callers can report what was created.
    #[instrument(skip_all, fields(package = %package.name, root = %root.as_ref().display()))]
    pub fn materialize(
        &self,
        package: &Package,
        root: impl AsRef<Path>,
    ) -> QuarkResult<ProjectStructure> {
        DomainValidator::validate_package(package).map_err(QuarkError::Domain)?;
        let structure = self.plan(package, root.as_ref())?;
        DomainValidator::validate_project_structure(&structure).map_err(QuarkError::Domain)?;

        self.write_all(&structure)?;

        info!(entries = structure.entry_count(), "Skeleton written");
        Ok(structure)
    }

    /// Render every template the package needs, without touching disk.
    pub fn plan(&self, package: &Package, root: &Path) -> QuarkResult<ProjectStructure> {
        let mut structure = ProjectStructure::new(root);

        for output in self.outputs_for(package, &mut structure) {
            let source = self.store.get(output.template)?;
            let content = match output.mode {
                Mode::Render => self.renderer.render(output.template, &source, package)?,
                Mode::Copy => source,
            };
            debug!(
                template = output.template,
                destination = %output.destination.display(),
                "Planned file"
            );
            structure.add_file(output.destination, content);
        }

        Ok(structure)
    }

    /// Feature directories go straight into `structure`; files are returned.
    fn outputs_for(&self, package: &Package, structure: &mut ProjectStructure) -> Vec<Output> {
        let name = &package.name;
        let mut outputs = Vec::new();

        for feature in &package.features {
            structure.add_directory(feature.directory());
            if let Some((template, extension)) = feature_template(*feature) {
                outputs.push(Output::render(
                    template,
                    Path::new(feature.directory()).join(format!("{name}.{extension}")),
                ));
            }
        }

        outputs.push(Output::render("src/index.ts", format!("src/{name}.ts")));
        outputs.push(Output::render("README.md", "README.md"));
        outputs.push(Output::render("LICENSE", "LICENSE"));
        outputs.push(Output::render("package.json", "package.json"));
        outputs.push(Output::copy("_editorconfig", ".editorconfig"));
        outputs.push(Output::copy("_gitignore", ".gitignore"));
        outputs.push(Output::copy("tsconfig.json", "tsconfig.json"));
        outputs.push(Output::copy("tslint.json", "tslint.json"));

        outputs.extend(package.ci.iter().copied().map(ci_template));
        outputs
    }

    /// Write all entries in the structure.
    fn write_all(&self, structure: &ProjectStructure) -> QuarkResult<()> {
        let root = structure.root();
        self.filesystem.create_dir_all(root)?;

        for entry in structure.entries() {
            match entry {
                FsEntry::Directory(dir) => {
                    self.filesystem.create_dir_all(&root.join(&dir.path))?;
                }
                FsEntry::File(file) => {
                    let path = root.join(&file.path);

                    // Ensure parent exists
                    if let Some(parent) = path.parent() {
                        self.filesystem.create_dir_all(parent)?;
                    }

                    self.filesystem.write_file(&path, &file.content)?;
                }
            }
        }

        Ok(())
    }
}
