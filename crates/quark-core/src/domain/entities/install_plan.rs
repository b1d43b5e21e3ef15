use serde::Serialize;

use crate::domain::{entities::package::Package, value_objects::BuildScript};

/// Type definitions and compiler needed to build the package.
pub const BUILD_DEPENDENCIES: [&str; 3] = ["@types/atom", "@types/node", "typescript"];

/// Tooling that is always a development dependency.
pub const TOOLING_DEPENDENCIES: [&str; 2] = ["tslint", "husky"];

/// Installs other Atom packages the package depends on.
pub const PACKAGE_DEPS_HELPER: &str = "atom-package-deps";

/// Which npm packages to install, split by dependency kind.
///
/// When the build runs on `prepublishOnly` the compiler only has to exist on
/// the author's machine, so the build dependencies move to the development
/// list. With `postinstall` the build happens on the user's machine and they
/// must be runtime dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallPlan {
    pub runtime: Vec<String>,
    pub dev: Vec<String>,
}

impl InstallPlan {
    pub fn for_package(package: &Package) -> Self {
        let mut runtime: Vec<String> = Vec::new();
        let mut dev: Vec<String> = TOOLING_DEPENDENCIES.iter().map(|s| s.to_string()).collect();

        match package.build_script {
            BuildScript::PrepublishOnly => {
                dev.extend(BUILD_DEPENDENCIES.iter().map(|s| s.to_string()));
            }
            BuildScript::Postinstall => {
                runtime.extend(BUILD_DEPENDENCIES.iter().map(|s| s.to_string()));
            }
        }

        if package.has_atom_dependencies() {
            runtime.push(PACKAGE_DEPS_HELPER.to_string());
        }

        Self { runtime, dev }
    }

    pub fn is_empty(&self) -> bool {
        self.runtime.is_empty() && self.dev.is_empty()
    }
}
