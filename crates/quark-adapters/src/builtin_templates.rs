//! Built-in templates embedded at compile time.
//!
//! Paths are relative to the template set root. Files whose destination
//! starts with a dot are stored with a `_` prefix so package managers and
//! editors do not treat them as live configuration.

pub const TEMPLATES: &[(&str, &str)] = &[
    ("LICENSE", include_str!("../templates/LICENSE")),
    ("README.md", include_str!("../templates/README.md")),
    ("_circleci/config.yml", include_str!("../templates/_circleci/config.yml")),
    ("_editorconfig", include_str!("../templates/_editorconfig")),
    ("_gitignore", include_str!("../templates/_gitignore")),
    ("_travis.yml", include_str!("../templates/_travis.yml")),
    ("keymaps/keymap.json", include_str!("../templates/keymaps/keymap.json")),
    ("menus/menu.json", include_str!("../templates/menus/menu.json")),
    ("package.json", include_str!("../templates/package.json")),
    ("src/index.ts", include_str!("../templates/src/index.ts")),
    ("styles/style.less", include_str!("../templates/styles/style.less")),
    ("tsconfig.json", include_str!("../templates/tsconfig.json")),
    ("tslint.json", include_str!("../templates/tslint.json")),
];

/// Every built-in template as `(path, source)`.
pub fn all_templates() -> impl Iterator<Item = (&'static str, &'static str)> {
    TEMPLATES.iter().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_unique_and_sorted() {
        let paths: Vec<_> = all_templates().map(|(p, _)| p).collect();
        let mut sorted = paths.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(paths, sorted);
    }

    #[test]
    fn no_template_is_empty() {
        for (path, source) in all_templates() {
            assert!(!source.trim().is_empty(), "{path} is empty");
        }
    }
}
