//! Package naming helpers.
//!
//! | Input | `slugify` | `to_pascal_case` |
//! |-------|-----------|------------------|
//! | "My Awesome Pkg" | "my-awesome-pkg" | "MyAwesomePkg" |
//! | "linter_ESLint" | "linter-es-lint" | "LinterEsLint" |
//! | "atom-foo" | "atom-foo" | "AtomFoo" |

/// Prefix reserved for repository names of Atom packages.
pub const ATOM_PREFIX: &str = "atom-";

/// Repository name for a package: the name itself when it already carries
/// [`ATOM_PREFIX`], otherwise the prefixed name.
pub fn repository_name(name: &str) -> String {
    if name.starts_with(ATOM_PREFIX) {
        name.to_string()
    } else {
        format!("{ATOM_PREFIX}{name}")
    }
}

/// Turn an arbitrary directory name into a package-name candidate.
pub fn slugify(input: &str) -> String {
    split_words(input).join("-")
}

/// Class-style name used for the package's main module.
pub fn to_pascal_case(input: &str) -> String {
    split_words(input)
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    let mut out = String::new();
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                    out
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Split a string into lowercase words.
///
/// Any non-alphanumeric character separates words, as do camelCase
/// transitions (`aB`) and acronym boundaries (`HTTPServer` → `http`, `server`).
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(next) = chars.peek() {
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}
