//! Static SPDX license table.
//!
//! Every entry carries the exact identifier, full name, canonical SPDX URL
//! and the license text as published by SPDX (placeholders such as
//! `<year>` are left for the author to fill in).

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::domain::error::DomainError;

/// Identifier preselected by the license question.
pub const DEFAULT_LICENSE: &str = "MIT";

/// One row of the license table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct License {
    pub id: &'static str,
    pub name: &'static str,
    pub url: &'static str,
    pub text: &'static str,
}

/// Sorted by identifier, which is also the order the prompt lists them in.
pub static LICENSES: &[License] = &[
    License {
        id: "0BSD",
        name: "BSD Zero Clause License",
        url: "https://spdx.org/licenses/0BSD.html",
        text: include_str!("../../licenses/0BSD.txt"),
    },
    License {
        id: "Apache-2.0",
        name: "Apache License 2.0",
        url: "https://spdx.org/licenses/Apache-2.0.html",
        text: include_str!("../../licenses/Apache-2.0.txt"),
    },
    License {
        id: "BSD-2-Clause",
        name: "BSD 2-Clause \"Simplified\" License",
        url: "https://spdx.org/licenses/BSD-2-Clause.html",
        text: include_str!("../../licenses/BSD-2-Clause.txt"),
    },
    License {
        id: "BSD-3-Clause",
        name: "BSD 3-Clause \"New\" or \"Revised\" License",
        url: "https://spdx.org/licenses/BSD-3-Clause.html",
        text: include_str!("../../licenses/BSD-3-Clause.txt"),
    },
    License {
        id: "ISC",
        name: "ISC License",
        url: "https://spdx.org/licenses/ISC.html",
        text: include_str!("../../licenses/ISC.txt"),
    },
    License {
        id: "MIT",
        name: "MIT License",
        url: "https://spdx.org/licenses/MIT.html",
        text: include_str!("../../licenses/MIT.txt"),
    },
    License {
        id: "Unlicense",
        name: "The Unlicense",
        url: "https://spdx.org/licenses/Unlicense.html",
        text: include_str!("../../licenses/Unlicense.txt"),
    },
];

static BLANK_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank-run pattern is a valid regex"));

impl License {
    /// Look up a license by its exact SPDX identifier.
    pub fn find(id: &str) -> Result<&'static License, DomainError> {
        LICENSES
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| DomainError::UnknownLicense { id: id.to_string() })
    }

    /// All supported identifiers, sorted.
    pub fn ids() -> impl Iterator<Item = &'static str> {
        LICENSES.iter().map(|l| l.id)
    }

    /// License text with runs of blank lines collapsed to a single one.
    pub fn normalized_text(&self) -> String {
        BLANK_RUNS.replace_all(self.text, "\n\n").into_owned()
    }

    /// The derived license fields carried by a [`crate::domain::Package`].
    pub fn info(&self) -> LicenseInfo {
        LicenseInfo {
            id: self.id.to_string(),
            name: self.name.to_string(),
            url: self.url.to_string(),
            text: self.normalized_text(),
        }
    }
}

/// Owned license data as seen by templates (`pkg.license.*`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseInfo {
    pub id: String,
    pub name: String,
    pub url: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_by_id() {
        let ids: Vec<_> = License::ids().collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn default_license_is_in_table() {
        assert!(License::find(DEFAULT_LICENSE).is_ok());
    }

    #[test]
    fn info_matches_table_entry_for_every_license() {
        for license in LICENSES {
            let info = License::find(license.id).unwrap().info();
            assert_eq!(info.id, license.id);
            assert_eq!(info.name, license.name);
            assert_eq!(info.url, license.url);
            assert_eq!(info.text, license.normalized_text());
            assert_eq!(
                info.url,
                format!("https://spdx.org/licenses/{}.html", license.id)
            );
        }
    }

    #[test]
    fn lookup_is_exact() {
        assert!(License::find("mit").is_err());
        assert!(matches!(
            License::find("GPL-3.0"),
            Err(DomainError::UnknownLicense { .. })
        ));
    }

    #[test]
    fn normalized_text_has_no_blank_runs() {
        for license in LICENSES {
            assert!(!license.normalized_text().contains("\n\n\n"), "{}", license.id);
        }
    }

    #[test]
    fn collapse_keeps_single_blank_lines() {
        let collapsed = BLANK_RUNS.replace_all("a\n\n\n\nb\n\nc", "\n\n");
        assert_eq!(collapsed, "a\n\nb\n\nc");
    }
}
