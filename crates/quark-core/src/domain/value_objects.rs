//! Domain value objects: Feature, BuildScript, LinterHook, CiProvider.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! Each one carries its wire name (`as_str`), a human label for prompts and
//! a `FromStr` parser that accepts exactly the wire name. The wire names are
//! what the answer cache stores and what the templates see.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant and its `ALL` entry here
//! 2. Add the `as_str`, `label` and `FromStr` arms here
//! 3. Teach the question catalogue or the materializer about it if needed

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Feature ──────────────────────────────────────────────────────────────────

/// An optional package capability gating which files are materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Grammars,
    Keymaps,
    Menus,
    Snippets,
    Styles,
}

impl Feature {
    /// Prompt order.
    pub const ALL: [Feature; 5] = [
        Self::Grammars,
        Self::Keymaps,
        Self::Menus,
        Self::Snippets,
        Self::Styles,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Grammars => "grammars",
            Self::Keymaps => "keymaps",
            Self::Menus => "menus",
            Self::Snippets => "snippets",
            Self::Styles => "styles",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Grammars => "Grammars",
            Self::Keymaps => "Keymaps",
            Self::Menus => "Menus",
            Self::Snippets => "Snippets",
            Self::Styles => "Styles",
        }
    }

    /// Directory created for the feature inside the package root.
    pub const fn directory(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| DomainError::UnknownChoice {
                question: "features",
                value: s.to_string(),
            })
    }
}

// ── BuildScript ───────────────────────────────────────────────────────────────

/// The npm lifecycle hook that runs the TypeScript build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildScript {
    #[serde(rename = "postinstall")]
    Postinstall,
    #[serde(rename = "prepublishOnly")]
    PrepublishOnly,
}

impl BuildScript {
    pub const ALL: [BuildScript; 2] = [Self::Postinstall, Self::PrepublishOnly];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Postinstall => "postinstall",
            Self::PrepublishOnly => "prepublishOnly",
        }
    }
}

impl Default for BuildScript {
    fn default() -> Self {
        Self::PrepublishOnly
    }
}

impl fmt::Display for BuildScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildScript {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "postinstall" => Ok(Self::Postinstall),
            "prepublishOnly" => Ok(Self::PrepublishOnly),
            other => Err(DomainError::UnknownChoice {
                question: "buildScript",
                value: other.to_string(),
            }),
        }
    }
}

// ── LinterHook ────────────────────────────────────────────────────────────────

/// The hook that runs the linter.
///
/// `precommit` and `prepush` are husky git hooks; `prepublishOnly` is the npm
/// lifecycle hook shared with [`BuildScript::PrepublishOnly`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinterHook {
    #[serde(rename = "precommit")]
    Precommit,
    #[serde(rename = "prepush")]
    Prepush,
    #[serde(rename = "prepublishOnly")]
    PrepublishOnly,
}

impl LinterHook {
    pub const ALL: [LinterHook; 3] = [Self::Precommit, Self::Prepush, Self::PrepublishOnly];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Precommit => "precommit",
            Self::Prepush => "prepush",
            Self::PrepublishOnly => "prepublishOnly",
        }
    }
}

impl Default for LinterHook {
    fn default() -> Self {
        Self::Precommit
    }
}

impl fmt::Display for LinterHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinterHook {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "precommit" => Ok(Self::Precommit),
            "prepush" => Ok(Self::Prepush),
            "prepublishOnly" => Ok(Self::PrepublishOnly),
            other => Err(DomainError::UnknownChoice {
                question: "linterHook",
                value: other.to_string(),
            }),
        }
    }
}

// ── CiProvider ────────────────────────────────────────────────────────────────

/// Continuous integration configuration to add to the package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CiProvider {
    #[serde(rename = "circleCI")]
    CircleCi,
    #[serde(rename = "travisCI")]
    TravisCi,
}

impl CiProvider {
    pub const ALL: [CiProvider; 2] = [Self::CircleCi, Self::TravisCi];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CircleCi => "circleCI",
            Self::TravisCi => "travisCI",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::CircleCi => "Circle CI",
            Self::TravisCi => "Travis CI",
        }
    }

    pub const fn homepage(&self) -> &'static str {
        match self {
            Self::CircleCi => "https://circleci.com/",
            Self::TravisCi => "https://travis-ci.org/",
        }
    }
}

impl fmt::Display for CiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CiProvider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "circleCI" => Ok(Self::CircleCi),
            "travisCI" => Ok(Self::TravisCi),
            other => Err(DomainError::UnknownChoice {
                question: "addConfig",
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_wire_names_round_trip() {
        for feature in Feature::ALL {
            assert_eq!(Feature::from_str(feature.as_str()).unwrap(), feature);
        }
    }

    #[test]
    fn unknown_feature_is_rejected() {
        assert!(matches!(
            Feature::from_str("themes"),
            Err(DomainError::UnknownChoice { question: "features", .. })
        ));
    }

    #[test]
    fn hook_names_are_case_sensitive() {
        assert!(BuildScript::from_str("prepublishonly").is_err());
        assert_eq!(
            LinterHook::from_str("prepublishOnly").unwrap(),
            LinterHook::PrepublishOnly
        );
    }

    #[test]
    fn defaults_match_prompt_defaults() {
        assert_eq!(BuildScript::default(), BuildScript::PrepublishOnly);
        assert_eq!(LinterHook::default(), LinterHook::Precommit);
    }

    #[test]
    fn ci_provider_serializes_with_wire_name() {
        let json = serde_json::to_string(&CiProvider::CircleCi).unwrap();
        assert_eq!(json, "\"circleCI\"");
    }
}
