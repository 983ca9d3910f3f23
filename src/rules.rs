//! Retention rule loading and matching from retain.toml.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;

/// A fixed rule set deciding which files in the staged Data/ tree survive.
/// A path is retained if it matches any exact entry, starts with any prefix,
/// or starts with a pair's prefix while ending with its suffix.
#[derive(Debug, Clone, Deserialize)]
pub struct RetentionRules {
    #[serde(default)]
    exact: HashSet<String>,
    #[serde(default)]
    prefixes: Vec<String>,
    #[serde(default)]
    prefix_suffix: Vec<PrefixSuffixRule>,
}

/// Rules like "keep `Data/Forts/.../*-icon.png`": prefix scopes the subtree,
/// suffix picks the files inside it.
#[derive(Debug, Clone, Deserialize)]
pub struct PrefixSuffixRule {
    prefix: String,
    suffix: String,
}

// Embed the TOML file directly in the binary at compile time
const RETAIN_TOML: &str = include_str!("../retain.toml");

/// Load the retention rules for the staged web runtime Data/ tree
pub fn web_runtime_rules() -> Result<RetentionRules> {
    toml::from_str(RETAIN_TOML).context("Failed to parse retention rules TOML")
}

impl RetentionRules {
    /// Check whether a relative path (forward-slash separated, rooted at the
    /// staging dir, e.g. "Data/Graphics/star.png") is retained.
    /// Matching is case-sensitive; any rule match wins.
    pub fn matches(&self, rel_path: &str) -> bool {
        if self.exact.contains(rel_path) {
            return true;
        }

        if self.prefixes.iter().any(|p| rel_path.starts_with(p)) {
            return true;
        }

        self.prefix_suffix
            .iter()
            .any(|r| rel_path.starts_with(&r.prefix) && rel_path.ends_with(&r.suffix))
    }
}

/// Keep/delete decision for one file, evaluated against its relative path.
/// Two fixed variants: the static rule set for the Data/ tree, and the
/// manifest-derived file-name allowlist for the Qt resource tree.
#[derive(Debug, Clone)]
pub enum KeepPolicy {
    Rules(RetentionRules),
    Allowlist(HashSet<String>),
}

impl KeepPolicy {
    /// Decide whether the file at `rel_path` is kept.
    /// The allowlist variant matches on the bare file name (last segment).
    pub fn keep(&self, rel_path: &str) -> bool {
        match self {
            KeepPolicy::Rules(rules) => rules.matches(rel_path),
            KeepPolicy::Allowlist(names) => {
                let name = rel_path.rsplit('/').next().unwrap_or(rel_path);
                names.contains(name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RetentionRules {
        web_runtime_rules().expect("embedded retention rules parse")
    }

    #[test]
    fn test_exact_path_is_kept() {
        assert!(rules().matches("Data/misc/hedgewars.png"));
        assert!(rules().matches("Data/Music/main_theme.ogg"));
    }

    #[test]
    fn test_prefix_keeps_whole_subtree() {
        assert!(rules().matches("Data/Graphics/Hats/pirate.png"));
        assert!(rules().matches("Data/Names/types.txt"));
        assert!(rules().matches("Data/Graphics/AmmoMenu/deep/nested/icon.png"));
    }

    #[test]
    fn test_prefix_suffix_requires_both_ends() {
        assert!(rules().matches("Data/Forts/Castle-icon.png"));
        assert!(rules().matches("Data/Forts/sub/Olympic-icon.png"));
        assert!(!rules().matches("Data/Forts/CastleL.png"));
        assert!(!rules().matches("Data/Themes/Castle-icon.png"));
    }

    #[test]
    fn test_unmatched_path_is_dropped() {
        assert!(!rules().matches("Data/Sounds/unused.wav"));
        assert!(!rules().matches("Data/Maps/Basketball/map.png"));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert!(!rules().matches("data/misc/hedgewars.png"));
        assert!(!rules().matches("Data/graphics/Hats/pirate.png"));
    }

    #[test]
    fn test_prefix_does_not_match_partial_segment() {
        // "Data/Names/" must not retain a sibling like "Data/NamesBackup".
        assert!(!rules().matches("Data/NamesBackup"));
    }

    #[test]
    fn test_allowlist_matches_bare_name() {
        let names: HashSet<String> =
            ["skin_a.png".to_string(), "skin_b.png".to_string()].into();
        let policy = KeepPolicy::Allowlist(names);

        assert!(policy.keep("res/skin_a.png"));
        assert!(policy.keep("res/nested/skin_b.png"));
        assert!(!policy.keep("res/skin_c.png"));
        // Allowlist entries are names, never paths.
        assert!(!policy.keep("res/sub"));
    }

    #[test]
    fn test_rules_policy_delegates_to_rule_set() {
        let policy = KeepPolicy::Rules(rules());
        assert!(policy.keep("Data/Graphics/Flags/cm_earth.png"));
        assert!(!policy.keep("Data/Sounds/explosion.ogg"));
    }
}
