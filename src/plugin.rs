//! Plugin references as declared in the tmux configuration.
//!
//! A declared reference is the string inside `set -g @plugin '...'`, of the
//! form `owner/repo` or `owner/repo#branch`. Parsing is pure and performs no
//! normalization: case is kept and whitespace is expected to be trimmed by the
//! caller.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Identity of a declared plugin.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginReference {
    pub owner: String,
    pub repo: String,
    /// `None` means the remote's default branch.
    pub branch: Option<String>,
}

impl PluginReference {
    /// Parses `owner/repo[#branch]`.
    ///
    /// The string is split on the first `#`, then the left half on the first
    /// `/`. Both `owner` and `repo` must be non-empty. An empty branch after
    /// `#` is treated as the default branch.
    pub fn parse(raw: &str) -> Result<Self> {
        let (name, branch) = match raw.split_once('#') {
            Some((name, branch)) => (name, Some(branch)),
            None => (raw, None),
        };

        let (owner, repo) = name.split_once('/').ok_or_else(|| malformed(raw))?;
        if owner.is_empty() || repo.is_empty() {
            return Err(malformed(raw));
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            branch: branch.filter(|b| !b.is_empty()).map(str::to_string),
        })
    }

    /// Directory name this plugin is cloned into under the plugins root.
    pub fn dir_name(&self) -> &str {
        &self.repo
    }
}

fn malformed(raw: &str) -> Error {
    Error::Parse {
        reference: raw.to_string(),
    }
}

impl FromStr for PluginReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PluginReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)?;
        if let Some(branch) = &self.branch {
            write!(f, "#{}", branch)?;
        }
        Ok(())
    }
}

/// Serialized in its declared form, e.g. `"owner/repo#branch"`.
impl Serialize for PluginReference {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_owner_repo() {
        let plugin = PluginReference::parse("tmux-plugins/tmux-sensible").unwrap();
        assert_eq!(plugin.owner, "tmux-plugins");
        assert_eq!(plugin.repo, "tmux-sensible");
        assert_eq!(plugin.branch, None);
    }

    #[test]
    fn test_parse_with_branch() {
        let plugin = PluginReference::parse("owner/repo#dev").unwrap();
        assert_eq!(plugin.owner, "owner");
        assert_eq!(plugin.repo, "repo");
        assert_eq!(plugin.branch.as_deref(), Some("dev"));
    }

    #[test]
    fn test_parse_empty_branch_is_default() {
        let plugin = PluginReference::parse("owner/repo#").unwrap();
        assert_eq!(plugin.branch, None);
    }

    #[test]
    fn test_parse_splits_on_first_hash_and_slash() {
        let plugin = PluginReference::parse("owner/repo#feature/x#y").unwrap();
        assert_eq!(plugin.repo, "repo");
        assert_eq!(plugin.branch.as_deref(), Some("feature/x#y"));

        let plugin = PluginReference::parse("owner/nested/repo").unwrap();
        assert_eq!(plugin.owner, "owner");
        assert_eq!(plugin.repo, "nested/repo");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in ["owner", "/repo", "owner/", "", "/", "#dev", "owner#a/b"] {
            let err = PluginReference::parse(raw).unwrap_err();
            assert!(
                matches!(err, Error::Parse { ref reference } if reference == raw),
                "expected parse error for {:?}, got {:?}",
                raw,
                err
            );
        }
    }

    #[test]
    fn test_parse_does_not_normalize() {
        let plugin = PluginReference::parse("Owner/Tmux-Yank").unwrap();
        assert_eq!(plugin.owner, "Owner");
        assert_eq!(plugin.repo, "Tmux-Yank");
    }

    #[test]
    fn test_display_round_trips_declared_form() {
        for raw in ["a/b", "a/b#dev"] {
            assert_eq!(PluginReference::parse(raw).unwrap().to_string(), raw);
        }
    }

    #[test]
    fn test_from_str() {
        let plugin: PluginReference = "catppuccin/tmux#v2.1.0".parse().unwrap();
        assert_eq!(plugin.dir_name(), "tmux");
    }
}
