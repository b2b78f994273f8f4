//! # Installed-Set Scanner
//!
//! Lists the plugin directories under the plugins root and defines the rule
//! used to associate a directory with a declared reference.
//!
//! ## Matching rule
//!
//! A directory corresponds to a declared reference when the *whole* declared
//! string (`owner/repo[#branch]`) contains the directory name as a substring.
//! `tmux-sensible` is therefore matched by `tmux-plugins/tmux-sensible`, but
//! a directory named `tmux` is also matched by `tmux-plugins/tmux-yank`. The
//! install, update and clean decisions are all defined in terms of this rule,
//! so it is kept as-is rather than narrowed to equality on the repository
//! name.

use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::Result;

/// A directory under the plugins root, presumed to hold a cloned plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledEntry {
    /// Directory basename.
    pub name: String,
    pub path: PathBuf,
}

impl InstalledEntry {
    /// Whether `declared` refers to this entry.
    pub fn matches(&self, declared: &str) -> bool {
        is_match(declared, &self.name)
    }
}

/// The matching rule: `declared` contains `dir_name`.
pub fn is_match(declared: &str, dir_name: &str) -> bool {
    declared.contains(dir_name)
}

/// Whether any of `entries` matches `declared`.
pub fn is_installed(declared: &str, entries: &[InstalledEntry]) -> bool {
    entries.iter().any(|entry| entry.matches(declared))
}

/// Whether any of `declared` matches `entry`.
pub fn is_declared(entry: &InstalledEntry, declared: &[String]) -> bool {
    declared.iter().any(|d| entry.matches(d))
}

/// Lists immediate subdirectories of `plugins_root`, sorted by name.
///
/// A missing root means nothing has been installed yet and yields an empty
/// list. Regular files are ignored; symlinks are followed so a symlinked
/// plugin checkout counts as installed.
pub fn scan(plugins_root: &Path) -> Result<Vec<InstalledEntry>> {
    let mut entries = Vec::new();
    let walker = WalkDir::new(plugins_root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 && is_not_found(&e) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if !entry.path().is_dir() {
            continue;
        }
        entries.push(InstalledEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.into_path(),
        });
    }
    Ok(entries)
}

fn is_not_found(error: &walkdir::Error) -> bool {
    error
        .io_error()
        .is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
}
