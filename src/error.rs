//! # Error Handling
//!
//! This module defines the centralized error type for `muxplug`. It uses the
//! `thiserror` library to describe every anticipated failure of the plugin
//! lifecycle, from a malformed `owner/repo` reference in the tmux
//! configuration to a `git pull` that exits non-zero.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of all failures. Validation errors (`Parse`,
//!   `UnknownPlugin`, `NotInstalled`) are raised before anything touches the
//!   plugins directory; external-command errors (`GitClone`, `RemoteNotFound`,
//!   `MergeConflict`, `PullFailed`, `External`) are raised by the first
//!   failing plugin in a sequence.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Variants that have an obvious remedy print a `hint:` line after the
//! message.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for muxplug operations
#[derive(Error, Debug)]
pub enum Error {
    /// A declared plugin reference is not of the form `owner/repo[#branch]`.
    #[error("Malformed plugin reference '{reference}': expected <owner>/<repo>[#<branch>]")]
    Parse { reference: String },

    /// None of the candidate tmux configuration files exist.
    #[error("tmux configuration file not found (searched: {})\n  hint: create ~/.config/tmux/tmux.conf or pass --config <FILE>", format_paths(searched))]
    ConfigNotFound { searched: Vec<PathBuf> },

    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The plugins root (or its nearest existing ancestor) is not writable.
    #[error("Do not have write permissions to {}", path.display())]
    Permission { path: PathBuf },

    /// An explicitly requested plugin is not declared in the configuration.
    #[error("Cannot update plugin '{name}': it is not configured in your tmux configuration\n  hint: add `set -g @plugin '<owner>/{name}'` to your tmux configuration")]
    UnknownPlugin { name: String },

    /// A plugin selected for update or sourcing has no installed directory.
    #[error("Plugin '{name}' is not installed\n  hint: run `muxplug install` first")]
    NotInstalled { name: String },

    /// `git pull` exited with status 1.
    #[error("Failed to update {}: remote repository not found", path.display())]
    RemoteNotFound { path: PathBuf },

    /// `git pull` exited with status 128.
    #[error("Failed to update {}: there is a conflict between remote and local changes", path.display())]
    MergeConflict { path: PathBuf },

    /// `git pull` failed with any other status.
    #[error("Failed to pull latest changes for {} (exit status {code})", path.display())]
    PullFailed { path: PathBuf, code: i32 },

    /// `git submodule update` failed after a successful pull.
    #[error("Failed to perform submodule update in {}: {message}", path.display())]
    Submodule { path: PathBuf, message: String },

    /// `git clone` failed.
    #[error("Failed to clone {url}{}: {message}", branch.as_ref().map(|b| format!("#{}", b)).unwrap_or_default())]
    GitClone {
        url: String,
        branch: Option<String>,
        message: String,
    },

    /// The `git` binary could not be run.
    #[error("git is required to manage plugins but could not be executed\n  hint: install git and make sure it is on your PATH")]
    GitUnavailable,

    /// Any other external command that exited unsuccessfully.
    #[error("Command `{command}` failed{}: {stderr}", code.map(|c| format!(" with exit status {}", c)).unwrap_or_default())]
    External {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// A plugin directory could not be sourced.
    #[error("Failed to source plugin {}: {message}", path.display())]
    Source { path: PathBuf, message: String },

    /// A plugin directory (or the whole plugins root) could not be removed.
    #[error("Failed to remove {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configured git host is not usable as a clone base URL.
    #[error("Invalid git host '{host}': {message}")]
    InvalidHost { host: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// A directory walk error, wrapped from `walkdir::Error`.
    #[error("Directory scan error: {0}")]
    Walk(#[from] walkdir::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// A serialization error, wrapped from `serde_json::Error`.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
