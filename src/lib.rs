//! # muxplug
//!
//! A declarative plugin manager for tmux. The tmux configuration lists
//! plugins with `set -g @plugin 'owner/repo[#branch]'`; this library
//! reconciles a plugins directory against that list by cloning what is
//! missing, pulling what is installed, and removing what is no longer
//! declared.
//!
//! ## Quick Example
//!
//! ```
//! use muxplug::config;
//! use muxplug::reconcile::ReconciliationDecision;
//! use muxplug::scanner::InstalledEntry;
//! use std::path::Path;
//!
//! let declared = config::parse_plugin_lines(
//!     "set -g @plugin 'a/x'\nset -g @plugin 'b/y#dev'\n",
//! )
//! .unwrap();
//! let installed = vec![InstalledEntry {
//!     name: "x".to_string(),
//!     path: Path::new("/plugins/x").to_path_buf(),
//! }];
//!
//! let decision =
//!     ReconciliationDecision::compute(&declared, &installed, Path::new("/plugins"), false)
//!         .unwrap();
//! assert_eq!(decision.to_install[0].to_string(), "b/y#dev");
//! assert!(decision.to_remove.is_empty());
//! ```
//!
//! ## Core Concepts
//!
//! - **References (`plugin`)**: parsing `owner/repo[#branch]`.
//! - **Configuration (`config`)**: finding the tmux configuration and reading
//!   the declared references from it.
//! - **Installed set (`scanner`)**: the directories under the plugins root and
//!   the rule matching them to declarations.
//! - **Reconciliation (`reconcile`)**: the install, update and clean
//!   operations.
//! - **Collaborators (`fetcher`, `git`, `tmux`)**: the external `git` and
//!   `tmux` commands, behind traits so they can be replaced in tests.
//! - **Sourcing (`source`)**: loading installed plugins into tmux.
//!
//! Logging goes through an explicit [`logging::LogContext`] passed to each
//! operation.

pub mod config;
pub mod defaults;
pub mod error;
pub mod fetcher;
pub mod filesystem;
pub mod git;
pub mod logging;
pub mod output;
pub mod plugin;
pub mod reconcile;
pub mod scanner;
pub mod source;
pub mod tmux;
