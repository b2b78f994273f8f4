//! # Fetching and Updating Plugins
//!
//! The reconciliation engine never runs git itself. It talks to a `Fetcher`,
//! which clones a plugin into a directory or brings an existing checkout up to
//! date. `GitFetcher` wraps the system `git` binary (see [`crate::git`]);
//! tests substitute implementations that record calls instead of touching the
//! network.

use std::path::Path;

use crate::error::Result;
use crate::git;
use crate::logging::LogContext;

/// Trait for plugin fetch operations - allows mocking in tests
pub trait Fetcher {
    /// Whether the underlying tool can run at all.
    fn is_available(&self) -> bool;

    /// Clones `url` at `branch` (`None` = default branch) into `target_dir`.
    fn clone_plugin(
        &self,
        url: &str,
        branch: Option<&str>,
        target_dir: &Path,
        log: &LogContext,
    ) -> Result<()>;

    /// Pulls the checkout at `path`, then updates its submodules.
    fn update_plugin(&self, path: &Path, log: &LogContext) -> Result<()>;
}

/// The default implementation of `Fetcher`, which uses the system's `git`
/// command.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitFetcher;

impl Fetcher for GitFetcher {
    fn is_available(&self) -> bool {
        git::is_available()
    }

    fn clone_plugin(
        &self,
        url: &str,
        branch: Option<&str>,
        target_dir: &Path,
        log: &LogContext,
    ) -> Result<()> {
        log.debug(format_args!("cloning repo {}", url));
        let output = git::clone(url, branch, target_dir)?;
        log.debug(format_args!(
            "output of git clone {} (branch {}): {}",
            url,
            branch.unwrap_or("<default>"),
            output.trim()
        ));
        Ok(())
    }

    fn update_plugin(&self, path: &Path, log: &LogContext) -> Result<()> {
        log.debug(format_args!("pulling repository {}", path.display()));
        git::pull(path)?.into_result(path)?;
        log.debug(format_args!("updating submodules {}", path.display()));
        git::submodule_update(path)
    }
}
