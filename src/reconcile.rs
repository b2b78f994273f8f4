//! # Reconciliation Engine
//!
//! Diffs the plugins declared in the tmux configuration against the
//! directories found under the plugins root, and drives the install, update
//! and clean operations from that diff.
//!
//! ## Pipeline
//!
//! Every operation is a linear sequence of fallible steps, each
//! short-circuiting on the first error:
//!
//! 1. Validate (parse references, check requested names). Nothing on disk has
//!    been touched yet when a validation error is returned.
//! 2. Scan the installed set ([`crate::scanner::scan`]).
//! 3. Diff, using the substring matching rule from [`crate::scanner`].
//! 4. Act on each plugin in declaration order, one at a time. The first
//!    failing plugin aborts the rest; plugins handled before it stay as they
//!    are.
//!
//! State is never carried between runs. Rerunning `install` after a failure
//! picks up where it stopped because already-cloned directories now match.

use serde::Serialize;
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::{Error, Result};
use crate::fetcher::Fetcher;
use crate::filesystem;
use crate::logging::LogContext;
use crate::plugin::PluginReference;
use crate::scanner::{self, InstalledEntry};

/// The engine's view of what a run would change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationDecision {
    /// Declared but not installed.
    pub to_install: Vec<PluginReference>,
    /// Installed checkouts targeted for update.
    pub to_update: Vec<PathBuf>,
    /// Installed directories no declared reference matches.
    pub to_remove: Vec<PathBuf>,
}

impl ReconciliationDecision {
    /// Computes the decision for one run.
    ///
    /// `to_update` is only filled when `include_updates` is set; it then holds
    /// every declared plugin that is installed. When nothing is declared,
    /// `to_remove` holds every installed entry, since clean removes the whole
    /// plugins root in that case.
    pub fn compute(
        declared: &[String],
        installed: &[InstalledEntry],
        plugins_root: &Path,
        include_updates: bool,
    ) -> Result<Self> {
        let to_install = plan_install(declared, installed)
            .into_iter()
            .map(PluginReference::parse)
            .collect::<Result<Vec<_>>>()?;

        let to_update = if include_updates {
            let present: Vec<&str> = declared
                .iter()
                .map(String::as_str)
                .filter(|d| scanner::is_installed(d, installed))
                .collect();
            checkout_paths(&present, plugins_root)?
        } else {
            Vec::new()
        };

        let to_remove = match plan_clean(declared, installed) {
            CleanPlan::RemoveRoot => installed.iter().map(|e| e.path.clone()).collect(),
            CleanPlan::Remove(paths) => paths,
        };

        Ok(Self {
            to_install,
            to_update,
            to_remove,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.to_install.is_empty() && self.to_update.is_empty() && self.to_remove.is_empty()
    }

    /// Pretty-printed JSON with `to_install`, `to_update` and `to_remove`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// What `clean` should remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanPlan {
    /// Nothing is declared: the whole plugins root goes.
    RemoveRoot,
    /// These installed directories are not declared.
    Remove(Vec<PathBuf>),
}

/// Declared references with no matching installed entry, first occurrence
/// only.
pub fn plan_install<'a>(declared: &'a [String], installed: &[InstalledEntry]) -> Vec<&'a str> {
    let mut pending: Vec<&str> = Vec::new();
    for reference in declared {
        if scanner::is_installed(reference, installed) || pending.contains(&reference.as_str()) {
            continue;
        }
        pending.push(reference);
    }
    pending
}

/// Installed entries that no declared reference matches.
pub fn plan_clean(declared: &[String], installed: &[InstalledEntry]) -> CleanPlan {
    if declared.is_empty() {
        return CleanPlan::RemoveRoot;
    }
    CleanPlan::Remove(
        installed
            .iter()
            .filter(|entry| !scanner::is_declared(entry, declared))
            .map(|entry| entry.path.clone())
            .collect(),
    )
}

/// Validates an update request and resolves the checkouts to update.
///
/// `selection` empty means every declared plugin; otherwise each name
/// selects every declared reference containing it. Each name must occur in
/// some declared reference (`UnknownPlugin`) and each selected reference must
/// have an installed directory (`NotInstalled`); both checks run for the
/// whole selection before any path is returned.
pub fn plan_update(
    selection: &[String],
    declared: &[String],
    installed: &[InstalledEntry],
    plugins_root: &Path,
) -> Result<Vec<PathBuf>> {
    for name in selection {
        if !declared.iter().any(|d| d.contains(name.as_str())) {
            return Err(Error::UnknownPlugin { name: name.clone() });
        }
    }

    let selected = select_references(selection, declared);

    for reference in &selected {
        if !scanner::is_installed(reference, installed) {
            return Err(Error::NotInstalled {
                name: reference.to_string(),
            });
        }
    }

    checkout_paths(&selected, plugins_root)
}

/// Checkout directory of each reference, without duplicates.
fn checkout_paths(references: &[&str], plugins_root: &Path) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = Vec::with_capacity(references.len());
    for reference in references {
        let plugin = PluginReference::parse(reference)?;
        let path = filesystem::plugin_path(plugins_root, plugin.dir_name());
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
    Ok(paths)
}

/// Declared references picked by `selection`, in selection order and
/// without repeats.
fn select_references<'a>(selection: &[String], declared: &'a [String]) -> Vec<&'a str> {
    if selection.is_empty() {
        return declared.iter().map(String::as_str).collect();
    }
    let mut selected: Vec<&str> = Vec::new();
    for name in selection {
        for reference in declared.iter().filter(|d| d.contains(name.as_str())) {
            if !selected.contains(&reference.as_str()) {
                selected.push(reference);
            }
        }
    }
    selected
}

/// Builds the clone URL `<host>/<owner>/<repo>`.
pub fn clone_url(host: &Url, plugin: &PluginReference) -> Result<Url> {
    Ok(host.join(&format!("{}/{}", plugin.owner, plugin.repo))?)
}

/// Outcome of a clean run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// The whole plugins root was removed.
    pub removed_root: bool,
    /// Individual plugin directories removed.
    pub removed: Vec<PathBuf>,
}

/// Runs install, update and clean against one plugins root.
pub struct Reconciler<'a> {
    fetcher: &'a dyn Fetcher,
    log: &'a LogContext,
    plugins_root: PathBuf,
    git_host: Url,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        fetcher: &'a dyn Fetcher,
        log: &'a LogContext,
        plugins_root: impl Into<PathBuf>,
        git_host: Url,
    ) -> Self {
        Self {
            fetcher,
            log,
            plugins_root: plugins_root.into(),
            git_host,
        }
    }

    pub fn plugins_root(&self) -> &Path {
        &self.plugins_root
    }

    /// Computes the decision for `declared` without acting on it.
    pub fn status(&self, declared: &[String]) -> Result<ReconciliationDecision> {
        let installed = scanner::scan(&self.plugins_root)?;
        ReconciliationDecision::compute(declared, &installed, &self.plugins_root, true)
    }

    /// Clones every declared plugin that is not installed yet.
    ///
    /// Returns the plugins that were cloned, in declaration order.
    pub fn install(&self, declared: &[String]) -> Result<Vec<PluginReference>> {
        self.log.debug(format_args!("installing plugins"));
        self.require_fetcher()?;

        filesystem::check_writable(&self.plugins_root)?;
        filesystem::ensure_dir(&self.plugins_root)?;

        if declared.is_empty() {
            self.log.debug(format_args!("nothing to install"));
            return Ok(Vec::new());
        }

        let installed = scanner::scan(&self.plugins_root)?;
        for entry in &installed {
            if scanner::is_declared(entry, declared) {
                self.log.debug(format_args!(
                    "plugin {} already installed in {}",
                    entry.name,
                    self.plugins_root.display()
                ));
            }
        }

        let pending = plan_install(declared, &installed)
            .into_iter()
            .map(PluginReference::parse)
            .collect::<Result<Vec<_>>>()?;
        if pending.is_empty() {
            self.log.debug(format_args!("no plugins to install"));
            return Ok(Vec::new());
        }
        self.log.debug(format_args!(
            "need to install plugins: {}",
            join_display(&pending)
        ));

        for plugin in &pending {
            let url = clone_url(&self.git_host, plugin)?;
            let target = filesystem::plugin_path(&self.plugins_root, plugin.dir_name());
            self.log.debug(format_args!("cloning plugin {}", plugin));
            self.fetcher.clone_plugin(
                url.as_str(),
                plugin.branch.as_deref(),
                &target,
                self.log,
            )?;
            self.log.info(format_args!("installed {}", plugin));
        }
        self.log.debug(format_args!("completed installing plugins"));

        Ok(pending)
    }

    /// Pulls the selected plugins (all declared ones when `selection` is
    /// empty) and updates their submodules.
    ///
    /// Returns the checkouts that were updated, in order.
    pub fn update(&self, declared: &[String], selection: &[String]) -> Result<Vec<PathBuf>> {
        if selection.is_empty() {
            self.log.debug(format_args!("updating all plugins"));
        } else {
            self.log
                .debug(format_args!("updating plugins: {}", selection.join(", ")));
        }

        let installed = scanner::scan(&self.plugins_root)?;
        self.log
            .debug(format_args!("checking if any plugins are not installed"));
        let paths = plan_update(selection, declared, &installed, &self.plugins_root)?;
        if paths.is_empty() {
            self.log.debug(format_args!("no plugins to update"));
            return Ok(paths);
        }

        self.require_fetcher()?;
        for path in &paths {
            self.fetcher.update_plugin(path, self.log)?;
            self.log.info(format_args!("updated {}", display_name(path)));
        }

        Ok(paths)
    }

    /// Removes installed directories that are no longer declared, or the
    /// whole plugins root when nothing is declared.
    pub fn clean(&self, declared: &[String]) -> Result<CleanReport> {
        self.log.debug(format_args!("cleaning plugins"));
        if !self.plugins_root.exists() {
            self.log.debug(format_args!(
                "plugins directory {} does not exist, nothing to do",
                self.plugins_root.display()
            ));
            return Ok(CleanReport::default());
        }

        filesystem::check_writable(&self.plugins_root)?;

        let installed = scanner::scan(&self.plugins_root)?;
        let report = match plan_clean(declared, &installed) {
            CleanPlan::RemoveRoot => {
                self.log.debug(format_args!(
                    "conf has no plugins so removing plugins directory {}",
                    self.plugins_root.display()
                ));
                filesystem::remove_dir(&self.plugins_root)?;
                CleanReport {
                    removed_root: true,
                    removed: Vec::new(),
                }
            }
            CleanPlan::Remove(paths) => {
                for path in &paths {
                    self.log
                        .debug(format_args!("removing plugin {}", path.display()));
                    filesystem::remove_dir(path)?;
                    self.log.info(format_args!("removed {}", display_name(path)));
                }
                CleanReport {
                    removed_root: false,
                    removed: paths,
                }
            }
        };
        self.log.debug(format_args!("finished cleaning plugins"));

        Ok(report)
    }

    fn require_fetcher(&self) -> Result<()> {
        self.log.debug(format_args!("checking if git is installed"));
        if self.fetcher.is_available() {
            Ok(())
        } else {
            Err(Error::GitUnavailable)
        }
    }
}

fn join_display(plugins: &[PluginReference]) -> String {
    plugins
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
