//! Loading installed plugins into a running tmux server.
//!
//! `source` is what the tmux configuration runs at startup
//! (`run 'muxplug source'`). It publishes the plugins root to tmux, binds the
//! install/update/clean keys, and then executes each declared plugin's
//! `*.tmux` script from inside the plugin directory.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::defaults::{self, BOOTSTRAP_PLUGIN, KEY_BINDINGS, PLUGIN_PATH_ENV};
use crate::error::{Error, Result};
use crate::filesystem;
use crate::logging::LogContext;
use crate::plugin::PluginReference;
use crate::tmux::Binder;

/// Outcome of a source run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceReport {
    /// Scripts executed, in order.
    pub sourced: Vec<PathBuf>,
    /// Plugin directories skipped because they bootstrap the manager.
    pub skipped: Vec<PathBuf>,
}

/// Sources every declared plugin.
///
/// `program` is how the key bindings invoke this tool, e.g. `muxplug`.
pub fn source(
    binder: &dyn Binder,
    declared: &[String],
    plugins_root: &Path,
    program: &str,
    log: &LogContext,
) -> Result<SourceReport> {
    publish_plugins_root(binder, plugins_root, log)?;

    log.debug(format_args!("binding keys"));
    bind_keys(binder, program, log)?;

    if declared.is_empty() {
        log.debug(format_args!("there are no plugins to source"));
        return Ok(SourceReport::default());
    }
    log.debug(format_args!("there are plugins to source: {:?}", declared));

    let mut plugin_paths: Vec<(&str, PathBuf)> = Vec::with_capacity(declared.len());
    for reference in declared {
        let plugin = PluginReference::parse(reference)?;
        let path = filesystem::plugin_path(plugins_root, plugin.dir_name());
        if !plugin_paths.iter().any(|(_, p)| *p == path) {
            plugin_paths.push((reference.as_str(), path));
        }
    }

    for (reference, path) in &plugin_paths {
        if !path.is_dir() {
            return Err(Error::NotInstalled {
                name: reference.to_string(),
            });
        }
    }

    let mut report = SourceReport::default();
    for (_, path) in plugin_paths {
        if path.file_name().is_some_and(|n| n == BOOTSTRAP_PLUGIN) {
            log.debug(format_args!("skipping {} plugin", BOOTSTRAP_PLUGIN));
            report.skipped.push(path);
            continue;
        }

        let script = find_script(&path)?;
        run_script(&script, &path, log)?;
        report.sourced.push(script);
    }
    log.debug(format_args!("completed sourcing plugins"));

    Ok(report)
}

/// Sets `TMUX_PLUGIN_MANAGER_PATH` in the tmux global environment unless it
/// is already set.
pub fn publish_plugins_root(
    binder: &dyn Binder,
    plugins_root: &Path,
    log: &LogContext,
) -> Result<()> {
    if let Some(existing) = binder.get_environment(PLUGIN_PATH_ENV)? {
        log.debug(format_args!(
            "{} already set to {}",
            PLUGIN_PATH_ENV, existing
        ));
        return Ok(());
    }
    log.debug(format_args!(
        "setting {} to {}",
        PLUGIN_PATH_ENV,
        plugins_root.display()
    ));
    binder.set_environment(PLUGIN_PATH_ENV, &plugins_root.to_string_lossy())
}

/// Binds the install, update and clean keys, honouring the user's
/// `@tpm-install`, `@tpm-update` and `@tpm-clean` options.
pub fn bind_keys(binder: &dyn Binder, program: &str, log: &LogContext) -> Result<()> {
    for (option, default_key, subcommand) in KEY_BINDINGS {
        let configured = binder.get_option(option)?;
        let key = if configured.is_empty() {
            default_key
        } else {
            configured.as_str()
        };
        log.debug(format_args!("binding {} key {}", subcommand, key));
        binder.bind_key(key, &format!("{} {}", program, subcommand))?;
    }
    Ok(())
}

/// The single `*.tmux` file directly inside `plugin_dir`.
pub fn find_script(plugin_dir: &Path) -> Result<PathBuf> {
    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(&plugin_dir.to_string_lossy()),
        defaults::PLUGIN_SCRIPT_EXTENSION
    );

    let mut scripts = glob::glob(&pattern)?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file());

    let script = scripts.next().ok_or_else(|| Error::Source {
        path: plugin_dir.to_path_buf(),
        message: format!(
            "failed to find *.{} file",
            defaults::PLUGIN_SCRIPT_EXTENSION
        ),
    })?;
    if scripts.next().is_some() {
        return Err(Error::Source {
            path: plugin_dir.to_path_buf(),
            message: format!(
                "there are multiple *.{} files, do not know which to source",
                defaults::PLUGIN_SCRIPT_EXTENSION
            ),
        });
    }
    Ok(script)
}

fn run_script(script: &Path, plugin_dir: &Path, log: &LogContext) -> Result<()> {
    let output = Command::new(script)
        .current_dir(plugin_dir)
        .output()
        .map_err(|e| Error::Source {
            path: plugin_dir.to_path_buf(),
            message: e.to_string(),
        })?;
    log.debug(format_args!(
        "attempted to source plugin {}: {}",
        plugin_dir.display(),
        String::from_utf8_lossy(&output.stdout).trim()
    ));
    if !output.status.success() {
        return Err(Error::External {
            command: script.display().to_string(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}
