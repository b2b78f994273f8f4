//! Default values for muxplug configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Base URL plugins are cloned from when `--git-host` is not given.
pub const DEFAULT_GIT_HOST: &str = "https://github.com";

/// Environment variable tmux plugins read to find the plugins root.
pub const PLUGIN_PATH_ENV: &str = "TMUX_PLUGIN_MANAGER_PATH";

/// Plugin directory skipped by `source`; it bootstraps the manager itself.
pub const BOOTSTRAP_PLUGIN: &str = "tpm";

/// Extension of the executable script each plugin ships for sourcing.
pub const PLUGIN_SCRIPT_EXTENSION: &str = "tmux";

/// Name of the plugins directory inside the tmux configuration directory.
pub const PLUGINS_DIR_NAME: &str = "plugins";

/// Key binding options read at `source` time: (tmux option, default key, subcommand).
pub const KEY_BINDINGS: [(&str, &str, &str); 3] = [
    ("@tpm-install", "I", "install"),
    ("@tpm-update", "U", "update"),
    ("@tpm-clean", "M-u", "clean"),
];

/// Returns the user's home directory.
///
/// `$HOME` wins when set and non-empty; otherwise the platform home directory
/// from `dirs` is used, falling back to the current directory.
pub fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}
