//! # Configuration
//!
//! Locates the tmux configuration file, extracts the declared plugin
//! references from it, and resolves the settings every command works from
//! (plugins root and git host).
//!
//! ## Locating the file
//!
//! Candidates are checked in order and the first existing file wins:
//!
//! 1. `$XDG_CONFIG_HOME/tmux/tmux.conf` (skipped when the variable is unset
//!    or empty)
//! 2. `$HOME/.config/tmux/tmux.conf`
//! 3. `$HOME/.tmux.conf`
//!
//! ## Declarations
//!
//! A line declares a plugin when it matches
//! `^\s*set\s+-g\s+@plugin\s+['"]([^'"]+)['"]`. Everything else, including
//! commented-out declarations, is ignored. Order is preserved and duplicates
//! are passed through.

use regex::Regex;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use url::Url;

use crate::defaults;
use crate::error::{Error, Result};
use crate::logging::LogContext;

const PLUGIN_PATTERN: &str = r#"^\s*set\s+-g\s+@plugin\s+['"]([^'"]+)['"]"#;

/// Directories the configuration file is searched in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPaths {
    pub xdg_config_home: Option<PathBuf>,
    pub home: PathBuf,
}

impl SearchPaths {
    /// Reads `XDG_CONFIG_HOME` and `HOME` from the process environment.
    pub fn from_env() -> Self {
        Self {
            xdg_config_home: std::env::var_os("XDG_CONFIG_HOME")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            home: defaults::home_dir(),
        }
    }

    /// Candidate configuration files, most preferred first.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::with_capacity(3);
        if let Some(xdg) = &self.xdg_config_home {
            candidates.push(xdg.join("tmux").join("tmux.conf"));
        }
        candidates.push(self.home.join(".config").join("tmux").join("tmux.conf"));
        candidates.push(self.home.join(".tmux.conf"));
        candidates
    }
}

/// Returns the first candidate configuration file that exists.
///
/// A candidate that is missing, or whose parent is not a directory, is
/// skipped; any other failure to inspect it is an I/O error.
pub fn locate(search: &SearchPaths, log: &LogContext) -> Result<PathBuf> {
    let candidates = search.candidates();
    for candidate in &candidates {
        match fs::metadata(candidate) {
            Ok(metadata) if metadata.is_file() => {
                log.debug(format_args!("found tmux conf file at {}", candidate.display()));
                return Ok(candidate.clone());
            }
            Ok(_) => {}
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {}
            Err(e) => return Err(Error::Io(e)),
        }
        log.debug(format_args!(
            "tmux conf file not found at {}",
            candidate.display()
        ));
    }
    Err(Error::ConfigNotFound {
        searched: candidates,
    })
}

/// Reads the declared plugin references from the file at `path`.
///
/// A file without any declarations yields an empty list. Bytes that are not
/// valid UTF-8 are replaced, so a stray Latin-1 comment does not hide the
/// declarations around it.
pub fn parse_plugins(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_plugin_lines(&String::from_utf8_lossy(&bytes))
}

/// Extracts declared plugin references from configuration text.
pub fn parse_plugin_lines(content: &str) -> Result<Vec<String>> {
    let pattern = Regex::new(PLUGIN_PATTERN)?;
    Ok(content
        .lines()
        .filter_map(|line| pattern.captures(line))
        .map(|captures| captures[1].to_string())
        .collect())
}

/// Default plugins root for a configuration file.
///
/// A dotfile configuration such as `~/.tmux.conf` keeps its plugins in
/// `~/.tmux/plugins`; a configuration inside a directory such as
/// `~/.config/tmux/tmux.conf` keeps them next to it in `plugins/`.
pub fn default_plugins_root(config_path: &Path) -> PathBuf {
    let dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let is_dotfile = config_path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'));
    if is_dotfile {
        dir.join(".tmux").join(defaults::PLUGINS_DIR_NAME)
    } else {
        dir.join(defaults::PLUGINS_DIR_NAME)
    }
}

/// Parses the base URL plugins are cloned from.
pub fn parse_git_host(host: &str) -> Result<Url> {
    let mut url = Url::parse(host).map_err(|e| Error::InvalidHost {
        host: host.to_string(),
        message: e.to_string(),
    })?;
    if !matches!(url.scheme(), "https" | "http" | "ssh" | "git" | "file") {
        return Err(Error::InvalidHost {
            host: host.to_string(),
            message: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// User-supplied overrides, typically from CLI flags or their environment
/// variables.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub plugins_dir: Option<PathBuf>,
    pub git_host: Option<String>,
}

/// Everything a command needs to know about where things live.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config_path: PathBuf,
    pub plugins_root: PathBuf,
    pub git_host: Url,
}

impl Settings {
    /// Resolves settings from overrides, falling back to the standard
    /// locations in `search`.
    pub fn resolve(overrides: &Overrides, search: &SearchPaths, log: &LogContext) -> Result<Self> {
        let config_path = match &overrides.config {
            Some(path) if path.is_file() => path.clone(),
            Some(path) => {
                return Err(Error::ConfigNotFound {
                    searched: vec![path.clone()],
                })
            }
            None => locate(search, log)?,
        };

        let plugins_root = overrides
            .plugins_dir
            .clone()
            .unwrap_or_else(|| default_plugins_root(&config_path));
        log.debug(format_args!("plugins root is {}", plugins_root.display()));

        let git_host = parse_git_host(
            overrides
                .git_host
                .as_deref()
                .unwrap_or(defaults::DEFAULT_GIT_HOST),
        )?;

        Ok(Self {
            config_path,
            plugins_root,
            git_host,
        })
    }

    /// Declared plugin references, in configuration order.
    pub fn declared_plugins(&self, log: &LogContext) -> Result<Vec<String>> {
        log.debug(format_args!(
            "finding plugins from conf file {}",
            self.config_path.display()
        ));
        let plugins = parse_plugins(&self.config_path)?;
        log.debug(format_args!("configured plugins: {:?}", plugins));
        Ok(plugins)
    }
}
