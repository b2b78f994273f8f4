//! # CLI Command Implementations
//!
//! One module per `muxplug` subcommand. Each module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` plus the shared
//!   [`Context`] and calls into the `muxplug` library.

use anyhow::Result;

use muxplug::config::{Overrides, SearchPaths, Settings};
use muxplug::logging::LogContext;
use muxplug::output::OutputConfig;

pub mod clean;
pub mod completions;
pub mod install;
pub mod source;
pub mod status;
pub mod update;

/// State shared by every command for one invocation.
pub struct Context {
    pub log: LogContext,
    pub output: OutputConfig,
    pub overrides: Overrides,
}

impl Context {
    /// Resolves the configuration file, plugins root and git host.
    pub fn settings(&self) -> Result<Settings> {
        Ok(Settings::resolve(
            &self.overrides,
            &SearchPaths::from_env(),
            &self.log,
        )?)
    }
}
