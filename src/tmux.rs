//! # tmux Binder
//!
//! Reads and sets tmux options, global environment variables and key
//! bindings through the `tmux` binary. The `Binder` trait lets `source` be
//! tested without a running tmux server.

use std::process::{Command, Output};

use crate::error::{Error, Result};

/// Trait for talking to the terminal multiplexer - allows mocking in tests
pub trait Binder {
    /// Value of a global option; empty when the option is unset.
    fn get_option(&self, name: &str) -> Result<String>;

    /// Value of a global environment variable; `None` when unset.
    fn get_environment(&self, name: &str) -> Result<Option<String>>;

    /// Sets a global environment variable.
    fn set_environment(&self, name: &str, value: &str) -> Result<()>;

    /// Binds `key` (prefix table) to run `command` in a shell.
    fn bind_key(&self, key: &str, command: &str) -> Result<()>;
}

/// The default implementation of `Binder`, which runs the `tmux` binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct TmuxBinder;

impl TmuxBinder {
    fn run(args: &[&str]) -> Result<Output> {
        Command::new("tmux")
            .args(args)
            .output()
            .map_err(|e| Error::External {
                command: command_line(args),
                code: None,
                stderr: e.to_string(),
            })
    }
}

impl Binder for TmuxBinder {
    fn get_option(&self, name: &str) -> Result<String> {
        let args = ["show-option", "-gqv", name];
        let output = Self::run(&args)?;
        match output.status.code() {
            Some(0) => Ok(String::from_utf8_lossy(&output.stdout).trim().to_string()),
            Some(1) => Ok(String::new()),
            code => Err(external_failure(&args, code, &output)),
        }
    }

    fn get_environment(&self, name: &str) -> Result<Option<String>> {
        let args = ["show-environment", "-g", name];
        let output = Self::run(&args)?;
        match output.status.code() {
            Some(0) => Ok(parse_environment_line(
                &String::from_utf8_lossy(&output.stdout),
                name,
            )),
            Some(1) => Ok(None),
            code => Err(external_failure(&args, code, &output)),
        }
    }

    fn set_environment(&self, name: &str, value: &str) -> Result<()> {
        let args = ["set-environment", "-g", name, value];
        let output = Self::run(&args)?;
        if !output.status.success() {
            return Err(external_failure(&args, output.status.code(), &output));
        }
        Ok(())
    }

    fn bind_key(&self, key: &str, command: &str) -> Result<()> {
        let args = ["bind-key", key, "run-shell", command];
        let output = Self::run(&args)?;
        if !output.status.success() {
            return Err(external_failure(&args, output.status.code(), &output));
        }
        Ok(())
    }
}

/// Extracts the value from `show-environment` output (`NAME=value`).
///
/// tmux prints `-NAME` for a variable marked as removed, which counts as
/// unset.
pub fn parse_environment_line(output: &str, name: &str) -> Option<String> {
    output.lines().find_map(|line| {
        line.strip_prefix(name)
            .and_then(|rest| rest.strip_prefix('='))
            .map(str::to_string)
    })
}

fn command_line(args: &[&str]) -> String {
    format!("tmux {}", args.join(" "))
}

fn external_failure(args: &[&str], code: Option<i32>, output: &Output) -> Error {
    Error::External {
        command: command_line(args),
        code,
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}
