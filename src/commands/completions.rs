//! # Completions Command Implementation
//!
//! Prints a tab-completion script for `muxplug` and its subcommands,
//! generated from the clap definition by `clap_complete`.
//!
//! ## Supported Shells
//!
//! Bash, Zsh, Fish, PowerShell and Elvish.
//!
//! ## Example
//!
//! ```bash
//! muxplug completions bash > ~/.local/share/bash-completion/completions/muxplug
//! muxplug completions fish > ~/.config/fish/completions/muxplug.fish
//! ```

use anyhow::Result;
use clap::{Args, CommandFactory, ValueEnum};
use clap_complete::{generate, Shell};
use std::io;

use crate::cli::Cli;

/// Shell types for completion generation
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CompletionShell {
    /// Bourne Again Shell
    Bash,
    /// Z Shell
    Zsh,
    /// Fish Shell
    Fish,
    /// PowerShell
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish Shell
    Elvish,
}

impl From<CompletionShell> for Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => Shell::Bash,
            CompletionShell::Zsh => Shell::Zsh,
            CompletionShell::Fish => Shell::Fish,
            CompletionShell::PowerShell => Shell::PowerShell,
            CompletionShell::Elvish => Shell::Elvish,
        }
    }
}

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: CompletionShell,
}

/// Execute the `completions` command.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(Shell::from(args.shell), &mut cmd, name, &mut io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shell_maps_to_clap_complete() {
        for shell in CompletionShell::value_variants() {
            let _: Shell = (*shell).into();
        }
    }

    #[test]
    fn test_bash_script_names_subcommands() {
        let mut cmd = Cli::command();
        let mut buf = Vec::new();
        generate(Shell::Bash, &mut cmd, "muxplug", &mut buf);
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("muxplug"));
        assert!(script.contains("install"));
        assert!(script.contains("clean"));
    }
}
