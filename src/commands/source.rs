//! # Source Command Implementation
//!
//! Meant to be run from the end of the tmux configuration:
//!
//! ```text
//! run 'muxplug source'
//! ```
//!
//! Publishes the plugins directory to tmux, binds the install/update/clean
//! keys to this binary, and runs each installed plugin's `*.tmux` script.

use anyhow::Result;
use clap::Args;

use muxplug::source;
use muxplug::tmux::TmuxBinder;

use super::Context;

/// Bind keys and source installed plugins into tmux
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Command the key bindings run (defaults to the path of this binary)
    #[arg(long, value_name = "CMD")]
    pub program: Option<String>,
}

/// Execute the `source` command.
pub fn execute(args: SourceArgs, ctx: &Context) -> Result<()> {
    let settings = ctx.settings()?;
    let declared = settings.declared_plugins(&ctx.log)?;

    let program = match args.program {
        Some(program) => program,
        None => std::env::current_exe()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| env!("CARGO_PKG_NAME").to_string()),
    };

    let report = source::source(
        &TmuxBinder,
        &declared,
        &settings.plugins_root,
        &program,
        &ctx.log,
    )?;

    ctx.log.debug(format_args!(
        "sourced {} script(s), skipped {}",
        report.sourced.len(),
        report.skipped.len()
    ));
    Ok(())
}
