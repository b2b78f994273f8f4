//! # Clean Command Implementation
//!
//! Removes plugin directories that no declared reference matches. When the
//! configuration declares no plugins at all, the whole plugins directory is
//! removed.

use anyhow::Result;
use clap::Args;

use muxplug::fetcher::GitFetcher;
use muxplug::reconcile::Reconciler;

use super::Context;

/// Remove plugins no longer declared in the tmux configuration
#[derive(Args, Debug)]
pub struct CleanArgs {}

/// Execute the `clean` command.
pub fn execute(_args: CleanArgs, ctx: &Context) -> Result<()> {
    let settings = ctx.settings()?;
    let declared = settings.declared_plugins(&ctx.log)?;

    let reconciler = Reconciler::new(
        &GitFetcher,
        &ctx.log,
        &settings.plugins_root,
        settings.git_host.clone(),
    );
    let report = reconciler.clean(&declared)?;

    if report.removed_root {
        println!(
            "{}",
            ctx.output.note(&format!(
                "Removed plugins directory {}.",
                settings.plugins_root.display()
            ))
        );
    } else {
        match report.removed.len() {
            0 => println!("{}", ctx.output.note("Nothing to clean.")),
            n => println!("{}", ctx.output.note(&format!("Removed {} plugin(s).", n))),
        }
    }
    Ok(())
}
