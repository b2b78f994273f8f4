//! # Install Command Implementation
//!
//! Clones every plugin declared in the tmux configuration that has no
//! directory under the plugins root yet. Already-installed plugins are left
//! alone, so running it twice in a row clones nothing the second time.

use anyhow::Result;
use clap::Args;

use muxplug::fetcher::GitFetcher;
use muxplug::reconcile::Reconciler;

use super::Context;

/// Install plugins declared in the tmux configuration
#[derive(Args, Debug)]
pub struct InstallArgs {}

/// Execute the `install` command.
pub fn execute(_args: InstallArgs, ctx: &Context) -> Result<()> {
    let settings = ctx.settings()?;
    let declared = settings.declared_plugins(&ctx.log)?;

    let reconciler = Reconciler::new(
        &GitFetcher,
        &ctx.log,
        &settings.plugins_root,
        settings.git_host.clone(),
    );
    let installed = reconciler.install(&declared)?;

    match installed.len() {
        0 => println!("{}", ctx.output.note("All plugins are already installed.")),
        n => println!("{}", ctx.output.note(&format!("Installed {} plugin(s).", n))),
    }
    Ok(())
}
