//! # Update Command Implementation
//!
//! Pulls installed plugins and refreshes their submodules.
//!
//! - Without `--plugin`, every declared plugin is updated.
//! - With one or more `--plugin <name>`, only the declared plugins whose
//!   reference contains `<name>` are updated. Every name is checked against
//!   the configuration, and every selected plugin must be installed, before
//!   the first `git pull` runs.

use anyhow::Result;
use clap::Args;

use muxplug::fetcher::GitFetcher;
use muxplug::reconcile::Reconciler;

use super::Context;

/// Update installed plugins
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Plugin to update (repeatable); defaults to all declared plugins
    #[arg(short, long = "plugin", value_name = "NAME")]
    pub plugins: Vec<String>,
}

/// Execute the `update` command.
pub fn execute(args: UpdateArgs, ctx: &Context) -> Result<()> {
    let settings = ctx.settings()?;
    let declared = settings.declared_plugins(&ctx.log)?;

    let reconciler = Reconciler::new(
        &GitFetcher,
        &ctx.log,
        &settings.plugins_root,
        settings.git_host.clone(),
    );
    let updated = reconciler.update(&declared, &args.plugins)?;

    match updated.len() {
        0 => println!("{}", ctx.output.note("No plugins to update.")),
        n => println!("{}", ctx.output.note(&format!("Updated {} plugin(s).", n))),
    }
    Ok(())
}
