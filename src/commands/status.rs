//! # Status Command Implementation
//!
//! Shows what `install`, `update` and `clean` would do without touching the
//! plugins directory or running git.
//!
//! ```text
//! + tmux-plugins/tmux-yank        not installed yet
//! ~ /home/me/.tmux/plugins/tpm    installed, updated by `update`
//! - /home/me/.tmux/plugins/old    no longer declared, removed by `clean`
//! ```

use anyhow::Result;
use clap::Args;

use muxplug::fetcher::GitFetcher;
use muxplug::output::Action;
use muxplug::reconcile::{ReconciliationDecision, Reconciler};

use super::Context;

/// Show what install, update and clean would do
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the `status` command.
pub fn execute(args: StatusArgs, ctx: &Context) -> Result<()> {
    let settings = ctx.settings()?;
    let declared = settings.declared_plugins(&ctx.log)?;

    let reconciler = Reconciler::new(
        &GitFetcher,
        &ctx.log,
        &settings.plugins_root,
        settings.git_host.clone(),
    );
    let decision = reconciler.status(&declared)?;

    if args.json {
        println!("{}", decision.to_json()?);
    } else {
        print_decision(&decision, ctx);
    }
    Ok(())
}

fn print_decision(decision: &ReconciliationDecision, ctx: &Context) {
    if decision.to_install.is_empty() && decision.to_remove.is_empty() {
        println!("{}", ctx.output.note("Plugins are in sync."));
    }
    for plugin in &decision.to_install {
        println!("{}", ctx.output.line(Action::Install, &plugin.to_string()));
    }
    for path in &decision.to_update {
        println!(
            "{}",
            ctx.output.line(Action::Update, &path.display().to_string())
        );
    }
    for path in &decision.to_remove {
        println!(
            "{}",
            ctx.output.line(Action::Remove, &path.display().to_string())
        );
    }
}
