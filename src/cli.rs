//! CLI argument parsing and command dispatch

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

use muxplug::config::Overrides;
use muxplug::logging::LogContext;
use muxplug::output::{ColorChoice, OutputConfig};

use crate::commands::{self, Context};

/// muxplug - Declarative plugin manager for tmux
#[derive(Parser, Debug)]
#[command(name = "muxplug")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// tmux configuration file (defaults to the first of
    /// $XDG_CONFIG_HOME/tmux/tmux.conf, ~/.config/tmux/tmux.conf, ~/.tmux.conf)
    #[arg(long, global = true, value_name = "FILE", env = "MUXPLUG_CONFIG")]
    config: Option<PathBuf>,

    /// Directory plugins are installed into
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        env = "TMUX_PLUGIN_MANAGER_PATH"
    )]
    plugins_dir: Option<PathBuf>,

    /// Base URL plugins are cloned from
    #[arg(long, global = true, value_name = "URL", env = "MUXPLUG_GIT_HOST")]
    git_host: Option<String>,

    /// Colorize output
    #[arg(long, global = true, value_name = "WHEN", value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Install plugins declared in the tmux configuration
    #[command(visible_alias = "i")]
    Install(commands::install::InstallArgs),

    /// Update installed plugins
    #[command(visible_alias = "u")]
    Update(commands::update::UpdateArgs),

    /// Remove plugins no longer declared in the tmux configuration
    #[command(visible_alias = "c")]
    Clean(commands::clean::CleanArgs),

    /// Bind keys and source installed plugins into tmux
    #[command(visible_alias = "s")]
    Source(commands::source::SourceArgs),

    /// Show what install, update and clean would do
    Status(commands::status::StatusArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let level: LevelFilter = self
            .log_level
            .parse()
            .map_err(|_| anyhow!("Invalid log level '{}'", self.log_level))?;

        let ctx = Context {
            log: LogContext::from_env(level),
            output: OutputConfig::new(self.color),
            overrides: Overrides {
                config: self.config,
                plugins_dir: self.plugins_dir,
                git_host: self.git_host,
            },
        };

        let result = match self.command {
            Commands::Install(args) => commands::install::execute(args, &ctx),
            Commands::Update(args) => commands::update::execute(args, &ctx),
            Commands::Clean(args) => commands::clean::execute(args, &ctx),
            Commands::Source(args) => commands::source::execute(args, &ctx),
            Commands::Status(args) => commands::status::execute(args, &ctx),
            Commands::Completions(args) => commands::completions::execute(args),
        };
        ctx.log.flush();
        result
    }
}
