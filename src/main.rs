//! # muxplug CLI
//!
//! This is the binary entry point for the `muxplug` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Executing the appropriate command based on the parsed arguments.
//! - Handling top-level application errors: the first unrecovered error is
//!   printed to stderr and the process exits with status 1.
//!
//! The plugin management logic lives in the `muxplug` library crate; the
//! binary is a thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
