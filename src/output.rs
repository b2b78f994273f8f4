//! # Output
//!
//! Human-facing lines printed by the commands. Per-plugin lines carry a
//! marker (`+`, `~`, `-`) that is coloured when the terminal allows it.
//!
//! Colour follows the `--color` flag; in `auto` mode it is disabled by
//! `NO_COLOR` (any value), `CLICOLOR=0`, `TERM=dumb` or a non-TTY stdout,
//! and forced on by `CLICOLOR_FORCE=1`.

use clap::ValueEnum;
use console::Style;
use std::env;

/// The `--color` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    Always,
    Never,
    #[default]
    Auto,
}

/// What a run does, or would do, to a plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Install,
    Update,
    Remove,
}

impl Action {
    fn marker(self) -> &'static str {
        match self {
            Action::Install => "+",
            Action::Update => "~",
            Action::Remove => "-",
        }
    }

    fn style(self) -> Style {
        match self {
            Action::Install => Style::new().green().bold(),
            Action::Update => Style::new().cyan().bold(),
            Action::Remove => Style::new().red().bold(),
        }
    }
}

/// Output configuration for controlling colors.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    pub fn new(choice: ColorChoice) -> Self {
        let use_color = match choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => detect_color_support(),
        };
        Self { use_color }
    }

    /// Formats one summary line, e.g. `+ tmux-plugins/tmux-yank`.
    pub fn line(&self, action: Action, subject: &str) -> String {
        let marker = action
            .style()
            .force_styling(self.use_color)
            .apply_to(action.marker());
        format!("{} {}", marker, subject)
    }

    /// Formats a dimmed informational line.
    pub fn note(&self, message: &str) -> String {
        Style::new()
            .dim()
            .force_styling(self.use_color)
            .apply_to(message)
            .to_string()
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new(ColorChoice::Auto)
    }
}

fn detect_color_support() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
        return false;
    }
    if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
        return true;
    }
    if env::var("TERM").is_ok_and(|v| v == "dumb") {
        return false;
    }
    console::Term::stdout().features().colors_supported()
}
