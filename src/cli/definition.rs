//! CLI argument definitions

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use super::tasks::TaskCommands;

/// Pomodoro timer and to-do list for the terminal
#[derive(Parser, Debug)]
#[command(name = "pomofocus", version, about)]
#[command(
    long_about = "Pomodoro timer and to-do list for the terminal.\n\nRun without a subcommand to open the TUI."
)]
pub struct Cli {
    /// Work session length in minutes (overrides config.toml)
    #[arg(long, value_name = "MIN", value_parser = clap::value_parser!(u32).range(1..))]
    pub work: Option<u32>,

    /// Break length in minutes (overrides config.toml)
    #[arg(
        long = "break",
        value_name = "MIN",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub break_minutes: Option<u32>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the to-do list without opening the TUI
    Tasks {
        #[command(subcommand)]
        command: TaskCommands,
    },

    /// Play the completion chime once
    Chime,

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
