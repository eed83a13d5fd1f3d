//! pomofocus - Pomodoro timer and to-do list for the terminal

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use pomofocus::cli::{self, Cli, Commands};
use pomofocus::config::{get_app_dir, Config};
use pomofocus::tui;
use tracing_subscriber::EnvFilter;

/// Set to enable debug logging to `<app dir>/debug.log`
const DEBUG_ENV: &str = "POMOFOCUS_DEBUG";

/// The alternate screen owns stdout, so logs go to a file.
fn init_debug_logging() -> Result<()> {
    let path = get_app_dir()?.join("debug.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pomofocus=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::var_os(DEBUG_ENV).is_some() {
        if let Err(e) = init_debug_logging() {
            eprintln!("Warning: could not open debug log: {}", e);
        }
    }

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Completion { shell }) => {
            generate(shell, &mut Cli::command(), "pomofocus", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Tasks { command }) => cli::tasks::run(command),
        Some(Commands::Chime) => cli::chime::run(),
        None => {
            let mut config = Config::load_or_default();
            if let Some(work) = cli.work {
                config.timer.work_minutes = work;
            }
            if let Some(brk) = cli.break_minutes {
                config.timer.break_minutes = brk;
            }
            tracing::info!(
                "Starting TUI ({} min work, {} min break)",
                config.timer.work_minutes,
                config.timer.break_minutes
            );
            tui::run(config).await
        }
    }
}
