//! Terminal User Interface module

mod app;
mod components;
mod home;
pub mod settings;
mod styles;
mod surface;

pub use app::*;
pub use surface::TerminalSurface;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;

use crate::config::Config;
use crate::task::JsonTaskStore;
use crate::timer::TokioScheduler;

pub async fn run(config: Config) -> Result<()> {
    let store = JsonTaskStore::new()?;
    tracing::debug!("Task list at {}", store.path().display());
    let (scheduler, mut timer_events) = TokioScheduler::new();
    let surface = TerminalSurface::new(config.sound.clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(
        config.timer.durations(),
        Box::new(store),
        Box::new(scheduler),
        Box::new(surface),
    );
    let result = app.run(&mut terminal, &mut timer_events).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
