//! Main TUI application

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use std::time::Duration;
use tokio::sync::mpsc::error::TryRecvError;

use super::home::HomeView;
use super::settings::SettingsManager;
use super::styles::Theme;
use crate::task::{TaskManager, TaskStore};
use crate::timer::{Durations, Scheduler, Surface, Timer, TimerEventReceiver};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct App {
    home: HomeView,
    should_quit: bool,
    theme: Theme,
}

impl App {
    /// Builds the timer, task list and settings overlay with their injected
    /// capabilities.
    pub fn new(
        durations: Durations,
        store: Box<dyn TaskStore>,
        scheduler: Box<dyn Scheduler>,
        surface: Box<dyn Surface>,
    ) -> Self {
        let timer = Timer::new(durations, scheduler, surface);
        let tasks = TaskManager::new(store);
        let settings = SettingsManager::new();

        Self {
            home: HomeView::new(timer, tasks, settings),
            should_quit: false,
            theme: Theme::default(),
        }
    }

    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
        timer_events: &mut TimerEventReceiver,
    ) -> Result<()> {
        terminal.clear()?;
        terminal.draw(|f| self.render(f))?;

        loop {
            let mut redraw = false;

            // Poll with short timeout for responsive input
            if event::poll(POLL_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key);
                        redraw = true;
                    }
                    Event::Mouse(mouse) => {
                        self.home.handle_mouse(mouse);
                        redraw = true;
                    }
                    Event::Resize(_, _) => redraw = true,
                    _ => {}
                }
            }

            loop {
                match timer_events.try_recv() {
                    Ok(timer_event) => {
                        self.home.handle_timer_event(timer_event);
                        redraw = true;
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        tracing::warn!("Timer event channel closed");
                        self.should_quit = true;
                        break;
                    }
                }
            }

            if self.should_quit {
                break;
            }

            if redraw {
                terminal.draw(|f| self.render(f))?;
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        self.home.render(frame, frame.area(), &self.theme);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if let Some(action) = self.home.handle_key(key) {
            match action {
                Action::Quit => self.should_quit = true,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
}
