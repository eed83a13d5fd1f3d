//! Input handling for the settings overlay

use crossterm::event::{Event, KeyCode, KeyEvent};
use tui_input::backend::crossterm::EventHandler;

use super::SettingsManager;
use crate::timer::Mode;
use crate::tui::components::button::contains;

/// Result of handling an event in the settings overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    Continue,
    /// A duration field was confirmed with a new value
    Apply { mode: Mode, minutes: u32 },
}

fn other(mode: Mode) -> Mode {
    match mode {
        Mode::Work => Mode::Break,
        Mode::Break => Mode::Work,
    }
}

impl SettingsManager {
    pub fn handle_key(&mut self, key: KeyEvent) -> SettingsAction {
        match key.code {
            KeyCode::Esc => self.commit_and_close(),
            KeyCode::Enter => self.commit(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.move_focus(other(self.focus))
            }
            KeyCode::Char(c) if !c.is_ascii_digit() => SettingsAction::Continue,
            _ => {
                let focus = self.focus;
                self.input_mut(focus).handle_event(&Event::Key(key));
                SettingsAction::Continue
            }
        }
    }

    /// Mouse click at a terminal cell. Clicks outside the panel close it.
    pub fn handle_click(&mut self, column: u16, row: u16) -> SettingsAction {
        if contains(self.close_button, column, row) || !contains(self.panel, column, row) {
            return self.commit_and_close();
        }

        let clicked = self
            .fields
            .iter()
            .find(|(_, rect)| contains(*rect, column, row))
            .map(|(mode, _)| *mode);
        match clicked {
            Some(mode) => self.move_focus(mode),
            None => SettingsAction::Continue,
        }
    }
}
