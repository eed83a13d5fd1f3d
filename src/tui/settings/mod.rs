//! Settings overlay - timer durations
//!
//! The overlay is closed on every launch and its visibility is never
//! persisted. Duration fields are applied on confirm or blur, never per
//! keystroke; the owner of the timer applies the resulting
//! [`SettingsAction::Apply`].

mod input;
mod render;

use ratatui::layout::Rect;
use tui_input::Input;

use crate::timer::{Durations, Mode};

pub use input::SettingsAction;

pub struct SettingsManager {
    visible: bool,
    focus: Mode,
    work_input: Input,
    break_input: Input,
    /// Minutes last applied per mode, used to revert invalid edits
    applied: [u32; 2],

    // Hit areas from the last render
    panel: Rect,
    fields: Vec<(Mode, Rect)>,
    close_button: Rect,
}

fn slot(mode: Mode) -> usize {
    match mode {
        Mode::Work => 0,
        Mode::Break => 1,
    }
}

impl Default for SettingsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsManager {
    pub fn new() -> Self {
        Self {
            visible: false,
            focus: Mode::Work,
            work_input: Input::default(),
            break_input: Input::default(),
            applied: [0, 0],
            panel: Rect::default(),
            fields: Vec::new(),
            close_button: Rect::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    /// Shows the overlay with fields seeded from the current durations.
    pub fn open(&mut self, durations: Durations) {
        for mode in Mode::ALL {
            let minutes = durations.minutes(mode);
            self.applied[slot(mode)] = minutes;
            *self.input_mut(mode) = Input::new(minutes.to_string());
        }
        self.focus = Mode::Work;
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.panel = Rect::default();
        self.fields.clear();
        self.close_button = Rect::default();
    }

    pub fn focus(&self) -> Mode {
        self.focus
    }

    pub fn input(&self, mode: Mode) -> &Input {
        match mode {
            Mode::Work => &self.work_input,
            Mode::Break => &self.break_input,
        }
    }

    fn input_mut(&mut self, mode: Mode) -> &mut Input {
        match mode {
            Mode::Work => &mut self.work_input,
            Mode::Break => &mut self.break_input,
        }
    }

    /// Applies the focused field. Invalid or zero values revert to the last
    /// applied value; unchanged values produce no action.
    fn commit(&mut self) -> SettingsAction {
        let mode = self.focus;
        let applied = self.applied[slot(mode)];
        let parsed = self.input(mode).value().trim().parse::<u32>();

        match parsed {
            Ok(minutes) if minutes > 0 => {
                *self.input_mut(mode) = Input::new(minutes.to_string());
                if minutes == applied {
                    return SettingsAction::Continue;
                }
                self.applied[slot(mode)] = minutes;
                SettingsAction::Apply { mode, minutes }
            }
            _ => {
                tracing::debug!(
                    "Ignoring invalid {} duration {:?}",
                    mode,
                    self.input(mode).value()
                );
                *self.input_mut(mode) = Input::new(applied.to_string());
                SettingsAction::Continue
            }
        }
    }

    fn move_focus(&mut self, mode: Mode) -> SettingsAction {
        if mode == self.focus {
            return SettingsAction::Continue;
        }
        let action = self.commit();
        self.focus = mode;
        action
    }

    fn commit_and_close(&mut self) -> SettingsAction {
        let action = self.commit();
        self.close();
        action
    }
}
