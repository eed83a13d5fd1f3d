//! Terminal-backed timer surface

use crossterm::{execute, terminal::SetTitle};

use crate::sound::{self, SoundConfig, SoundError};
use crate::timer::Surface;

/// Writes the window title through crossterm and plays the synthesized chime.
pub struct TerminalSurface {
    sound: SoundConfig,
}

impl TerminalSurface {
    pub fn new(sound: SoundConfig) -> Self {
        Self { sound }
    }
}

impl Surface for TerminalSurface {
    fn set_title(&mut self, title: &str) {
        if let Err(e) = execute!(std::io::stdout(), SetTitle(title)) {
            tracing::debug!("Failed to set terminal title: {}", e);
        }
    }

    fn chime(&mut self) -> Result<(), SoundError> {
        sound::play_chime(&self.sound)
    }
}
