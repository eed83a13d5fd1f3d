//! TUI theme and styling

use ratatui::style::Color;

use crate::timer::Mode;

#[derive(Debug, Clone)]
pub struct Theme {
    // Background and borders
    pub background: Color,
    pub border: Color,
    pub selection: Color,

    // Text colors
    pub title: Color,
    pub text: Color,
    pub dimmed: Color,
    pub hint: Color,

    // Status colors
    pub completed: Color,
    pub error: Color,

    // Per-mode accents
    pub work: Color,
    pub rest: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::lavender()
    }
}

impl Theme {
    pub fn lavender() -> Self {
        Self {
            background: Color::Rgb(26, 22, 37),
            border: Color::Rgb(76, 64, 110),
            selection: Color::Rgb(45, 38, 66),

            title: Color::Rgb(237, 233, 254),
            text: Color::Rgb(226, 220, 245),
            dimmed: Color::Rgb(120, 110, 150),
            hint: Color::Rgb(167, 139, 250),

            completed: Color::Rgb(104, 211, 145),
            error: Color::Rgb(252, 129, 129),

            work: Color::Rgb(159, 122, 234),
            rest: Color::Rgb(214, 188, 250),
        }
    }

    /// Primary color while `mode` is active
    pub fn accent(&self, mode: Mode) -> Color {
        match mode {
            Mode::Work => self.work,
            Mode::Break => self.rest,
        }
    }
}
