//! TUI components

pub mod button;
mod help;
mod text_input;

pub use help::HelpOverlay;
pub use text_input::render_text_field;

use ratatui::layout::Rect;

/// Rect of at most `width` x `height`, centered in `area`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
