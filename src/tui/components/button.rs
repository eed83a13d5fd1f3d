//! Clickable button row

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::tui::styles::Theme;

/// Bracketed label as drawn, e.g. `[ Start ]`
pub fn button_label(label: &str) -> String {
    format!("[ {} ]", label)
}

/// Lays out buttons left to right, centered in `area` on its first row.
///
/// The returned rects are used both for drawing and for mouse hit-testing,
/// so they always agree.
pub fn layout_buttons(area: Rect, labels: &[&str], gap: u16) -> Vec<Rect> {
    let widths: Vec<u16> = labels
        .iter()
        .map(|l| button_label(l).width() as u16)
        .collect();
    let total = widths.iter().sum::<u16>() + gap * (labels.len().saturating_sub(1) as u16);

    let mut x = area.x + area.width.saturating_sub(total) / 2;
    let right = area.x + area.width;
    widths
        .into_iter()
        .map(|w| {
            let width = w.min(right.saturating_sub(x));
            let rect = Rect {
                x,
                y: area.y,
                width,
                height: area.height.min(1),
            };
            x = (x + w + gap).min(right);
            rect
        })
        .collect()
}

pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    active: bool,
    accent: Color,
    theme: &Theme,
) {
    let style = if active {
        Style::default().fg(theme.background).bg(accent).bold()
    } else {
        Style::default().fg(accent)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(button_label(label), style)),
        area,
    );
}

pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    area.width > 0 && area.height > 0 && area.contains(Position::new(column, row))
}
