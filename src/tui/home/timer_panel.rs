//! Timer panel: mode tabs, countdown, progress and control buttons

use ratatui::layout::Flex;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::timer::{Mode, Timer};
use crate::tui::components::button::{layout_buttons, render_button};
use crate::tui::styles::Theme;

/// Rows the panel needs inside its border
pub(super) const CONTENT_HEIGHT: u16 = 7;

/// Button areas from the last render, used for mouse hit-testing
#[derive(Debug, Clone, Default)]
pub(super) struct TimerHits {
    pub tabs: Vec<(Mode, Rect)>,
    pub start: Rect,
    pub reset: Rect,
    pub settings: Rect,
}

pub(super) fn render_timer_panel(
    frame: &mut Frame,
    area: Rect,
    timer: &Timer,
    theme: &Theme,
) -> TimerHits {
    let accent = theme.accent(timer.mode());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(" Pomofocus ")
        .title_style(Style::default().fg(theme.title).bold());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // mode tabs
            Constraint::Length(1),
            Constraint::Length(1), // MM:SS
            Constraint::Length(1),
            Constraint::Length(1), // progress
            Constraint::Length(1),
            Constraint::Length(1), // buttons
        ])
        .flex(Flex::Center)
        .split(inner);

    let mut hits = TimerHits::default();

    let labels: Vec<&str> = Mode::ALL.iter().map(Mode::label).collect();
    for (mode, rect) in Mode::ALL.into_iter().zip(layout_buttons(rows[0], &labels, 2)) {
        render_button(frame, rect, mode.label(), mode == timer.mode(), accent, theme);
        hits.tabs.push((mode, rect));
    }

    let time_style = if timer.is_flashing() {
        Style::default().fg(theme.background).bg(accent).bold()
    } else {
        Style::default().fg(theme.title).bold()
    };
    frame.render_widget(
        Paragraph::new(Span::styled(format!(" {} ", timer.display()), time_style))
            .alignment(Alignment::Center),
        rows[2],
    );

    let gauge_area = Rect {
        x: rows[4].x + rows[4].width / 6,
        width: rows[4].width - rows[4].width / 3,
        ..rows[4]
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(accent).bg(theme.selection))
        .ratio(timer.progress().clamp(0.0, 1.0))
        .label("");
    frame.render_widget(gauge, gauge_area);

    let start_label = if timer.is_running() { "Pause" } else { "Start" };
    let buttons = layout_buttons(rows[6], &[start_label, "Reset", "Settings"], 2);
    render_button(frame, buttons[0], start_label, timer.is_running(), accent, theme);
    render_button(frame, buttons[1], "Reset", false, accent, theme);
    render_button(frame, buttons[2], "Settings", false, accent, theme);
    hits.start = buttons[0];
    hits.reset = buttons[1];
    hits.settings = buttons[2];

    hits
}
