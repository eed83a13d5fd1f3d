//! Rendering for the settings overlay

use ratatui::prelude::*;
use ratatui::widgets::*;

use super::SettingsManager;
use crate::timer::Mode;
use crate::tui::components::button::{layout_buttons, render_button};
use crate::tui::components::{centered_rect, render_text_field};
use crate::tui::styles::Theme;

const PANEL_WIDTH: u16 = 40;
const PANEL_HEIGHT: u16 = 10;

impl SettingsManager {
    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme, accent: Color) {
        if !self.visible {
            return;
        }

        // Fade whatever is behind the overlay
        frame
            .buffer_mut()
            .set_style(area, Style::default().fg(theme.dimmed));

        let panel = centered_rect(area, PANEL_WIDTH, PANEL_HEIGHT);
        frame.render_widget(Clear, panel);

        let block = Block::default()
            .style(Style::default().bg(theme.background))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .title(" Settings ")
            .title_style(Style::default().fg(theme.title).bold());

        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let labels = [(Mode::Work, "Work  (min):"), (Mode::Break, "Break (min):")];
        self.fields.clear();
        for (row, (mode, label)) in labels.into_iter().enumerate() {
            let is_focused = self.focus == mode;
            render_text_field(
                frame,
                chunks[row],
                label,
                self.input(mode),
                is_focused,
                None,
                theme,
            );
            self.fields.push((mode, chunks[row]));
        }

        let hint = Line::from(vec![
            Span::styled("Enter", Style::default().fg(theme.hint)),
            Span::raw(" apply  "),
            Span::styled("Tab", Style::default().fg(theme.hint)),
            Span::raw(" next  "),
            Span::styled("Esc", Style::default().fg(theme.hint)),
            Span::raw(" close"),
        ]);
        frame.render_widget(
            Paragraph::new(hint).style(Style::default().fg(theme.dimmed)),
            chunks[3],
        );

        let close = layout_buttons(chunks[5], &["Close"], 0)[0];
        render_button(frame, close, "Close", false, accent, theme);

        self.panel = panel;
        self.close_button = close;
    }
}
