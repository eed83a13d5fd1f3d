//! Home view - timer, task list and overlays

mod task_panel;
mod timer_panel;

#[cfg(test)]
mod tests;

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::app::Action;
use super::components::button::contains;
use super::components::HelpOverlay;
use super::settings::{SettingsAction, SettingsManager};
use super::styles::Theme;
use crate::task::TaskManager;
use crate::timer::{Mode, Timer, TimerEvent};
use task_panel::{TaskClick, TaskPanel};
use timer_panel::{render_timer_panel, TimerHits, CONTENT_HEIGHT};

/// Below this width the panels stack vertically
const SIDE_BY_SIDE_MIN_WIDTH: u16 = 80;

pub struct HomeView {
    timer: Timer,
    tasks: TaskManager,
    settings: SettingsManager,

    // UI state
    task_panel: TaskPanel,
    timer_hits: TimerHits,
    show_help: bool,
    status: Option<String>,
}

impl HomeView {
    pub fn new(timer: Timer, tasks: TaskManager, settings: SettingsManager) -> Self {
        Self {
            timer,
            tasks,
            settings,
            task_panel: TaskPanel::default(),
            timer_hits: TimerHits::default(),
            show_help: false,
            status: None,
        }
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn tasks(&self) -> &TaskManager {
        &self.tasks
    }

    /// True while an overlay or the task input owns the keyboard
    pub fn has_dialog(&self) -> bool {
        self.show_help || self.settings.is_open() || self.task_panel.is_editing()
    }

    pub fn handle_timer_event(&mut self, event: TimerEvent) {
        self.timer.handle_event(event);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        self.status = None;

        if self.show_help {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return None;
        }

        if self.settings.is_open() {
            let action = self.settings.handle_key(key);
            self.apply_settings(action);
            return None;
        }

        if self.task_panel.is_editing() {
            match key.code {
                KeyCode::Esc => self.task_panel.set_editing(false),
                KeyCode::Enter => self.add_task(),
                _ => self.task_panel.handle_input_key(key),
            }
            return None;
        }

        match key.code {
            KeyCode::Char('q') => return Some(Action::Quit),
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char(' ') => self.timer.toggle(),
            KeyCode::Char('r') => self.timer.reset(),
            KeyCode::Char('w') | KeyCode::Char('1') => self.timer.switch_mode(Mode::Work),
            KeyCode::Char('b') | KeyCode::Char('2') => self.timer.switch_mode(Mode::Break),
            KeyCode::Char('s') => self.settings.open(self.timer.durations()),
            KeyCode::Char('a') | KeyCode::Char('i') => self.task_panel.set_editing(true),
            KeyCode::Char('j') | KeyCode::Down => {
                self.task_panel.move_cursor(1, self.tasks.len());
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.task_panel.move_cursor(-1, self.tasks.len());
            }
            KeyCode::Char('g') | KeyCode::Home => self.task_panel.select(0, self.tasks.len()),
            KeyCode::Char('G') | KeyCode::End => {
                let len = self.tasks.len();
                self.task_panel.select(len.saturating_sub(1), len);
            }
            KeyCode::Char('x') | KeyCode::Enter => {
                if let Some(id) = self.task_panel.selected(&self.tasks).map(|t| t.id) {
                    self.toggle_task(id);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.task_panel.selected(&self.tasks).map(|t| t.id) {
                    self.delete_task(id);
                }
            }
            _ => {}
        }

        None
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {}
            MouseEventKind::ScrollDown if !self.has_overlay() => {
                self.task_panel.move_cursor(1, self.tasks.len());
                return;
            }
            MouseEventKind::ScrollUp if !self.has_overlay() => {
                self.task_panel.move_cursor(-1, self.tasks.len());
                return;
            }
            _ => return,
        }

        self.status = None;

        if self.show_help {
            self.show_help = false;
            return;
        }

        if self.settings.is_open() {
            let action = self.settings.handle_click(column, row);
            self.apply_settings(action);
            return;
        }

        if let Some(mode) = self
            .timer_hits
            .tabs
            .iter()
            .find(|(_, rect)| contains(*rect, column, row))
            .map(|(mode, _)| *mode)
        {
            self.task_panel.set_editing(false);
            self.timer.switch_mode(mode);
            return;
        }
        if contains(self.timer_hits.start, column, row) {
            self.task_panel.set_editing(false);
            self.timer.toggle();
            return;
        }
        if contains(self.timer_hits.reset, column, row) {
            self.task_panel.set_editing(false);
            self.timer.reset();
            return;
        }
        if contains(self.timer_hits.settings, column, row) {
            self.task_panel.set_editing(false);
            self.settings.open(self.timer.durations());
            return;
        }

        match self.task_panel.handle_click(column, row) {
            TaskClick::Delete(id) => self.delete_task(id),
            TaskClick::Toggle(id) => self.toggle_task(id),
            TaskClick::Select | TaskClick::FocusInput => {}
            TaskClick::Outside => self.task_panel.set_editing(false),
        }
    }

    fn has_overlay(&self) -> bool {
        self.show_help || self.settings.is_open()
    }

    fn apply_settings(&mut self, action: SettingsAction) {
        if let SettingsAction::Apply { mode, minutes } = action {
            if self.timer.update_duration(mode, minutes) {
                tracing::info!("{} duration set to {} min", mode, minutes);
            }
        }
    }

    fn add_task(&mut self) {
        match self.tasks.add(self.task_panel.input_value()) {
            Ok(Some(_)) => {
                self.task_panel.clear_input();
                let len = self.tasks.len();
                self.task_panel.select(len - 1, len);
            }
            Ok(None) => {}
            Err(e) => self.report("Failed to save tasks", e),
        }
    }

    fn toggle_task(&mut self, id: i64) {
        if let Err(e) = self.tasks.toggle(id) {
            self.report("Failed to save tasks", e);
        }
    }

    fn delete_task(&mut self, id: i64) {
        if let Err(e) = self.tasks.delete(id) {
            self.report("Failed to save tasks", e);
        }
        self.task_panel.clamp(self.tasks.len());
    }

    fn report(&mut self, context: &str, error: anyhow::Error) {
        tracing::error!("{}: {}", context, error);
        self.status = Some(format!("{}: {}", context, error));
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        let chunks = if area.width >= SIDE_BY_SIDE_MIN_WIDTH {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                .split(main_chunks[0])
        } else {
            Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(CONTENT_HEIGHT + 2), Constraint::Min(0)])
                .split(main_chunks[0])
        };

        let accent = theme.accent(self.timer.mode());
        self.timer_hits = render_timer_panel(frame, chunks[0], &self.timer, theme);
        self.task_panel
            .render(frame, chunks[1], &self.tasks, theme, accent);
        self.render_status_bar(frame, main_chunks[1], theme);

        self.settings.render(frame, area, theme, accent);

        if self.show_help {
            HelpOverlay::render(frame, area, theme);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if let Some(message) = &self.status {
            let status = Paragraph::new(format!(" {}", message))
                .style(Style::default().fg(theme.error).bg(theme.selection));
            frame.render_widget(status, area);
            return;
        }

        let key_style = Style::default().fg(theme.accent(self.timer.mode())).bold();
        let desc_style = Style::default().fg(theme.dimmed);
        let sep_style = Style::default().fg(theme.border);

        let hints: &[(&str, &str)] = if self.task_panel.is_editing() {
            &[("Enter", "Add"), ("Esc", "Done")]
        } else {
            &[
                ("Space", "Start/Pause"),
                ("r", "Reset"),
                ("w/b", "Mode"),
                ("a", "Add task"),
                ("x", "Toggle"),
                ("d", "Delete"),
                ("s", "Settings"),
                ("?", "Help"),
                ("q", "Quit"),
            ]
        };

        let mut spans = Vec::new();
        for (i, (key, desc)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("│", sep_style));
            }
            spans.push(Span::styled(format!(" {}", key), key_style));
            spans.push(Span::styled(format!(" {} ", desc), desc_style));
        }

        let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.selection));
        frame.render_widget(status, area);
    }
}
