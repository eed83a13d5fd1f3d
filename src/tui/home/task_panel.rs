//! Task list panel: input line, selectable rows, per-row checkbox and delete

use crossterm::event::{Event, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;
use unicode_width::UnicodeWidthStr;

use crate::task::{Task, TaskManager};
use crate::tui::components::button::contains;
use crate::tui::components::render_text_field;
use crate::tui::styles::Theme;

const DELETE_GLYPH: &str = "×";
const INPUT_LABEL: &str = "New task:";

/// Clickable cells of one rendered task row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct TaskRowHit {
    pub index: usize,
    pub id: i64,
    pub row: Rect,
    pub checkbox: Rect,
    pub delete: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TaskClick {
    Toggle(i64),
    Delete(i64),
    Select,
    FocusInput,
    Outside,
}

#[derive(Default)]
pub(super) struct TaskPanel {
    cursor: usize,
    scroll: usize,
    input: Input,
    editing: bool,

    input_area: Rect,
    rows: Vec<TaskRowHit>,
}

impl TaskPanel {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn input_value(&self) -> &str {
        self.input.value()
    }

    pub fn set_editing(&mut self, editing: bool) {
        self.editing = editing;
    }

    pub fn clear_input(&mut self) {
        self.input.reset();
    }

    pub fn handle_input_key(&mut self, key: KeyEvent) {
        self.input.handle_event(&Event::Key(key));
    }

    pub fn move_cursor(&mut self, delta: i32, len: usize) {
        if len == 0 {
            return;
        }
        self.cursor = if delta < 0 {
            self.cursor.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            (self.cursor + delta as usize).min(len - 1)
        };
    }

    pub fn select(&mut self, index: usize, len: usize) {
        self.cursor = index;
        self.clamp(len);
    }

    /// Keeps the cursor on a valid row after the list shrinks
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    pub fn selected<'a>(&self, tasks: &'a TaskManager) -> Option<&'a Task> {
        tasks.tasks().get(self.cursor)
    }

    pub(super) fn row_hits(&self) -> &[TaskRowHit] {
        &self.rows
    }

    pub(super) fn input_area(&self) -> Rect {
        self.input_area
    }

    /// Resolves a click against the last render. The delete cell is tested
    /// first so it never falls through to the checkbox or row.
    pub fn handle_click(&mut self, column: u16, row: u16) -> TaskClick {
        if contains(self.input_area, column, row) {
            self.editing = true;
            return TaskClick::FocusInput;
        }

        let hit = self
            .rows
            .iter()
            .find(|hit| contains(hit.row, column, row))
            .copied();
        let Some(hit) = hit else {
            return TaskClick::Outside;
        };

        self.editing = false;
        self.cursor = hit.index;
        if contains(hit.delete, column, row) {
            TaskClick::Delete(hit.id)
        } else if contains(hit.checkbox, column, row) {
            TaskClick::Toggle(hit.id)
        } else {
            TaskClick::Select
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        tasks: &TaskManager,
        theme: &Theme,
        accent: Color,
    ) {
        let border = if self.editing { accent } else { theme.border };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(format!(
                " Tasks ({}/{}) ",
                tasks.completed_count(),
                tasks.len()
            ))
            .title_style(Style::default().fg(theme.title).bold());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        render_text_field(
            frame,
            chunks[0],
            INPUT_LABEL,
            &self.input,
            self.editing,
            Some("press a to add a task"),
            theme,
        );
        self.input_area = chunks[0];

        self.rows.clear();
        let list_area = chunks[2];
        if tasks.is_empty() {
            let empty = Paragraph::new("No tasks yet")
                .style(Style::default().fg(theme.dimmed))
                .alignment(Alignment::Center);
            frame.render_widget(empty, list_area);
            return;
        }

        self.clamp(tasks.len());
        let visible = list_area.height as usize;
        if visible == 0 {
            return;
        }
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + visible {
            self.scroll = self.cursor + 1 - visible;
        }
        self.scroll = self.scroll.min(tasks.len().saturating_sub(visible));

        for (offset, task) in tasks
            .tasks()
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(visible)
        {
            let row = Rect {
                x: list_area.x,
                y: list_area.y + (offset - self.scroll) as u16,
                width: list_area.width,
                height: 1,
            };
            let hit = self.render_row(frame, row, offset, task, theme);
            self.rows.push(hit);
        }
    }

    fn render_row(
        &self,
        frame: &mut Frame,
        row: Rect,
        index: usize,
        task: &Task,
        theme: &Theme,
    ) -> TaskRowHit {
        let is_selected = index == self.cursor;
        let checkbox = task.checkbox();
        let checkbox_width = checkbox.width() as u16;

        let checkbox_style = if task.completed {
            Style::default().fg(theme.completed)
        } else {
            Style::default().fg(theme.dimmed)
        };
        let text_style = if task.completed {
            Style::default().fg(theme.dimmed).crossed_out()
        } else {
            Style::default().fg(theme.text)
        };

        let delete_x = row.x + row.width.saturating_sub(2);
        let text_width = delete_x.saturating_sub(row.x + checkbox_width + 1) as usize;
        let text: String = truncate_to_width(&task.text, text_width);

        let line = Line::from(vec![
            Span::styled(checkbox, checkbox_style),
            Span::raw(" "),
            Span::styled(text, text_style),
        ]);
        let row_style = if is_selected {
            Style::default().bg(theme.selection)
        } else {
            Style::default()
        };
        frame.render_widget(Paragraph::new(line).style(row_style), row);

        let delete = Rect {
            x: delete_x,
            y: row.y,
            width: row.width.min(1),
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Span::styled(DELETE_GLYPH, Style::default().fg(theme.error)))
                .style(row_style),
            delete,
        );

        TaskRowHit {
            index,
            id: task.id,
            row,
            checkbox: Rect {
                x: row.x,
                y: row.y,
                width: checkbox_width.min(row.width),
                height: 1,
            },
            delete,
        }
    }
}

fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
