//! Tests for HomeView

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;

use super::HomeView;
use crate::sound::SoundError;
use crate::task::{MemoryTaskStore, Task, TaskManager, TaskStore};
use crate::timer::{Durations, Mode, RepeatHandle, Scheduler, Surface, Timer, TimerEvent};
use crate::tui::app::Action;
use crate::tui::settings::SettingsManager;
use crate::tui::styles::Theme;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn click(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

/// Records armed generations; ticks are delivered by hand.
#[derive(Clone, Default)]
struct StepScheduler {
    armed: Rc<RefCell<Vec<u64>>>,
}

impl Scheduler for StepScheduler {
    fn schedule_repeat(&mut self, _period: Duration, generation: u64) -> RepeatHandle {
        self.armed.borrow_mut().push(generation);
        RepeatHandle::new(generation, || {})
    }

    fn schedule_once(&mut self, _delay: Duration, _event: TimerEvent) {}
}

struct SilentSurface;

impl Surface for SilentSurface {
    fn set_title(&mut self, _title: &str) {}

    fn chime(&mut self) -> Result<(), SoundError> {
        Ok(())
    }
}

struct ReadOnlyStore;

impl TaskStore for ReadOnlyStore {
    fn load(&self) -> Vec<Task> {
        Vec::new()
    }

    fn save(&self, _tasks: &[Task]) -> anyhow::Result<()> {
        anyhow::bail!("read-only file system")
    }
}

struct TestEnv {
    view: HomeView,
    store: MemoryTaskStore,
    scheduler: StepScheduler,
}

impl TestEnv {
    fn press(&mut self, code: KeyCode) -> Option<Action> {
        self.view.handle_key(key(code))
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(KeyCode::Char(c));
        }
    }

    fn tick(&mut self) {
        let generation = *self.scheduler.armed.borrow().last().unwrap();
        self.view.handle_timer_event(TimerEvent::Tick(generation));
    }

    fn draw(&mut self) {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|f| self.view.render(f, f.area(), &theme))
            .unwrap();
    }

    fn click_rect(&mut self, rect: Rect) {
        self.view.handle_mouse(click(rect.x, rect.y));
    }
}

fn create_test_env_with_tasks(tasks: Vec<Task>) -> TestEnv {
    let store = MemoryTaskStore::with_tasks(tasks);
    let scheduler = StepScheduler::default();
    let timer = Timer::new(
        Durations::from_minutes(25, 5),
        Box::new(scheduler.clone()),
        Box::new(SilentSurface),
    );
    let tasks = TaskManager::new(Box::new(store.clone()));
    let view = HomeView::new(timer, tasks, SettingsManager::new());
    TestEnv {
        view,
        store,
        scheduler,
    }
}

fn create_test_env() -> TestEnv {
    create_test_env_with_tasks(Vec::new())
}

fn three_tasks() -> Vec<Task> {
    vec![
        Task::new(1, "write report"),
        Task::new(2, "review PR"),
        Task::new(3, "stretch"),
    ]
}

#[test]
fn test_q_returns_quit_action() {
    let mut env = create_test_env();
    assert_eq!(env.press(KeyCode::Char('q')), Some(Action::Quit));
}

#[test]
fn test_question_mark_opens_help() {
    let mut env = create_test_env();
    env.press(KeyCode::Char('?'));
    assert!(env.view.show_help);
    assert!(env.view.has_dialog());
}

#[test]
fn test_help_closes_on_esc_and_swallows_q() {
    let mut env = create_test_env();
    env.press(KeyCode::Char('?'));
    env.press(KeyCode::Esc);
    assert!(!env.view.show_help);

    env.press(KeyCode::Char('?'));
    assert_eq!(env.press(KeyCode::Char('q')), None);
    assert!(!env.view.show_help);
}

#[test]
fn test_space_toggles_timer() {
    let mut env = create_test_env();
    env.press(KeyCode::Char(' '));
    assert!(env.view.timer().is_running());

    env.tick();
    env.tick();
    assert_eq!(env.view.timer().display(), "24:58");

    env.press(KeyCode::Char(' '));
    assert!(!env.view.timer().is_running());
}

#[test]
fn test_r_resets_timer() {
    let mut env = create_test_env();
    env.press(KeyCode::Char(' '));
    env.tick();
    env.press(KeyCode::Char('r'));
    assert!(!env.view.timer().is_running());
    assert_eq!(env.view.timer().display(), "25:00");
}

#[test]
fn test_mode_keys_switch_and_stop() {
    let mut env = create_test_env();
    env.press(KeyCode::Char(' '));
    env.press(KeyCode::Char('b'));
    assert_eq!(env.view.timer().mode(), Mode::Break);
    assert!(!env.view.timer().is_running());
    assert_eq!(env.view.timer().display(), "05:00");

    env.press(KeyCode::Char('1'));
    assert_eq!(env.view.timer().mode(), Mode::Work);
    env.press(KeyCode::Char('2'));
    assert_eq!(env.view.timer().mode(), Mode::Break);
    env.press(KeyCode::Char('w'));
    assert_eq!(env.view.timer().mode(), Mode::Work);
}

#[test]
fn test_settings_apply_updates_idle_timer() {
    let mut env = create_test_env();
    env.press(KeyCode::Char('s'));
    assert!(env.view.has_dialog());

    for _ in 0..3 {
        env.press(KeyCode::Backspace);
    }
    env.type_text("40");
    env.press(KeyCode::Enter);
    assert_eq!(env.view.timer().display(), "40:00");

    env.press(KeyCode::Esc);
    assert!(!env.view.has_dialog());
}

#[test]
fn test_settings_swallow_global_keys() {
    let mut env = create_test_env();
    env.press(KeyCode::Char('s'));
    assert_eq!(env.press(KeyCode::Char('q')), None);
    env.press(KeyCode::Char(' '));
    assert!(!env.view.timer().is_running());
}

#[test]
fn test_add_task_via_input() {
    let mut env = create_test_env();
    env.press(KeyCode::Char('a'));
    assert!(env.view.has_dialog());

    env.type_text("buy milk");
    env.press(KeyCode::Enter);

    assert_eq!(env.view.tasks().len(), 1);
    assert_eq!(env.view.tasks().tasks()[0].text, "buy milk");
    assert_eq!(env.store.saved().len(), 1);
    assert_eq!(env.view.task_panel.input_value(), "");
    assert!(env.view.task_panel.is_editing());
}

#[test]
fn test_failed_save_keeps_input_without_stacking_tasks() {
    let timer = Timer::new(
        Durations::from_minutes(25, 5),
        Box::new(StepScheduler::default()),
        Box::new(SilentSurface),
    );
    let tasks = TaskManager::new(Box::new(ReadOnlyStore));
    let mut view = HomeView::new(timer, tasks, SettingsManager::new());

    view.handle_key(key(KeyCode::Char('a')));
    for c in "buy milk".chars() {
        view.handle_key(key(KeyCode::Char(c)));
    }
    view.handle_key(key(KeyCode::Enter));
    view.handle_key(key(KeyCode::Enter));

    assert!(view.tasks().is_empty());
    assert_eq!(view.task_panel.input_value(), "buy milk");
    assert!(view
        .status
        .as_deref()
        .is_some_and(|s| s.contains("read-only file system")));
}

#[test]
fn test_blank_input_adds_nothing() {
    let mut env = create_test_env();
    env.press(KeyCode::Char('i'));
    env.type_text("   ");
    env.press(KeyCode::Enter);
    assert!(env.view.tasks().is_empty());
    assert_eq!(env.view.task_panel.input_value(), "   ");
}

#[test]
fn test_q_while_editing_is_typed() {
    let mut env = create_test_env();
    env.press(KeyCode::Char('a'));
    assert_eq!(env.press(KeyCode::Char('q')), None);
    assert_eq!(env.view.task_panel.input_value(), "q");

    env.press(KeyCode::Esc);
    assert!(!env.view.has_dialog());
    assert_eq!(env.press(KeyCode::Char('q')), Some(Action::Quit));
}

#[test]
fn test_cursor_navigation() {
    let mut env = create_test_env_with_tasks(three_tasks());
    assert_eq!(env.view.task_panel.cursor(), 0);

    env.press(KeyCode::Char('j'));
    env.press(KeyCode::Down);
    assert_eq!(env.view.task_panel.cursor(), 2);
    env.press(KeyCode::Char('j'));
    assert_eq!(env.view.task_panel.cursor(), 2);

    env.press(KeyCode::Char('k'));
    assert_eq!(env.view.task_panel.cursor(), 1);
    env.press(KeyCode::Char('g'));
    assert_eq!(env.view.task_panel.cursor(), 0);
    env.press(KeyCode::Char('G'));
    assert_eq!(env.view.task_panel.cursor(), 2);
}

#[test]
fn test_x_toggles_selected_task() {
    let mut env = create_test_env_with_tasks(three_tasks());
    env.press(KeyCode::Char('j'));
    env.press(KeyCode::Char('x'));

    assert!(env.view.tasks().get(2).unwrap().completed);
    assert!(!env.view.tasks().get(1).unwrap().completed);
    assert!(env.store.saved()[1].completed);

    env.press(KeyCode::Enter);
    assert!(!env.view.tasks().get(2).unwrap().completed);
}

#[test]
fn test_d_deletes_selected_and_clamps_cursor() {
    let mut env = create_test_env_with_tasks(three_tasks());
    env.press(KeyCode::Char('G'));
    env.press(KeyCode::Char('d'));

    assert_eq!(env.view.tasks().len(), 2);
    assert!(env.view.tasks().get(3).is_none());
    assert_eq!(env.view.task_panel.cursor(), 1);
    assert_eq!(env.store.saved().len(), 2);
}

#[test]
fn test_toggle_on_empty_list_is_noop() {
    let mut env = create_test_env();
    env.press(KeyCode::Char('x'));
    env.press(KeyCode::Char('d'));
    assert!(env.view.tasks().is_empty());
}

#[test]
fn test_click_start_and_mode_tabs() {
    let mut env = create_test_env();
    env.draw();

    let start = env.view.timer_hits.start;
    env.click_rect(start);
    assert!(env.view.timer().is_running());

    let (_, break_tab) = env.view.timer_hits.tabs[1];
    env.click_rect(break_tab);
    assert_eq!(env.view.timer().mode(), Mode::Break);
    assert!(!env.view.timer().is_running());
}

#[test]
fn test_click_reset() {
    let mut env = create_test_env();
    env.press(KeyCode::Char(' '));
    env.tick();
    env.draw();

    let reset = env.view.timer_hits.reset;
    env.click_rect(reset);
    assert!(!env.view.timer().is_running());
    assert_eq!(env.view.timer().display(), "25:00");
}

#[test]
fn test_click_settings_then_background_closes() {
    let mut env = create_test_env();
    env.draw();

    let settings = env.view.timer_hits.settings;
    env.click_rect(settings);
    assert!(env.view.settings.is_open());

    env.draw();
    env.view.handle_mouse(click(0, 0));
    assert!(!env.view.settings.is_open());
}

#[test]
fn test_click_checkbox_toggles() {
    let mut env = create_test_env_with_tasks(three_tasks());
    env.draw();

    let hit = env.view.task_panel.row_hits()[1];
    env.click_rect(hit.checkbox);
    assert!(env.view.tasks().get(2).unwrap().completed);
    assert_eq!(env.view.tasks().len(), 3);
}

#[test]
fn test_click_delete_never_toggles() {
    let mut env = create_test_env_with_tasks(three_tasks());
    env.draw();

    let hit = env.view.task_panel.row_hits()[0];
    env.click_rect(hit.delete);
    assert_eq!(env.view.tasks().len(), 2);
    assert!(env.view.tasks().get(1).is_none());
    assert!(env.view.tasks().tasks().iter().all(|t| !t.completed));
}

#[test]
fn test_click_input_starts_editing() {
    let mut env = create_test_env();
    env.draw();

    let input = env.view.task_panel.input_area();
    env.click_rect(input);
    assert!(env.view.task_panel.is_editing());

    env.view.handle_mouse(click(99, 29));
    assert!(!env.view.task_panel.is_editing());
}

#[test]
fn test_render_shows_tasks_and_time() {
    let mut env = create_test_env_with_tasks(three_tasks());
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    let theme = Theme::default();
    terminal
        .draw(|f| env.view.render(f, f.area(), &theme))
        .unwrap();

    let buffer = terminal.backend().buffer();
    let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
    assert!(text.contains("25:00"));
    assert!(text.contains("review PR"));
    assert!(text.contains("Tasks (0/3)"));
}

#[test]
fn test_narrow_terminal_stacks_panels() {
    let mut env = create_test_env_with_tasks(three_tasks());
    let mut terminal = Terminal::new(TestBackend::new(50, 30)).unwrap();
    let theme = Theme::default();
    terminal
        .draw(|f| env.view.render(f, f.area(), &theme))
        .unwrap();

    let hit = env.view.task_panel.row_hits()[0];
    assert!(hit.row.y > env.view.timer_hits.start.y);
}
