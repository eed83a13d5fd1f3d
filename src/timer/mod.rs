//! Countdown timer with work/break modes
//!
//! The timer owns its state and a single repeating tick. All side effects
//! go through two injected capabilities: a [`Scheduler`] for time and a
//! [`Surface`] for the window title and the completion chime.

mod scheduler;

pub use scheduler::{
    RepeatHandle, Scheduler, TimerEvent, TimerEventReceiver, TimerEventSender, TokioScheduler,
};

use std::fmt;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::sound::SoundError;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);
pub const FLASH_DURATION: Duration = Duration::from_secs(3);

const TITLE_SUFFIX: &str = " - Focus";
pub const DONE_TITLE: &str = "Done! - Focus";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Work,
    Break,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Work, Mode::Break];

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Work => "Work",
            Mode::Break => "Break",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Configured length of each mode, in seconds. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Durations {
    work: u32,
    brk: u32,
}

impl Durations {
    pub fn from_minutes(work: u32, brk: u32) -> Self {
        Self {
            work: work.max(1).saturating_mul(60),
            brk: brk.max(1).saturating_mul(60),
        }
    }

    pub fn get(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Work => self.work,
            Mode::Break => self.brk,
        }
    }

    pub fn minutes(&self, mode: Mode) -> u32 {
        self.get(mode) / 60
    }

    fn set(&mut self, mode: Mode, seconds: u32) {
        match mode {
            Mode::Work => self.work = seconds,
            Mode::Break => self.brk = seconds,
        }
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self::from_minutes(
            crate::config::DEFAULT_WORK_MINUTES,
            crate::config::DEFAULT_BREAK_MINUTES,
        )
    }
}

/// Platform side effects the timer needs.
pub trait Surface {
    fn set_title(&mut self, title: &str);
    fn chime(&mut self) -> Result<(), SoundError>;
}

/// `MM:SS`, both zero-padded. Minutes are not capped.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

pub struct Timer {
    mode: Mode,
    time_left: u32,
    durations: Durations,
    tick: Option<RepeatHandle>,
    flash: Option<u64>,
    generation: u64,
    scheduler: Box<dyn Scheduler>,
    surface: Box<dyn Surface>,
}

impl Timer {
    pub fn new(
        durations: Durations,
        scheduler: Box<dyn Scheduler>,
        surface: Box<dyn Surface>,
    ) -> Self {
        let mut timer = Self {
            mode: Mode::Work,
            time_left: durations.get(Mode::Work),
            durations,
            tick: None,
            flash: None,
            generation: 0,
            scheduler,
            surface,
        };
        timer.update_display();
        timer
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn durations(&self) -> Durations {
        self.durations
    }

    pub fn is_running(&self) -> bool {
        self.tick.is_some()
    }

    /// True during the completion flash window
    pub fn is_flashing(&self) -> bool {
        self.flash.is_some()
    }

    pub fn display(&self) -> String {
        format_time(self.time_left)
    }

    /// Fraction of the current mode already elapsed, in `0.0..=1.0`
    pub fn progress(&self) -> f64 {
        let total = self.durations.get(self.mode);
        if total == 0 {
            return 1.0;
        }
        1.0 - (f64::from(self.time_left.min(total)) / f64::from(total))
    }

    pub fn start(&mut self) {
        if self.is_running() || self.time_left == 0 {
            return;
        }
        let generation = self.next_generation();
        self.tick = Some(self.scheduler.schedule_repeat(TICK_PERIOD, generation));
        debug!("Timer started ({} mode, {}s left)", self.mode, self.time_left);
    }

    pub fn pause(&mut self) {
        if let Some(handle) = self.tick.take() {
            handle.cancel();
            debug!("Timer paused at {}s", self.time_left);
        }
    }

    /// The single start/pause control
    pub fn toggle(&mut self) {
        if self.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    pub fn reset(&mut self) {
        self.pause();
        self.time_left = self.durations.get(self.mode);
        self.update_display();
    }

    /// Switching always stops the timer, even mid-countdown.
    pub fn switch_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.time_left = self.durations.get(mode);
        self.update_display();
        self.pause();
    }

    /// Sets the length of `mode`. An idle timer showing that mode picks up
    /// the new length immediately; a running one keeps counting.
    ///
    /// Returns false (and changes nothing) for zero minutes.
    pub fn update_duration(&mut self, mode: Mode, minutes: u32) -> bool {
        if minutes == 0 {
            return false;
        }
        self.durations.set(mode, minutes.saturating_mul(60));
        if !self.is_running() && self.mode == mode {
            self.time_left = self.durations.get(mode);
            self.update_display();
        }
        true
    }

    pub fn handle_event(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Tick(generation) => {
                let current = self.tick.as_ref().map(RepeatHandle::generation);
                if current == Some(generation) {
                    self.tick();
                } else {
                    debug!("Dropping stale tick from generation {}", generation);
                }
            }
            TimerEvent::FlashExpired(generation) => {
                if self.flash == Some(generation) {
                    self.flash = None;
                    self.update_display();
                }
            }
        }
    }

    fn tick(&mut self) {
        self.time_left = self.time_left.saturating_sub(1);
        self.update_display();

        if self.time_left == 0 {
            self.complete();
        }
    }

    fn complete(&mut self) {
        self.pause();
        info!("{} session complete", self.mode);

        if let Err(e) = self.surface.chime() {
            warn!("Audio playback failed: {}", e);
        }

        self.surface.set_title(DONE_TITLE);
        let generation = self.next_generation();
        self.flash = Some(generation);
        self.scheduler
            .schedule_once(FLASH_DURATION, TimerEvent::FlashExpired(generation));
    }

    fn update_display(&mut self) {
        let title = format!("{}{}", self.display(), TITLE_SUFFIX);
        self.surface.set_title(&title);
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}
