//! Cancellable repeating and one-shot timers feeding the event loop

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Events delivered back to the [`Timer`](super::Timer).
///
/// Both carry the generation of the handle that produced them so that
/// events from a cancelled handle can be told apart from current ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick(u64),
    FlashExpired(u64),
}

pub type TimerEventSender = mpsc::UnboundedSender<TimerEvent>;
pub type TimerEventReceiver = mpsc::UnboundedReceiver<TimerEvent>;

pub trait Scheduler {
    /// Arms a timer that emits `TimerEvent::Tick(generation)` every `period`,
    /// first firing one full period from now. Dropping or cancelling the
    /// returned handle stops it.
    fn schedule_repeat(&mut self, period: Duration, generation: u64) -> RepeatHandle;

    /// Emits `event` once after `delay`.
    fn schedule_once(&mut self, delay: Duration, event: TimerEvent);
}

/// Owned handle to a repeating timer. Cancelled on drop.
pub struct RepeatHandle {
    generation: u64,
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl RepeatHandle {
    pub fn new(generation: u64, cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            generation,
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for RepeatHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for RepeatHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepeatHandle")
            .field("generation", &self.generation)
            .finish()
    }
}

/// Scheduler backed by tokio tasks. Must be used inside a tokio runtime.
pub struct TokioScheduler {
    tx: TimerEventSender,
}

impl TokioScheduler {
    pub fn new() -> (Self, TimerEventReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeat(&mut self, period: Duration, generation: u64) -> RepeatHandle {
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.send(TimerEvent::Tick(generation)).is_err() {
                    break;
                }
            }
        });
        RepeatHandle::new(generation, move || task.abort())
    }

    fn schedule_once(&mut self, delay: Duration, event: TimerEvent) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(event);
        });
    }
}
