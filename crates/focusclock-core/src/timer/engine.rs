//! Timer engine implementation.
//!
//! The timer engine is a tick-driven state machine. It does not use internal
//! threads or the wall clock: the caller invokes `advance()` once per elapsed
//! second while the timer runs. Missed ticks are not caught up.
//!
//! ## Mode Transitions
//!
//! ```text
//! Focus --(every 4th completion)--> LongBreak --> Focus
//! Focus --(otherwise)-------------> Break ------> Focus
//! ```
//!
//! Transitions only happen when the countdown reaches zero. Each new phase
//! reads its length from the current [`Settings`].
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(&settings);
//! engine.start();
//! // Once per second:
//! engine.advance(&settings, &notifier); // Some(Event::PhaseCompleted) on transition
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::mode::Mode;
use crate::events::Event;
use crate::notify::Notifier;
use crate::settings::Settings;

/// Every this many completed focus phases, the break is a long one.
pub const LONG_BREAK_EVERY: u64 = 4;

/// Persisted subset of the timer state. Never carries `is_running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub seconds_left: u64,
    pub mode: Mode,
    pub completed_focus_count: u64,
}

/// Core timer engine.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerEngine {
    mode: Mode,
    is_running: bool,
    seconds_left: u64,
    /// Length of the current phase, kept `>= seconds_left`.
    seconds_total: u64,
    completed_focus_count: u64,
}

impl TimerEngine {
    /// Paused, at the start of a focus phase.
    pub fn new(settings: &Settings) -> Self {
        let secs = Mode::Focus.duration_secs(settings);
        Self {
            mode: Mode::Focus,
            is_running: false,
            seconds_left: secs,
            seconds_total: secs,
            completed_focus_count: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn seconds_left(&self) -> u64 {
        self.seconds_left
    }

    pub fn seconds_total(&self) -> u64 {
        self.seconds_total
    }

    pub fn completed_focus_count(&self) -> u64 {
        self.completed_focus_count
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn progress(&self) -> f64 {
        if self.seconds_total == 0 {
            return 0.0;
        }
        (1.0 - self.seconds_left as f64 / self.seconds_total as f64).clamp(0.0, 1.0)
    }

    /// The persistable subset of the state.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            seconds_left: self.seconds_left,
            mode: self.mode,
            completed_focus_count: self.completed_focus_count,
        }
    }

    /// Build a full state snapshot event.
    pub fn state_snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.mode,
            is_running: self.is_running,
            seconds_left: self.seconds_left,
            seconds_total: self.seconds_total,
            completed_focus_count: self.completed_focus_count,
            progress: self.progress(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.is_running {
            return None;
        }
        self.is_running = true;
        Some(Event::TimerStarted {
            mode: self.mode,
            seconds_left: self.seconds_left,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.is_running = false;
        Some(Event::TimerPaused {
            mode: self.mode,
            seconds_left: self.seconds_left,
            at: Utc::now(),
        })
    }

    /// Stop and rewind the current phase using the current settings.
    /// Mode and completed count are unchanged.
    pub fn reset(&mut self, settings: &Settings) -> Event {
        self.is_running = false;
        self.seconds_total = self.mode.duration_secs(settings);
        self.seconds_left = self.seconds_total;
        Event::TimerReset {
            mode: self.mode,
            seconds_left: self.seconds_left,
            at: Utc::now(),
        }
    }

    /// Abandon the current phase and start a fresh, paused focus phase.
    /// The completed focus count is kept.
    pub fn rewind_to_focus(&mut self, settings: &Settings) -> Event {
        self.mode = Mode::Focus;
        self.reset(settings)
    }

    /// Call once per elapsed second. Returns `Some(Event::PhaseCompleted)`
    /// when the phase finishes.
    pub fn advance(&mut self, settings: &Settings, notifier: &dyn Notifier) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        if self.seconds_left > 0 {
            self.seconds_left -= 1;
        }
        if self.seconds_left > 0 {
            return None;
        }
        Some(self.complete_phase(settings, notifier))
    }

    /// Merge well-typed fields of a persisted snapshot into the current state.
    ///
    /// Missing or invalid fields keep their current values. The result is
    /// always paused.
    pub fn restore(&mut self, raw: &Value, settings: &Settings) -> Event {
        if let Some(mode) = raw.get("mode").and_then(Value::as_str).and_then(Mode::parse) {
            self.mode = mode;
        }
        if let Some(count) = raw.get("completedFocusCount").and_then(Value::as_u64) {
            self.completed_focus_count = count;
        }

        let phase_secs = self.mode.duration_secs(settings);
        if let Some(left) = raw.get("secondsLeft").and_then(Value::as_u64) {
            self.seconds_left = left;
        }
        self.seconds_total = phase_secs.max(self.seconds_left);
        self.is_running = false;

        debug!(
            mode = self.mode.as_str(),
            seconds_left = self.seconds_left,
            completed = self.completed_focus_count,
            "timer state restored"
        );

        Event::StateRestored {
            mode: self.mode,
            seconds_left: self.seconds_left,
            completed_focus_count: self.completed_focus_count,
            at: Utc::now(),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_phase(&mut self, settings: &Settings, notifier: &dyn Notifier) -> Event {
        let completed = self.mode;
        let next = match completed {
            Mode::Focus => {
                self.completed_focus_count = self.completed_focus_count.saturating_add(1);
                if self.completed_focus_count % LONG_BREAK_EVERY == 0 {
                    Mode::LongBreak
                } else {
                    Mode::Break
                }
            }
            Mode::Break | Mode::LongBreak => Mode::Focus,
        };

        self.mode = next;
        self.seconds_total = next.duration_secs(settings);
        self.seconds_left = self.seconds_total;

        if let Err(e) = notifier.notify_completion(completed, next) {
            warn!("completion notification failed: {e}");
        }

        self.is_running = settings.auto_start_next;
        debug!(
            completed = completed.as_str(),
            next = next.as_str(),
            auto_started = self.is_running,
            "phase completed"
        );

        Event::PhaseCompleted {
            completed,
            next,
            completed_focus_count: self.completed_focus_count,
            auto_started: self.is_running,
            at: Utc::now(),
        }
    }
}
