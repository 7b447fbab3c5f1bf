use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Mode;

/// Every state change in the timer produces an Event.
/// The CLI prints them; the display layer polls `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        seconds_left: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: Mode,
        seconds_left: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: Mode,
        seconds_left: u64,
        at: DateTime<Utc>,
    },
    /// A phase ran out and the engine moved to `next`.
    PhaseCompleted {
        completed: Mode,
        next: Mode,
        completed_focus_count: u64,
        /// True when the next phase keeps running without user action.
        auto_started: bool,
        at: DateTime<Utc>,
    },
    /// State was merged from a persisted snapshot. Always paused.
    StateRestored {
        mode: Mode,
        seconds_left: u64,
        completed_focus_count: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: Mode,
        is_running: bool,
        seconds_left: u64,
        seconds_total: u64,
        completed_focus_count: u64,
        progress: f64,
        at: DateTime<Utc>,
    },
}
