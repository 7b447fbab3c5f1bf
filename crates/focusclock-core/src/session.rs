//! Process-lifetime context owning the settings store and timer engine.
//!
//! A driver (CLI loop, GUI shell) holds one `Session` and calls into it from
//! a single thread: `tick()` once per second, commands on user input, and
//! `shutdown()` right before exiting.

use chrono::{DateTime, TimeZone};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::display::{format_clock, DisplayState};
use crate::events::Event;
use crate::notify::Notifier;
use crate::settings::{RawSettingsInput, Settings, SettingsStore};
use crate::storage::{KeyValueStore, TIMER_STATE_KEY};
use crate::timer::{TimerEngine, TimerSnapshot};

pub struct Session<S> {
    settings: SettingsStore<S>,
    timer: TimerEngine,
    notifier: Box<dyn Notifier>,
    persistent: bool,
}

impl<S: KeyValueStore> Session<S> {
    /// Load settings and any saved timer state from `store`.
    ///
    /// Never fails: unreadable or corrupt records fall back to defaults and
    /// an unavailable store degrades to in-memory operation.
    pub fn open(store: S, notifier: Box<dyn Notifier>) -> Self {
        let mut settings = SettingsStore::new(store);
        let persistent = settings.is_available();

        let loaded = settings.load();
        let timer = TimerEngine::new(&loaded);

        let mut session = Self {
            settings,
            timer,
            notifier,
            persistent,
        };
        session.restore_saved_state();
        session
    }

    fn restore_saved_state(&mut self) {
        let raw = match self.settings.backend().get(TIMER_STATE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(e) => {
                warn!("failed to read saved timer state: {e}");
                return;
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(value @ Value::Object(_)) => {
                let settings = *self.settings.current();
                self.timer.restore(&value, &settings);
                info!(
                    mode = self.timer.mode().as_str(),
                    seconds_left = self.timer.seconds_left(),
                    "resumed paused timer"
                );
            }
            Ok(_) | Err(_) => {
                warn!("discarding malformed timer state");
                if let Err(e) = self.settings.backend_mut().delete(TIMER_STATE_KEY) {
                    warn!("failed to delete malformed timer state: {e}");
                }
            }
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn settings(&self) -> &Settings {
        self.settings.current()
    }

    pub fn timer(&self) -> &TimerEngine {
        &self.timer
    }

    /// Whether the store accepted the availability probe at open time.
    pub fn persistence_available(&self) -> bool {
        self.persistent
    }

    pub fn display(&self) -> DisplayState {
        DisplayState::from_engine(&self.timer)
    }

    pub fn clock<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        format_clock(now, self.settings.current().clock_format)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.timer.snapshot()
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        self.timer.start()
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.timer.pause()
    }

    pub fn reset(&mut self) -> Event {
        let settings = *self.settings.current();
        self.timer.reset(&settings)
    }

    /// One elapsed second.
    pub fn tick(&mut self) -> Option<Event> {
        let settings = *self.settings.current();
        self.timer.advance(&settings, self.notifier.as_ref())
    }

    /// Validate and store new settings, then rewind the current phase so the
    /// new durations take effect.
    pub fn update_settings(&mut self, raw: &RawSettingsInput) -> Settings {
        let settings = self.settings.save(raw);
        self.timer.reset(&settings);
        settings
    }

    /// Drop the phase in progress and save a fresh focus phase in its place.
    /// The completed focus count carries over.
    pub fn clear_timer_state(&mut self) -> Event {
        let settings = *self.settings.current();
        let event = self.timer.rewind_to_focus(&settings);
        self.persist_timer_state();
        event
    }

    /// Save the snapshot if the timer is running. Returns whether it wrote.
    ///
    /// Best-effort: failures are logged, never returned.
    pub fn shutdown(&mut self) -> bool {
        if !self.timer.is_running() || !self.persistent {
            return false;
        }
        self.write_snapshot()
    }

    /// Save the snapshot regardless of the running flag.
    pub fn persist_timer_state(&mut self) -> bool {
        if !self.persistent {
            return false;
        }
        self.write_snapshot()
    }

    fn write_snapshot(&mut self) -> bool {
        let json = match serde_json::to_string(&self.timer.snapshot()) {
            Ok(json) => json,
            Err(e) => {
                warn!("failed to encode timer state: {e}");
                return false;
            }
        };
        match self.settings.backend_mut().set(TIMER_STATE_KEY, &json) {
            Ok(()) => {
                debug!("timer state saved");
                true
            }
            Err(e) => {
                warn!("failed to save timer state: {e}");
                false
            }
        }
    }
}
