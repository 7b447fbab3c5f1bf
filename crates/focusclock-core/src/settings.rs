//! User-tunable durations and preferences.
//!
//! [`SettingsStore`] is the single source of truth for phase lengths. It owns
//! validation and the JSON round-trip through the key-value backend:
//!
//! - every duration is clamped into its documented range;
//! - each persisted field is parsed independently, so one bad field only
//!   resets that field;
//! - a record that is not a JSON object is deleted and replaced by defaults;
//! - an unavailable backend never blocks in-memory use.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::storage::{probe, KeyValueStore, SETTINGS_KEY};

/// Inclusive bounds and default for a minutes field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinutesField {
    pub key: &'static str,
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl MinutesField {
    pub fn clamp(&self, minutes: i64) -> u32 {
        minutes.clamp(i64::from(self.min), i64::from(self.max)) as u32
    }

    pub fn contains(&self, minutes: u32) -> bool {
        (self.min..=self.max).contains(&minutes)
    }
}

pub const FOCUS_MINUTES: MinutesField = MinutesField {
    key: "focusMinutes",
    min: 1,
    max: 60,
    default: 25,
};

pub const BREAK_MINUTES: MinutesField = MinutesField {
    key: "breakMinutes",
    min: 1,
    max: 30,
    default: 5,
};

pub const LONG_BREAK_MINUTES: MinutesField = MinutesField {
    key: "longBreakMinutes",
    min: 1,
    max: 60,
    default: 15,
};

/// Wall-clock display format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockFormat {
    #[serde(rename = "12")]
    TwelveHour,
    #[serde(rename = "24")]
    #[default]
    TwentyFourHour,
}

impl ClockFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClockFormat::TwelveHour => "12",
            ClockFormat::TwentyFourHour => "24",
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Number(n) => match n.as_u64() {
                Some(12) => Some(ClockFormat::TwelveHour),
                Some(24) => Some(ClockFormat::TwentyFourHour),
                _ => None,
            },
            _ => None,
        }
    }

    /// Accepts `"12"` or `"24"`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "12" => Some(ClockFormat::TwelveHour),
            "24" => Some(ClockFormat::TwentyFourHour),
            _ => None,
        }
    }
}

/// Validated settings. Every duration is within its clamp range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub focus_minutes: u32,
    pub break_minutes: u32,
    pub long_break_minutes: u32,
    pub auto_start_next: bool,
    pub clock_format: ClockFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            focus_minutes: FOCUS_MINUTES.default,
            break_minutes: BREAK_MINUTES.default,
            long_break_minutes: LONG_BREAK_MINUTES.default,
            auto_start_next: false,
            clock_format: ClockFormat::default(),
        }
    }
}

impl Settings {
    /// Build settings from a persisted JSON object, one field at a time.
    fn from_record(record: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        let minutes = |field: &MinutesField| {
            record
                .get(field.key)
                .and_then(number_from_value)
                .map(|n| field.clamp(n))
                .unwrap_or(field.default)
        };

        Self {
            focus_minutes: minutes(&FOCUS_MINUTES),
            break_minutes: minutes(&BREAK_MINUTES),
            long_break_minutes: minutes(&LONG_BREAK_MINUTES),
            auto_start_next: record
                .get("autoStartNext")
                .and_then(bool_from_value)
                .unwrap_or(defaults.auto_start_next),
            clock_format: record
                .get("clockFormat")
                .and_then(ClockFormat::from_value)
                .unwrap_or(defaults.clock_format),
        }
    }
}

/// Unvalidated settings as entered by the user.
///
/// `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSettingsInput {
    #[serde(default)]
    pub focus_minutes: Option<String>,
    #[serde(default)]
    pub break_minutes: Option<String>,
    #[serde(default)]
    pub long_break_minutes: Option<String>,
    #[serde(default)]
    pub auto_start_next: Option<String>,
    #[serde(default)]
    pub clock_format: Option<String>,
}

impl From<Settings> for RawSettingsInput {
    fn from(s: Settings) -> Self {
        Self {
            focus_minutes: Some(s.focus_minutes.to_string()),
            break_minutes: Some(s.break_minutes.to_string()),
            long_break_minutes: Some(s.long_break_minutes.to_string()),
            auto_start_next: Some(s.auto_start_next.to_string()),
            clock_format: Some(s.clock_format.as_str().to_string()),
        }
    }
}

/// Loads, validates and persists [`Settings`] through a key-value backend.
pub struct SettingsStore<S> {
    store: S,
    current: Settings,
    warned_unavailable: bool,
}

impl<S: KeyValueStore> SettingsStore<S> {
    /// Wrap a backend. Call [`load`](Self::load) to read persisted values.
    pub fn new(store: S) -> Self {
        Self {
            store,
            current: Settings::default(),
            warned_unavailable: false,
        }
    }

    pub fn current(&self) -> &Settings {
        &self.current
    }

    pub fn backend(&self) -> &S {
        &self.store
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Probe the backend with a write/delete round trip.
    ///
    /// The first failed probe or write logs a single warning.
    pub fn is_available(&mut self) -> bool {
        let available = probe(&mut self.store);
        if !available {
            self.warn_unavailable("storage is unavailable");
        }
        available
    }

    fn warn_unavailable(&mut self, reason: &str) {
        if self.warned_unavailable {
            debug!("{reason}");
        } else {
            warn!("{reason}; settings and timer state will not persist");
            self.warned_unavailable = true;
        }
    }

    /// Read the persisted record. Never fails; degrades to defaults.
    pub fn load(&mut self) -> Settings {
        let settings = match self.store.get(SETTINGS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Value>(&raw) {
                Ok(Value::Object(record)) => Settings::from_record(&record),
                Ok(_) | Err(_) => {
                    warn!("discarding malformed settings record");
                    if let Err(e) = self.store.delete(SETTINGS_KEY) {
                        warn!("failed to delete malformed settings: {e}");
                    }
                    Settings::default()
                }
            },
            Ok(None) => Settings::default(),
            Err(e) => {
                warn!("failed to read settings, using defaults: {e}");
                Settings::default()
            }
        };

        self.current = settings;
        settings
    }

    /// Validate `candidate`, make it current, and persist it if possible.
    pub fn save(&mut self, candidate: &RawSettingsInput) -> Settings {
        let base = self.current;
        let minutes = |raw: &Option<String>, field: &MinutesField, fallback: u32| {
            raw.as_deref()
                .and_then(number_from_str)
                .map(|n| field.clamp(n))
                .unwrap_or(fallback)
        };

        let settings = Settings {
            focus_minutes: minutes(&candidate.focus_minutes, &FOCUS_MINUTES, base.focus_minutes),
            break_minutes: minutes(&candidate.break_minutes, &BREAK_MINUTES, base.break_minutes),
            long_break_minutes: minutes(
                &candidate.long_break_minutes,
                &LONG_BREAK_MINUTES,
                base.long_break_minutes,
            ),
            auto_start_next: candidate
                .auto_start_next
                .as_deref()
                .and_then(bool_from_str)
                .unwrap_or(base.auto_start_next),
            clock_format: candidate
                .clock_format
                .as_deref()
                .and_then(ClockFormat::parse)
                .unwrap_or(base.clock_format),
        };

        self.current = settings;
        self.persist(&settings);
        settings
    }

    fn persist(&mut self, settings: &Settings) {
        let json = match serde_json::to_string(settings) {
            Ok(json) => json,
            Err(e) => {
                warn!("failed to encode settings: {e}");
                return;
            }
        };
        match self.store.set(SETTINGS_KEY, &json) {
            Ok(()) => debug!("settings persisted"),
            Err(e) => self.warn_unavailable(&format!("failed to save settings: {e}")),
        }
    }
}

fn number_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => number_from_str(s),
        _ => None,
    }
}

fn number_from_str(s: &str) -> Option<i64> {
    let s = s.trim();
    s.parse::<i64>().ok().or_else(|| {
        s.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
    })
}

fn bool_from_value(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => bool_from_str(s),
        _ => None,
    }
}

fn bool_from_str(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
