//! Read-only view of the timer for whatever renders it.

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::settings::ClockFormat;
use crate::timer::{Mode, TimerEngine};

/// Everything a renderer needs, as plain values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayState {
    pub time: String,
    pub mode: Mode,
    pub mode_label: &'static str,
    pub is_running: bool,
    pub completed_focus_count: u64,
    pub progress: f64,
}

impl DisplayState {
    pub fn from_engine(engine: &TimerEngine) -> Self {
        Self {
            time: format_time(engine.seconds_left()),
            mode: engine.mode(),
            mode_label: engine.mode().label(),
            is_running: engine.is_running(),
            completed_focus_count: engine.completed_focus_count(),
            progress: engine.progress(),
        }
    }

    /// Window/tab title, e.g. `"24:59 - Focus"`.
    pub fn title(&self) -> String {
        let phase = if self.mode.is_break() { "Break" } else { "Focus" };
        format!("{} - {}", self.time, phase)
    }
}

/// `HH:MM:SS` when there are hours left, otherwise `MM:SS`.
pub fn format_time(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Wall-clock string in the configured format.
pub fn format_clock<Tz: TimeZone>(now: &DateTime<Tz>, format: ClockFormat) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match format {
        ClockFormat::TwentyFourHour => now.format("%H:%M:%S").to_string(),
        ClockFormat::TwelveHour => now.format("%I:%M:%S %p").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use chrono::Utc;

    #[test]
    fn format_time_pads_minutes_and_seconds() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(59), "00:59");
        assert_eq!(format_time(25 * 60), "25:00");
        assert_eq!(format_time(3599), "59:59");
    }

    #[test]
    fn format_time_shows_hours_when_needed() {
        assert_eq!(format_time(3600), "01:00:00");
        assert_eq!(format_time(3723), "01:02:03");
    }

    #[test]
    fn clock_formats() {
        let t = Utc.with_ymd_and_hms(2024, 3, 9, 15, 4, 5).unwrap();
        assert_eq!(format_clock(&t, ClockFormat::TwentyFourHour), "15:04:05");
        assert_eq!(format_clock(&t, ClockFormat::TwelveHour), "03:04:05 PM");
    }

    #[test]
    fn display_state_from_fresh_engine() {
        let engine = TimerEngine::new(&Settings::default());
        let display = DisplayState::from_engine(&engine);
        assert_eq!(display.time, "25:00");
        assert_eq!(display.mode_label, "Focus Time");
        assert!(!display.is_running);
        assert_eq!(display.title(), "25:00 - Focus");
    }

    #[test]
    fn long_break_title_says_break() {
        let settings = Settings::default();
        let mut engine = TimerEngine::new(&settings);
        engine.restore(&serde_json::json!({"mode": "longBreak", "secondsLeft": 900}), &settings);
        let display = DisplayState::from_engine(&engine);
        assert_eq!(display.mode_label, "Long Break");
        assert_eq!(display.title(), "15:00 - Break");
    }
}
