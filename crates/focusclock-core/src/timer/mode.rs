use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// A phase of the Pomodoro cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    Focus,
    Break,
    LongBreak,
}

impl Mode {
    /// Wire name, as used in the persisted snapshot.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Focus => "focus",
            Mode::Break => "break",
            Mode::LongBreak => "longBreak",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "focus" => Some(Mode::Focus),
            "break" => Some(Mode::Break),
            "longBreak" => Some(Mode::LongBreak),
            _ => None,
        }
    }

    /// Label for the mode indicator.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Focus => "Focus Time",
            Mode::Break => "Break Time",
            Mode::LongBreak => "Long Break",
        }
    }

    /// Configured length of this phase in minutes.
    pub fn minutes(&self, settings: &Settings) -> u32 {
        match self {
            Mode::Focus => settings.focus_minutes,
            Mode::Break => settings.break_minutes,
            Mode::LongBreak => settings.long_break_minutes,
        }
    }

    /// Configured length of this phase in seconds.
    pub fn duration_secs(&self, settings: &Settings) -> u64 {
        u64::from(self.minutes(settings)).saturating_mul(60)
    }

    pub fn is_break(&self) -> bool {
        !matches!(self, Mode::Focus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_serde() {
        for mode in [Mode::Focus, Mode::Break, Mode::LongBreak] {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.as_str()));
            assert_eq!(Mode::parse(mode.as_str()), Some(mode));
        }
    }

    #[test]
    fn durations_follow_settings() {
        let settings = Settings {
            focus_minutes: 50,
            break_minutes: 10,
            long_break_minutes: 30,
            ..Settings::default()
        };
        assert_eq!(Mode::Focus.duration_secs(&settings), 3000);
        assert_eq!(Mode::Break.duration_secs(&settings), 600);
        assert_eq!(Mode::LongBreak.duration_secs(&settings), 1800);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert_eq!(Mode::parse("Focus"), None);
        assert_eq!(Mode::parse("long_break"), None);
    }
}
