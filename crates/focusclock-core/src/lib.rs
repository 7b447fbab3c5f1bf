//! # focusclock Core Library
//!
//! This library provides the core logic for the focusclock Pomodoro timer.
//! Every operation is available to the standalone CLI binary; any other
//! front end is a thin layer over the same [`Session`].
//!
//! ## Architecture
//!
//! - **Timer Engine**: A tick-driven state machine. The caller invokes
//!   `advance()` once per second while the timer runs
//! - **Settings**: Validated, clamped durations persisted as JSON
//! - **Storage**: A string key-value contract with SQLite, in-memory and
//!   null backends
//! - **Notify**: Phase-completion notifications (desktop, terminal bell)
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`SettingsStore`]: Settings validation and persistence
//! - [`Session`]: Process-lifetime context tying the two together
//! - [`KeyValueStore`]: Persistence backend contract

pub mod config;
pub mod display;
pub mod error;
pub mod events;
pub mod notify;
pub mod session;
pub mod settings;
pub mod storage;
pub mod timer;

pub use config::AppConfig;
pub use display::{format_clock, format_time, DisplayState};
pub use error::{ConfigError, CoreError, NotifyError, StorageError};
pub use events::Event;
pub use notify::{DesktopNotifier, FallbackNotifier, Notifier, SilentNotifier, TerminalBell};
pub use session::Session;
pub use settings::{ClockFormat, RawSettingsInput, Settings, SettingsStore};
pub use storage::{Database, KeyValueStore, MemoryStore, NullStore};
pub use timer::{Mode, TimerEngine, TimerSnapshot};
