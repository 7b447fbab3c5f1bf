mod engine;
mod mode;

pub use engine::{TimerEngine, TimerSnapshot, LONG_BREAK_EVERY};
pub use mode::Mode;
