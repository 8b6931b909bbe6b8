mod engine;
mod format;

pub use engine::{break_for_work, Phase, TimerEngine, BREAK_DIVISOR, MIN_BREAK_SECS};
pub use format::format_clock;
