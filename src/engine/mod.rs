//! Timer engine module
//!
//! Presentation-agnostic countdown state machine, its clock abstraction and
//! the values derived from it for display.

pub mod clock;
pub mod display;
pub mod timer_engine;
pub mod timer_state;

// Re-export main types
pub use clock::{Clock, ManualClock, SystemClock};
pub use display::{format_clock, DisplayFlags, TimerSnapshot};
pub use timer_engine::{TickOutcome, TimerEngine};
pub use timer_state::{
    TimerMode, TimerPhase, TimerState, ALARM_DURATION, DEFAULT_BASE_DURATION_SECONDS,
    LOW_TIME_THRESHOLD_SECONDS, MAX_SECONDS,
};
