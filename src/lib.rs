//! Flash Timer - A visual countdown timer with an auto-restarting alarm
//!
//! The [`engine`] module holds the presentation-agnostic countdown state
//! machine. The remaining modules wrap it in a small HTTP service that any
//! display can poll or subscribe to.

pub mod config;
pub mod engine;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use engine::{format_clock, TimerEngine, TimerSnapshot};
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
