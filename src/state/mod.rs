//! State management module
//!
//! Shared application state wrapping the timer engine for the HTTP handlers
//! and the tick task.

pub mod app_state;

// Re-export main types
pub use app_state::AppState;
