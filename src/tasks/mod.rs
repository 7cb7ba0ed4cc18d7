//! Background tasks module
//!
//! This module contains the scheduling source that drives the engine and the
//! tasks that react to its events alongside the HTTP server.

pub mod cues;
pub mod ticker;
pub mod wake_guard;

// Re-export main functions
pub use cues::cue_task;
pub use ticker::ticker_task;
pub use wake_guard::wake_guard_task;
