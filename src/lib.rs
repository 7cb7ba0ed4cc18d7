//! Interval Timer - A drift-corrected interval-workout timer
//!
//! The [`timer`] module is the core: a phase sequencer and a countdown engine
//! that recomputes remaining time from wall-clock anchors. Around it sit an
//! HTTP control surface and background tasks that react to the engine's events.

pub mod config;
pub mod error;
pub mod timer;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{ConfigurationError, StateError};
pub use timer::{Configuration, CountdownEngine, Phase, RunState, TimerEvent};
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
