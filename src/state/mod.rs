//! State management module
//!
//! This module contains the shared application state and the preset store.

pub mod app_state;
pub mod presets;

// Re-export main types
pub use app_state::{AppState, SharedEngine};
pub use presets::{Preset, PresetStore};
