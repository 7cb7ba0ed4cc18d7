//! External service management module
//!
//! This module contains system operations the background tasks call into,
//! currently sleep inhibition while a run is active.

pub mod system;

// Re-export main functions
pub use system::*;
