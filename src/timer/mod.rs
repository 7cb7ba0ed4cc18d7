//! Interval timer core
//!
//! Configuration, the phase sequencer and the drift-corrected countdown
//! engine. Nothing in here renders, plays sounds or persists anything; those
//! concerns subscribe to the [`TimerEvent`]s the engine produces.

pub mod clock;
pub mod configuration;
pub mod engine;
pub mod format;
pub mod phase;
pub mod sequencer;

// Re-export main types
pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use configuration::{Configuration, ConfigurationInput};
pub use engine::{CountdownEngine, TimeAnchor, TimerEvent};
pub use format::{format_hms, parse_hms};
pub use phase::{Phase, PhaseStep, RunState};
pub use sequencer::next_phase;
