//! Phases of a run and the observable run state

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Configuration;

/// One segment of a run, or one of the untimed boundary states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Warmup,
    Workout,
    Rest,
    SetRest,
    Cooldown,
    Finished,
}

impl Phase {
    /// Whether the phase carries a duration
    pub fn is_timed(self) -> bool {
        !matches!(self, Phase::Idle | Phase::Finished)
    }

    /// Configured length of this phase; zero for the untimed states
    pub fn duration_in(self, config: &Configuration) -> u64 {
        match self {
            Phase::Idle | Phase::Finished => 0,
            Phase::Warmup => config.warmup_seconds,
            Phase::Workout => config.workout_seconds,
            Phase::Rest => config.rest_seconds,
            Phase::SetRest => config.set_rest_seconds,
            Phase::Cooldown => config.cooldown_seconds,
        }
    }

    /// Human readable name
    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::Warmup => "Warm Up",
            Phase::Workout => "Workout",
            Phase::Rest => "Rest",
            Phase::SetRest => "Set Rest",
            Phase::Cooldown => "Cooldown",
            Phase::Finished => "Finished",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where the sequencer lands: the phase to enter, its counters and its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseStep {
    pub phase: Phase,
    pub round: u64,
    pub set: u64,
    pub duration_seconds: u64,
}

/// Mutable state of the single live run owned by an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub phase: Phase,
    pub round: u64,
    pub set: u64,
    pub remaining_seconds: u64,
    pub total_seconds: u64,
    pub running: bool,
}

impl RunState {
    /// The state before `start()` and after `reset()`
    pub fn idle() -> Self {
        Self {
            phase: Phase::Idle,
            round: 1,
            set: 1,
            remaining_seconds: 0,
            total_seconds: 0,
            running: false,
        }
    }

    /// Paused in the middle of a timed phase
    pub fn is_paused(&self) -> bool {
        !self.running && self.phase.is_timed()
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::idle()
    }
}
