//! Phase transition table
//!
//! Pure mapping from the current phase and counters to the next phase. Nothing
//! here knows about time; the countdown engine asks for a step whenever its
//! current phase runs out.

use super::{Configuration, Phase, PhaseStep, RunState};

/// Next phase to enter after `current` expires (or after `start()` when idle/finished).
///
/// Zero-length phases are elided in the same call, so the result is always a
/// phase with a positive duration or `Finished`.
pub fn next_phase(current: &RunState, config: &Configuration) -> PhaseStep {
    let mut step = successor(current.phase, current.round, current.set, config);

    while step.phase != Phase::Finished && step.duration_seconds == 0 {
        step = successor(step.phase, step.round, step.set, config);
    }

    step
}

/// One raw transition, zero-length targets included.
fn successor(phase: Phase, round: u64, set: u64, config: &Configuration) -> PhaseStep {
    let (phase, round, set) = match phase {
        Phase::Idle | Phase::Finished => (Phase::Warmup, 1, 1),
        Phase::Warmup => (Phase::Workout, round, set),
        Phase::Workout if round < config.rounds => (Phase::Rest, round, set),
        Phase::Workout if set < config.sets => (Phase::SetRest, round, set),
        Phase::Workout => (Phase::Cooldown, round, set),
        Phase::Rest => (Phase::Workout, round + 1, set),
        Phase::SetRest => (Phase::Workout, 1, set + 1),
        Phase::Cooldown => (Phase::Finished, round, set),
    };

    PhaseStep {
        phase,
        round,
        set,
        duration_seconds: phase.duration_in(config),
    }
}
