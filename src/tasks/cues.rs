//! Audio cue background task
//!
//! Decides which events deserve a sound. The engine never does; this task is
//! one subscriber among others and only logs the cue or rings the terminal bell.

use std::{io::Write, sync::Arc};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::{state::AppState, timer::TimerEvent};

/// Seconds at the end of a phase that get a countdown beep
pub const COUNTDOWN_SECONDS: u64 = 5;

/// A sound worth playing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Short beep during the last seconds of a phase
    Countdown { remaining_seconds: u64 },
    /// Longer tone when a phase or the whole run ends
    PhaseComplete,
}

impl Cue {
    pub fn frequency_hz(self) -> u32 {
        match self {
            Cue::Countdown { .. } => 880,
            Cue::PhaseComplete => 440,
        }
    }

    pub fn duration_ms(self) -> u64 {
        match self {
            Cue::Countdown { .. } => 100,
            Cue::PhaseComplete => 800,
        }
    }
}

/// Map an engine event to the cue it should trigger, if any
pub fn cue_for(event: &TimerEvent) -> Option<Cue> {
    match *event {
        TimerEvent::Tick {
            remaining_seconds: remaining_seconds @ 1..=COUNTDOWN_SECONDS,
            phase,
            ..
        } if phase.is_timed() => Some(Cue::Countdown { remaining_seconds }),
        TimerEvent::PhaseExpired { .. } | TimerEvent::Finished => Some(Cue::PhaseComplete),
        _ => None,
    }
}

/// Background task that turns engine events into cues
pub async fn cue_task(state: Arc<AppState>, bell: bool) {
    info!("Starting cue task (bell={})", bell);

    let mut events = state.subscribe();

    loop {
        match events.recv().await {
            Ok(event) => {
                let Some(cue) = cue_for(&event) else {
                    continue;
                };
                debug!("Cue {:?} at {}Hz for {}ms", cue, cue.frequency_hz(), cue.duration_ms());

                if bell {
                    let mut stdout = std::io::stdout();
                    if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
                        warn!("Failed to ring bell: {}", e);
                    }
                }
            }
            // Stale cues are worthless, skip ahead
            Err(RecvError::Lagged(skipped)) => {
                warn!("Cue task lagged, skipped {} events", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Event channel closed, stopping cue task");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::Phase;

    fn tick(remaining_seconds: u64) -> TimerEvent {
        TimerEvent::Tick {
            remaining_seconds,
            phase: Phase::Workout,
            round: 1,
            set: 1,
        }
    }

    #[test]
    fn test_countdown_only_in_last_seconds() {
        assert_eq!(cue_for(&tick(6)), None);
        assert_eq!(cue_for(&tick(5)), Some(Cue::Countdown { remaining_seconds: 5 }));
        assert_eq!(cue_for(&tick(1)), Some(Cue::Countdown { remaining_seconds: 1 }));
        assert_eq!(cue_for(&tick(0)), None);
    }

    #[test]
    fn test_phase_end_cues() {
        let expired = TimerEvent::PhaseExpired {
            phase: Phase::Rest,
            round: 2,
            set: 1,
        };
        assert_eq!(cue_for(&expired), Some(Cue::PhaseComplete));
        assert_eq!(cue_for(&TimerEvent::Finished), Some(Cue::PhaseComplete));
    }

    #[test]
    fn test_silent_events() {
        let changed = TimerEvent::PhaseChanged {
            phase: Phase::Workout,
            round: 1,
            set: 1,
            total_seconds: 20,
        };
        assert_eq!(cue_for(&changed), None);
        assert_eq!(cue_for(&TimerEvent::ActivityChanged { running: true }), None);
    }

    #[test]
    fn test_cue_tones() {
        assert_eq!(Cue::Countdown { remaining_seconds: 3 }.frequency_hz(), 880);
        assert_eq!(Cue::PhaseComplete.duration_ms(), 800);
    }
}
