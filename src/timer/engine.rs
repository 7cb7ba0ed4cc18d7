//! Drift-corrected countdown engine
//!
//! The engine owns the single live [`RunState`]. Remaining time is never
//! decremented; every call recomputes it from a [`TimeAnchor`] taken when the
//! phase started or was resumed, so a late, throttled or suspended scheduler
//! only delays the update and never skews it. A long enough gap can expire
//! several phases at once, and the engine walks through all of them in a single
//! call.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{next_phase, Clock, Configuration, Phase, PhaseStep, RunState, SystemClock};
use crate::error::ConfigurationError;

/// Wall-clock reference for the running phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeAnchor {
    pub reference: DateTime<Utc>,
    pub remaining_seconds: u64,
}

impl TimeAnchor {
    pub fn new(reference: DateTime<Utc>, remaining_seconds: u64) -> Self {
        Self {
            reference,
            remaining_seconds,
        }
    }

    /// Whole seconds left at `now`. A clock that went backwards counts as no time elapsed.
    pub fn remaining_at(&self, now: DateTime<Utc>) -> u64 {
        let elapsed_ms = u64::try_from((now - self.reference).num_milliseconds()).unwrap_or(0);
        self.remaining_seconds.saturating_sub(elapsed_ms / 1000)
    }

    /// The instant at which the remaining time reaches zero
    pub fn expires_at(&self) -> DateTime<Utc> {
        let secs = i64::try_from(self.remaining_seconds).unwrap_or(i64::MAX);
        TimeDelta::try_seconds(secs)
            .and_then(|delta| self.reference.checked_add_signed(delta))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// Notifications for presentation, audio and power-management subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimerEvent {
    /// The displayed remaining time changed
    Tick {
        remaining_seconds: u64,
        phase: Phase,
        round: u64,
        set: u64,
    },
    /// The current phase ran out
    PhaseExpired { phase: Phase, round: u64, set: u64 },
    /// A new phase was entered, `Finished` and a reset to `Idle` included
    PhaseChanged {
        phase: Phase,
        round: u64,
        set: u64,
        total_seconds: u64,
    },
    /// The run completed; sent once per run
    Finished,
    /// The run started or stopped counting down
    ActivityChanged { running: bool },
}

/// Countdown engine for one run at a time.
///
/// All operations take `&mut self`; the owner drives `tick()` from a single
/// scheduling source and issues control calls from the same context.
#[derive(Debug)]
pub struct CountdownEngine<C = SystemClock> {
    clock: C,
    config: Configuration,
    state: RunState,
    anchor: Option<TimeAnchor>,
}

impl CountdownEngine<SystemClock> {
    /// Create an idle engine on the system clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for CountdownEngine<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> CountdownEngine<C> {
    /// Create an idle engine reading time from `clock`
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            config: Configuration::default(),
            state: RunState::idle(),
            anchor: None,
        }
    }

    /// Snapshot of the run state
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Configuration of the current (or most recent) run
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Anchor of the phase currently counting down, if any
    pub fn anchor(&self) -> Option<TimeAnchor> {
        self.anchor
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Begin a new run with `config`.
    ///
    /// From `Idle` or `Finished` this enters the first phase. While a run is
    /// counting down it does nothing; while a run is paused it resumes it and
    /// `config` is ignored. An invalid `config` is rejected before anything changes.
    pub fn start(&mut self, config: Configuration) -> Result<Vec<TimerEvent>, ConfigurationError> {
        config.validate()?;

        match self.state.phase {
            Phase::Idle | Phase::Finished => {}
            _ if self.state.running => {
                debug!("Start ignored, run already in progress");
                return Ok(Vec::new());
            }
            _ => return Ok(self.resume()),
        }

        info!(
            "Starting run: {} rounds x {} sets, {}s planned",
            config.rounds,
            config.sets,
            config.total_seconds()
        );

        self.config = config;
        self.state = RunState {
            running: true,
            ..RunState::idle()
        };

        let mut events = Vec::new();
        let first = next_phase(&self.state, &self.config);
        let now = self.clock.now();
        self.enter(first, now, &mut events);

        if self.state.running {
            events.push(TimerEvent::ActivityChanged { running: true });
        }
        Ok(events)
    }

    /// Stop counting down, keeping the remaining time. Ignored unless running.
    pub fn pause(&mut self) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        if !self.state.running {
            debug!("Pause ignored, timer not running");
            return events;
        }

        let now = self.clock.now();
        self.reconcile(now, &mut events);

        // Reconciling may have run the workout to completion
        if self.state.running {
            self.state.running = false;
            self.anchor = None;
            info!(
                "Paused in {} with {}s remaining",
                self.state.phase, self.state.remaining_seconds
            );
            events.push(TimerEvent::ActivityChanged { running: false });
        }
        events
    }

    /// Continue a paused run from its remaining time. Ignored unless paused.
    pub fn resume(&mut self) -> Vec<TimerEvent> {
        if !self.state.is_paused() {
            debug!("Resume ignored, timer not paused");
            return Vec::new();
        }

        self.anchor = Some(TimeAnchor::new(
            self.clock.now(),
            self.state.remaining_seconds,
        ));
        self.state.running = true;
        info!(
            "Resumed {} with {}s remaining",
            self.state.phase, self.state.remaining_seconds
        );
        vec![TimerEvent::ActivityChanged { running: true }]
    }

    /// Pause when running, resume when paused
    pub fn toggle(&mut self) -> Vec<TimerEvent> {
        if self.state.running {
            self.pause()
        } else {
            self.resume()
        }
    }

    /// Return to `Idle` from any state
    pub fn reset(&mut self) -> Vec<TimerEvent> {
        let previous = self.state;
        self.state = RunState::idle();
        self.anchor = None;

        let mut events = Vec::new();
        if previous.phase != Phase::Idle {
            info!("Run reset from {}", previous.phase);
            events.push(TimerEvent::PhaseChanged {
                phase: Phase::Idle,
                round: 1,
                set: 1,
                total_seconds: 0,
            });
        }
        if previous.running {
            events.push(TimerEvent::ActivityChanged { running: false });
        }
        events
    }

    /// Bring the run up to date with the clock.
    ///
    /// Safe to call at any rate and after any gap; does nothing unless running.
    pub fn tick(&mut self) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        if self.state.running {
            let now = self.clock.now();
            self.reconcile(now, &mut events);
        }
        events
    }

    fn reconcile(&mut self, now: DateTime<Utc>, events: &mut Vec<TimerEvent>) {
        while self.state.running {
            let Some(anchor) = self.anchor else {
                break;
            };

            let remaining = anchor.remaining_at(now);
            if remaining != self.state.remaining_seconds {
                self.state.remaining_seconds = remaining;
                events.push(TimerEvent::Tick {
                    remaining_seconds: remaining,
                    phase: self.state.phase,
                    round: self.state.round,
                    set: self.state.set,
                });
            }

            if remaining > 0 {
                break;
            }

            debug!(
                "{} expired (round {}, set {})",
                self.state.phase, self.state.round, self.state.set
            );
            events.push(TimerEvent::PhaseExpired {
                phase: self.state.phase,
                round: self.state.round,
                set: self.state.set,
            });

            let next = next_phase(&self.state, &self.config);
            self.enter(next, anchor.expires_at(), events);
        }
    }

    /// Make `step` the current phase, its clock starting at `reference`
    fn enter(&mut self, step: PhaseStep, reference: DateTime<Utc>, events: &mut Vec<TimerEvent>) {
        self.state.phase = step.phase;
        self.state.round = step.round;
        self.state.set = step.set;
        self.state.remaining_seconds = step.duration_seconds;
        self.state.total_seconds = step.duration_seconds;

        events.push(TimerEvent::PhaseChanged {
            phase: step.phase,
            round: step.round,
            set: step.set,
            total_seconds: step.duration_seconds,
        });

        if step.phase == Phase::Finished {
            self.state.running = false;
            self.anchor = None;
            info!("Run finished after set {}", step.set);
            events.push(TimerEvent::Finished);
            events.push(TimerEvent::ActivityChanged { running: false });
        } else {
            debug!(
                "Entered {} for {}s (round {}, set {})",
                step.phase, step.duration_seconds, step.round, step.set
            );
            self.anchor = Some(TimeAnchor::new(reference, step.duration_seconds));
        }
    }
}
