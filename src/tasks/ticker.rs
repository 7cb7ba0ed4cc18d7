//! Ticker background task

use std::{sync::Arc, time::Duration};
use chrono::{DateTime, Utc};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::AppState;

/// Callbacks further apart than this are reported as a scheduler gap
pub const GAP_THRESHOLD_MS: i64 = 2_000;

/// Whether the time between two callbacks means the process was stalled or suspended
pub fn is_scheduler_gap(previous: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    (now - previous).num_milliseconds() > GAP_THRESHOLD_MS
}

/// Background task that drives the engine's `tick()` every `period`.
///
/// This is the only scheduling source for the engine. It never assumes how
/// much time passed; the engine recomputes from its anchor.
pub async fn ticker_task(state: Arc<AppState>, period: Duration) {
    info!("Starting ticker task every {}ms", period.as_millis());

    let mut interval = interval(period);
    // After a stall, fire once and carry on rather than replaying the missed ticks
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_tick = Utc::now();

    loop {
        interval.tick().await;

        let now = Utc::now();
        if is_scheduler_gap(last_tick, now) {
            info!(
                "Scheduler gap of {}ms detected, resynchronising from anchor",
                (now - last_tick).num_milliseconds()
            );
        }
        last_tick = now;

        match state.tick() {
            Ok(run) if run.running => {
                debug!("{} {}s remaining", run.phase, run.remaining_seconds);
            }
            Ok(_) => {}
            Err(e) => error!("Failed to tick timer: {}", e),
        }
    }
}
