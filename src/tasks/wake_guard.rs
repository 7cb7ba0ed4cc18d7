//! Wake guard background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::{services::SleepInhibitor, state::AppState, timer::TimerEvent};

/// Whether `event` says the run started (`Some(true)`) or stopped (`Some(false)`) counting down
pub fn activity_change(event: &TimerEvent) -> Option<bool> {
    match *event {
        TimerEvent::ActivityChanged { running } => Some(running),
        _ => None,
    }
}

/// Background task that keeps the machine awake while a run is counting down
pub async fn wake_guard_task(state: Arc<AppState>) {
    info!("Starting wake guard task");

    let mut events = state.subscribe();
    let mut inhibitor: Option<SleepInhibitor> = None;

    loop {
        let running = match events.recv().await {
            Ok(event) => match activity_change(&event) {
                Some(running) => running,
                None => continue,
            },
            Err(RecvError::Lagged(skipped)) => {
                // Missed transitions; trust the current snapshot instead
                warn!("Wake guard lagged by {} events, resyncing", skipped);
                match state.get_run_state() {
                    Ok(run) => run.running,
                    Err(e) => {
                        warn!("Failed to read run state: {}", e);
                        continue;
                    }
                }
            }
            Err(RecvError::Closed) => break,
        };

        if running && inhibitor.is_none() {
            match SleepInhibitor::acquire("Interval workout in progress").await {
                Ok(guard) => inhibitor = Some(guard),
                Err(e) => warn!("Failed to acquire sleep inhibitor: {}", e),
            }
        } else if !running {
            if let Some(guard) = inhibitor.take() {
                if let Err(e) = guard.release().await {
                    warn!("Failed to release sleep inhibitor: {}", e);
                }
            }
        }
    }

    info!("Event channel closed, stopping wake guard task");
}
