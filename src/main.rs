//! Interval Timer - A drift-corrected interval-workout timer
//!
//! This is the main entry point for the interval-timer server.

use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tracing::info;

use interval_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    services::check_inhibit_available,
    tasks::{cue_task, ticker_task, wake_guard_task},
    timer::format_hms,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("interval_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting interval-timer server v{}", env!("CARGO_PKG_VERSION"));

    let workout = config.workout_configuration();
    workout.validate()?;
    info!("Workout: warmup={}s workout={}s rest={}s rounds={} sets={} set_rest={}s cooldown={}s (total {})",
          workout.warmup_seconds, workout.workout_seconds, workout.rest_seconds,
          workout.rounds, workout.sets, workout.set_rest_seconds, workout.cooldown_seconds,
          format_hms(workout.total_seconds()));

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), workout));

    // Start the scheduling source and the event subscribers
    let ticker_state = Arc::clone(&state);
    let period = Duration::from_millis(config.tick_ms);
    tokio::spawn(async move {
        ticker_task(ticker_state, period).await;
    });

    let cue_state = Arc::clone(&state);
    let bell = config.bell;
    tokio::spawn(async move {
        cue_task(cue_state, bell).await;
    });

    if config.inhibit_sleep {
        match check_inhibit_available().await {
            Ok(()) => {
                let guard_state = Arc::clone(&state);
                tokio::spawn(async move {
                    wake_guard_task(guard_state).await;
                });
            }
            Err(e) => tracing::warn!("Sleep inhibition disabled: {}", e),
        }
    }

    if config.autostart {
        let run = state.start()?;
        info!("Autostarted in {} ({}s)", run.phase, run.remaining_seconds);
    }

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST   /start            - Start a run with the current configuration");
    info!("  POST   /pause            - Pause the countdown");
    info!("  POST   /resume           - Resume a paused countdown");
    info!("  POST   /toggle           - Pause or resume");
    info!("  POST   /reset            - Return to idle");
    info!("  GET    /status           - Current phase, round, set and remaining time");
    info!("  GET    /config           - Configuration for the next run");
    info!("  PUT    /config           - Replace the configuration");
    info!("  GET    /presets          - List presets");
    info!("  POST   /presets          - Save the configuration as a preset");
    info!("  POST   /presets/:id/load - Load a preset");
    info!("  DELETE /presets/:id      - Delete a preset");
    info!("  GET    /events           - Server-Sent Events stream");
    info!("  GET    /health           - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            match result {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => tracing::error!("Failed to install signal handler: {}", e),
            }
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
