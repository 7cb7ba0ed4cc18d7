//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::{Path, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::Stream;
use tokio_stream::{wrappers::BroadcastStream, StreamExt};
use tracing::{info, warn};

use crate::{
    error::StateError,
    state::{AppState, Preset},
    timer::{Configuration, ConfigurationInput},
};
use super::responses::{ControlResponse, HealthResponse, SavePresetRequest, StatusResponse};

/// Handle POST /start - Start a run with the current configuration
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ControlResponse>, StateError> {
    match state.start() {
        Ok(run) => {
            info!("Start endpoint called - {} round {} set {}", run.phase, run.round, run.set);
            Ok(Json(ControlResponse::new("Run started".to_string(), run)))
        }
        Err(e) => {
            warn!("Failed to start run: {}", e);
            Err(e)
        }
    }
}

/// Handle POST /pause - Pause the running countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ControlResponse>, StateError> {
    let run = state.pause()?;
    Ok(Json(ControlResponse::new("Pause requested".to_string(), run)))
}

/// Handle POST /resume - Resume a paused countdown
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> Result<Json<ControlResponse>, StateError> {
    let run = state.resume()?;
    Ok(Json(ControlResponse::new("Resume requested".to_string(), run)))
}

/// Handle POST /toggle - Pause when running, resume when paused
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ControlResponse>, StateError> {
    let run = state.toggle()?;
    Ok(Json(ControlResponse::new("Toggle requested".to_string(), run)))
}

/// Handle POST /reset - Return to idle
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ControlResponse>, StateError> {
    let run = state.reset()?;
    info!("Reset endpoint called");
    Ok(Json(ControlResponse::new("Run reset".to_string(), run)))
}

/// Handle GET /status - Return current run and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StateError> {
    let run = state.get_run_state()?;
    let configuration = state.get_configuration()?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        run: run.into(),
        configuration,
        planned_total_seconds: configuration.total_seconds(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /config - Return the configuration for the next run
pub async fn get_config_handler(State(state): State<Arc<AppState>>) -> Result<Json<Configuration>, StateError> {
    Ok(Json(state.get_configuration()?))
}

/// Handle PUT /config - Validate and replace the configuration for the next run
pub async fn put_config_handler(
    State(state): State<Arc<AppState>>,
    Json(input): Json<ConfigurationInput>,
) -> Result<Json<Configuration>, StateError> {
    let configuration = Configuration::try_from(input)?;
    Ok(Json(state.set_configuration(configuration)?))
}

/// Handle GET /presets - List saved presets
pub async fn list_presets_handler(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Preset>>, StateError> {
    Ok(Json(state.list_presets()?))
}

/// Handle POST /presets - Save the current configuration under a name
pub async fn save_preset_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SavePresetRequest>,
) -> Result<Json<Preset>, StateError> {
    Ok(Json(state.save_preset(&request.name)?))
}

/// Handle POST /presets/:id/load - Make a preset the current configuration
pub async fn load_preset_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Preset>, StateError> {
    Ok(Json(state.load_preset(id)?))
}

/// Handle DELETE /presets/:id - Delete a preset
pub async fn delete_preset_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Preset>, StateError> {
    Ok(Json(state.delete_preset(id)?))
}

/// Handle GET /events - Stream engine events as Server-Sent Events
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(state.subscribe()).filter_map(|result| {
        result
            .ok()
            .and_then(|event| Event::default().json_data(event).ok())
            .map(Ok)
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
