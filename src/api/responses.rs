//! API response structures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::StateError,
    timer::{format_hms, Configuration, Phase, RunState},
};

/// Run state as shown to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub phase: Phase,
    pub phase_label: String,
    pub round: u64,
    pub set: u64,
    pub remaining_seconds: u64,
    pub total_seconds: u64,
    /// Remaining time as HH:MM:SS
    pub remaining: String,
    pub running: bool,
    pub paused: bool,
}

impl From<RunState> for RunSnapshot {
    fn from(state: RunState) -> Self {
        Self {
            phase: state.phase,
            phase_label: state.phase.label().to_string(),
            round: state.round,
            set: state.set,
            remaining_seconds: state.remaining_seconds,
            total_seconds: state.total_seconds,
            remaining: format_hms(state.remaining_seconds),
            running: state.running,
            paused: state.is_paused(),
        }
    }
}

/// API response structure for control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub run: RunSnapshot,
}

impl ControlResponse {
    /// Create a new control response, status derived from the run
    pub fn new(message: String, state: RunState) -> Self {
        let status = if state.running {
            "running"
        } else if state.is_paused() {
            "paused"
        } else if state.phase == Phase::Finished {
            "finished"
        } else {
            "idle"
        };

        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            run: state.into(),
        }
    }
}

/// Full status with configuration and server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub run: RunSnapshot,
    pub configuration: Configuration,
    pub planned_total_seconds: u64,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Body of `POST /presets`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavePresetRequest {
    pub name: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Error body returned for every failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

impl IntoResponse for StateError {
    fn into_response(self) -> Response {
        let code = match &self {
            StateError::Configuration(_) => StatusCode::UNPROCESSABLE_ENTITY,
            StateError::BlankPresetName => StatusCode::BAD_REQUEST,
            StateError::UnknownPreset(_) => StatusCode::NOT_FOUND,
            StateError::Lock(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse {
            status: "error".to_string(),
            error: self.to_string(),
            timestamp: Utc::now(),
        };
        (code, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_formats_remaining() {
        let state = RunState {
            phase: Phase::Cooldown,
            remaining_seconds: 75,
            total_seconds: 90,
            running: false,
            ..RunState::idle()
        };
        let snapshot = RunSnapshot::from(state);
        assert_eq!(snapshot.remaining, "00:01:15");
        assert_eq!(snapshot.phase_label, "Cooldown");
        assert!(snapshot.paused);
    }

    #[test]
    fn test_control_status_names() {
        assert_eq!(ControlResponse::new(String::new(), RunState::idle()).status, "idle");

        let finished = RunState {
            phase: Phase::Finished,
            ..RunState::idle()
        };
        assert_eq!(ControlResponse::new(String::new(), finished).status, "finished");

        let running = RunState {
            phase: Phase::Workout,
            running: true,
            ..RunState::idle()
        };
        assert_eq!(ControlResponse::new(String::new(), running).status, "running");
    }

    #[test]
    fn test_error_status_codes() {
        let response = StateError::UnknownPreset(3).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = StateError::BlankPresetName.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response =
            StateError::Configuration(crate::error::ConfigurationError::ZeroRounds).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = StateError::Lock("engine").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
