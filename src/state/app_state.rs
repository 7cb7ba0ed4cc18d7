//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

use super::{Preset, PresetStore};
use crate::{
    error::StateError,
    timer::{Configuration, CountdownEngine, RunState, SharedClock, SystemClock, TimerEvent},
};

/// Engine type shared by the server, clock chosen at construction
pub type SharedEngine = CountdownEngine<SharedClock>;

/// Main application state: the process's single countdown engine plus the
/// configuration, presets and notification channels around it
pub struct AppState {
    /// The one live run for this server instance
    pub engine: Arc<Mutex<SharedEngine>>,
    /// Configuration used by the next `start()`
    pub configuration: Arc<Mutex<Configuration>>,
    pub presets: Arc<Mutex<PresetStore>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Every engine event, in order
    pub event_tx: broadcast::Sender<TimerEvent>,
    /// Latest run snapshot
    pub run_state_tx: watch::Sender<RunState>,
    /// Keep the receiver alive to prevent channel closure
    pub _run_state_rx: watch::Receiver<RunState>,
}

impl AppState {
    /// Create a new AppState on the system clock
    pub fn new(port: u16, host: String, configuration: Configuration) -> Self {
        Self::with_clock(port, host, configuration, Arc::new(SystemClock))
    }

    /// Create a new AppState whose engine reads time from `clock`
    pub fn with_clock(port: u16, host: String, configuration: Configuration, clock: SharedClock) -> Self {
        let (event_tx, _) = broadcast::channel(256);
        let (run_state_tx, run_state_rx) = watch::channel(RunState::idle());

        Self {
            engine: Arc::new(Mutex::new(CountdownEngine::with_clock(clock))),
            configuration: Arc::new(Mutex::new(configuration)),
            presets: Arc::new(Mutex::new(PresetStore::new())),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            event_tx,
            run_state_tx,
            _run_state_rx: run_state_rx,
        }
    }

    /// Run `op` against the engine, then publish its events and the new snapshot
    fn apply<F>(&self, action: Option<&str>, op: F) -> Result<RunState, StateError>
    where
        F: FnOnce(&mut SharedEngine) -> Result<Vec<TimerEvent>, StateError>,
    {
        let mut engine = self.engine.lock()
            .map_err(|_| StateError::Lock("engine"))?;

        let events = op(&mut *engine)?;
        let run_state = engine.state();

        // Publish while still holding the engine so subscribers see engine order
        if self.event_tx.receiver_count() > 0 {
            for event in events {
                if self.event_tx.send(event).is_err() {
                    debug!("Event dropped, all subscribers gone");
                    break;
                }
            }
        }

        self.run_state_tx.send_if_modified(|current| {
            let changed = *current != run_state;
            *current = run_state;
            changed
        });
        drop(engine);

        if let Some(action) = action {
            if let Ok(mut last_action) = self.last_action.lock() {
                *last_action = Some(action.to_string());
            }
            if let Ok(mut last_time) = self.last_action_time.lock() {
                *last_time = Some(Utc::now());
            }
        }

        Ok(run_state)
    }

    /// Start a run with the current configuration
    pub fn start(&self) -> Result<RunState, StateError> {
        let configuration = self.get_configuration()?;
        info!("Start requested");
        self.apply(Some("start"), |engine| Ok(engine.start(configuration)?))
    }

    pub fn pause(&self) -> Result<RunState, StateError> {
        self.apply(Some("pause"), |engine| Ok(engine.pause()))
    }

    pub fn resume(&self) -> Result<RunState, StateError> {
        self.apply(Some("resume"), |engine| Ok(engine.resume()))
    }

    pub fn toggle(&self) -> Result<RunState, StateError> {
        self.apply(Some("toggle"), |engine| Ok(engine.toggle()))
    }

    pub fn reset(&self) -> Result<RunState, StateError> {
        info!("Reset requested");
        self.apply(Some("reset"), |engine| Ok(engine.reset()))
    }

    /// Reconcile the engine with the clock; called by the ticker task
    pub fn tick(&self) -> Result<RunState, StateError> {
        self.apply(None, |engine| Ok(engine.tick()))
    }

    /// Subscribe to engine events
    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.event_tx.subscribe()
    }

    /// Get current run state
    pub fn get_run_state(&self) -> Result<RunState, StateError> {
        self.engine.lock()
            .map(|engine| engine.state())
            .map_err(|_| StateError::Lock("engine"))
    }

    /// Get the configuration the next run will use
    pub fn get_configuration(&self) -> Result<Configuration, StateError> {
        self.configuration.lock()
            .map(|config| *config)
            .map_err(|_| StateError::Lock("configuration"))
    }

    /// Replace the configuration for the next run. A run in progress keeps its own copy.
    pub fn set_configuration(&self, configuration: Configuration) -> Result<Configuration, StateError> {
        configuration.validate()?;

        let mut current = self.configuration.lock()
            .map_err(|_| StateError::Lock("configuration"))?;
        *current = configuration;
        info!("Configuration updated: {:?}", configuration);
        Ok(configuration)
    }

    pub fn list_presets(&self) -> Result<Vec<Preset>, StateError> {
        self.presets.lock()
            .map(|presets| presets.list().to_vec())
            .map_err(|_| StateError::Lock("presets"))
    }

    /// Save the current configuration as a named preset
    pub fn save_preset(&self, name: &str) -> Result<Preset, StateError> {
        let configuration = self.get_configuration()?;
        let mut presets = self.presets.lock()
            .map_err(|_| StateError::Lock("presets"))?;
        presets.save(name, configuration)
    }

    /// Make a preset the current configuration
    pub fn load_preset(&self, id: u64) -> Result<Preset, StateError> {
        let preset = {
            let presets = self.presets.lock()
                .map_err(|_| StateError::Lock("presets"))?;
            presets.get(id)?.clone()
        };
        self.set_configuration(preset.configuration)?;
        info!("Loaded preset '{}'", preset.name);
        Ok(preset)
    }

    pub fn delete_preset(&self, id: u64) -> Result<Preset, StateError> {
        let mut presets = self.presets.lock()
            .map_err(|_| StateError::Lock("presets"))?;
        presets.remove(id)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
