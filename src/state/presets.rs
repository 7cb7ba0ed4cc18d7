//! Named configuration presets
//!
//! Presets live only as long as the process; storing them anywhere else is
//! left to an external configuration store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{error::StateError, timer::Configuration};

/// A saved configuration under a user-chosen name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub id: u64,
    pub name: String,
    pub configuration: Configuration,
    pub created_at: DateTime<Utc>,
}

/// In-memory preset collection, in save order
#[derive(Debug)]
pub struct PresetStore {
    presets: Vec<Preset>,
    next_id: u64,
}

impl PresetStore {
    pub fn new() -> Self {
        Self {
            presets: Vec::new(),
            next_id: 1,
        }
    }

    pub fn list(&self) -> &[Preset] {
        &self.presets
    }

    /// Save `configuration` under `name` (trimmed; must not be blank)
    pub fn save(&mut self, name: &str, configuration: Configuration) -> Result<Preset, StateError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StateError::BlankPresetName);
        }

        let preset = Preset {
            id: self.next_id,
            name: name.to_string(),
            configuration,
            created_at: Utc::now(),
        };
        self.next_id += 1;
        self.presets.push(preset.clone());

        info!("Saved preset '{}' with id {}", preset.name, preset.id);
        Ok(preset)
    }

    pub fn get(&self, id: u64) -> Result<&Preset, StateError> {
        self.presets
            .iter()
            .find(|preset| preset.id == id)
            .ok_or(StateError::UnknownPreset(id))
    }

    pub fn remove(&mut self, id: u64) -> Result<Preset, StateError> {
        let index = self
            .presets
            .iter()
            .position(|preset| preset.id == id)
            .ok_or(StateError::UnknownPreset(id))?;

        let preset = self.presets.remove(index);
        info!("Deleted preset '{}' ({})", preset.name, preset.id);
        Ok(preset)
    }
}

impl Default for PresetStore {
    fn default() -> Self {
        Self::new()
    }
}
