//! Error types for the interval timer

use thiserror::Error;

/// Reasons a workout configuration is rejected before a run starts.
///
/// Raised synchronously by [`CountdownEngine::start`](crate::timer::CountdownEngine::start)
/// and by the configuration endpoints; the engine state is never touched when one
/// of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("rounds must be at least 1")]
    ZeroRounds,

    #[error("sets must be at least 1")]
    ZeroSets,

    #[error("{field} must not be negative (got {value})")]
    NegativeValue { field: &'static str, value: i64 },
}

/// Failure to parse a `hh:mm:ss` style duration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid duration '{input}': expected ss, mm:ss or hh:mm:ss")]
pub struct DurationParseError {
    pub input: String,
}

/// Failures of the shared application state behind the HTTP API.
#[derive(Debug, Error)]
pub enum StateError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("failed to lock {0}")]
    Lock(&'static str),

    #[error("preset name must not be blank")]
    BlankPresetName,

    #[error("no preset with id {0}")]
    UnknownPreset(u64),
}
