//! Workout configuration and its validation

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Phase durations and repeat counts for one run.
///
/// A zero duration means the phase is skipped entirely. That includes the
/// workout: a run of zero-length workouts only visits the remaining phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub warmup_seconds: u64,
    pub workout_seconds: u64,
    pub rest_seconds: u64,
    pub rounds: u64,
    pub sets: u64,
    pub set_rest_seconds: u64,
    pub cooldown_seconds: u64,
}

impl Configuration {
    /// Check every field, returning the first problem found
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.rounds < 1 {
            return Err(ConfigurationError::ZeroRounds);
        }
        if self.sets < 1 {
            return Err(ConfigurationError::ZeroSets);
        }
        Ok(())
    }

    /// Planned length of a whole run in seconds, skipped phases excluded
    pub fn total_seconds(&self) -> u64 {
        let rounds = self.rounds.max(1);
        let sets = self.sets.max(1);

        let per_set = rounds
            .saturating_mul(self.workout_seconds)
            .saturating_add((rounds - 1).saturating_mul(self.rest_seconds));

        self.warmup_seconds
            .saturating_add(sets.saturating_mul(per_set))
            .saturating_add((sets - 1).saturating_mul(self.set_rest_seconds))
            .saturating_add(self.cooldown_seconds)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            warmup_seconds: 10,
            workout_seconds: 20,
            rest_seconds: 10,
            rounds: 8,
            sets: 3,
            set_rest_seconds: 30,
            cooldown_seconds: 60,
        }
    }
}

/// Configuration as submitted by external callers, before sign checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationInput {
    pub warmup_seconds: i64,
    pub workout_seconds: i64,
    pub rest_seconds: i64,
    pub rounds: i64,
    pub sets: i64,
    pub set_rest_seconds: i64,
    pub cooldown_seconds: i64,
}

impl TryFrom<ConfigurationInput> for Configuration {
    type Error = ConfigurationError;

    fn try_from(input: ConfigurationInput) -> Result<Self, Self::Error> {
        let non_negative = |field: &'static str, value: i64| {
            u64::try_from(value).map_err(|_| ConfigurationError::NegativeValue { field, value })
        };

        let config = Configuration {
            warmup_seconds: non_negative("warmup_seconds", input.warmup_seconds)?,
            workout_seconds: non_negative("workout_seconds", input.workout_seconds)?,
            rest_seconds: non_negative("rest_seconds", input.rest_seconds)?,
            rounds: non_negative("rounds", input.rounds)?,
            sets: non_negative("sets", input.sets)?,
            set_rest_seconds: non_negative("set_rest_seconds", input.set_rest_seconds)?,
            cooldown_seconds: non_negative("cooldown_seconds", input.cooldown_seconds)?,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ConfigurationInput {
        ConfigurationInput {
            warmup_seconds: 0,
            workout_seconds: 20,
            rest_seconds: 10,
            rounds: 2,
            sets: 1,
            set_rest_seconds: 30,
            cooldown_seconds: 0,
        }
    }

    #[test]
    fn test_default_is_valid() {
        assert_eq!(Configuration::default().validate(), Ok(()));
    }

    #[test]
    fn test_zero_rounds_and_sets_rejected() {
        let config = Configuration {
            rounds: 0,
            ..Configuration::default()
        };
        assert_eq!(config.validate(), Err(ConfigurationError::ZeroRounds));

        let config = Configuration {
            sets: 0,
            ..Configuration::default()
        };
        assert_eq!(config.validate(), Err(ConfigurationError::ZeroSets));
    }

    #[test]
    fn test_zero_workout_accepted() {
        let config = Configuration {
            workout_seconds: 0,
            ..Configuration::default()
        };
        assert_eq!(config.validate(), Ok(()));
        // 10 + 3 * 7*10 + 2*30 + 60
        assert_eq!(config.total_seconds(), 340);
    }

    #[test]
    fn test_optional_phases_may_be_zero() {
        let config = Configuration {
            warmup_seconds: 0,
            rest_seconds: 0,
            set_rest_seconds: 0,
            cooldown_seconds: 0,
            ..Configuration::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_long_durations_accepted() {
        let config = Configuration {
            cooldown_seconds: 360_000,
            ..Configuration::default()
        };
        assert_eq!(config.validate(), Ok(()));

        let raw = ConfigurationInput {
            workout_seconds: 1_000_000,
            ..input()
        };
        assert!(Configuration::try_from(raw).is_ok());
    }

    #[test]
    fn test_total_seconds() {
        // 10 + 3 * (8*20 + 7*10) + 2*30 + 60
        assert_eq!(Configuration::default().total_seconds(), 820);

        let config = Configuration::try_from(input()).unwrap();
        assert_eq!(config.total_seconds(), 50);
    }

    #[test]
    fn test_input_negative_value_rejected() {
        let raw = ConfigurationInput {
            rest_seconds: -5,
            ..input()
        };
        assert_eq!(
            Configuration::try_from(raw),
            Err(ConfigurationError::NegativeValue {
                field: "rest_seconds",
                value: -5
            })
        );
    }

    #[test]
    fn test_input_runs_validation() {
        let raw = ConfigurationInput { sets: 0, ..input() };
        assert_eq!(
            Configuration::try_from(raw),
            Err(ConfigurationError::ZeroSets)
        );
    }

    #[test]
    fn test_serde_field_names() {
        let json = serde_json::to_value(Configuration::default()).unwrap();
        assert_eq!(json["set_rest_seconds"], 30);
        assert_eq!(json["rounds"], 8);
    }
}
