//! Configuration and CLI argument handling

use clap::Parser;

use crate::timer::{parse_hms, Configuration};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "interval-timer")]
#[command(about = "An interval-workout timer with an HTTP control surface")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Warmup duration (ss, mm:ss or hh:mm:ss); 0 skips it
    #[arg(long, default_value = "10", value_parser = parse_hms)]
    pub warmup: u64,

    /// Workout duration (ss, mm:ss or hh:mm:ss)
    #[arg(long, default_value = "20", value_parser = parse_hms)]
    pub workout: u64,

    /// Rest between rounds (ss, mm:ss or hh:mm:ss); 0 skips it
    #[arg(long, default_value = "10", value_parser = parse_hms)]
    pub rest: u64,

    /// Workout rounds per set
    #[arg(short, long, default_value = "8")]
    pub rounds: u64,

    /// Number of sets
    #[arg(short, long, default_value = "3")]
    pub sets: u64,

    /// Rest between sets (ss, mm:ss or hh:mm:ss); 0 skips it
    #[arg(long, default_value = "30", value_parser = parse_hms)]
    pub set_rest: u64,

    /// Cooldown duration (ss, mm:ss or hh:mm:ss); 0 skips it
    #[arg(long, default_value = "60", value_parser = parse_hms)]
    pub cooldown: u64,

    /// Scheduler resolution in milliseconds
    #[arg(long, default_value = "250", value_parser = clap::value_parser!(u64).range(10..=1000))]
    pub tick_ms: u64,

    /// Start a run as soon as the server is up
    #[arg(long)]
    pub autostart: bool,

    /// Ring the terminal bell on countdown and phase-end cues
    #[arg(long)]
    pub bell: bool,

    /// Hold a systemd sleep inhibitor while a run is counting down
    #[arg(long)]
    pub inhibit_sleep: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Workout configuration from the duration and count flags (not yet validated)
    pub fn workout_configuration(&self) -> Configuration {
        Configuration {
            warmup_seconds: self.warmup,
            workout_seconds: self.workout,
            rest_seconds: self.rest,
            rounds: self.rounds,
            sets: self.sets,
            set_rest_seconds: self.set_rest,
            cooldown_seconds: self.cooldown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_configuration_defaults() {
        let config = Config::try_parse_from(["interval-timer"]).unwrap();
        assert_eq!(config.workout_configuration(), Configuration::default());
        assert_eq!(config.tick_ms, 250);
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.address(), "127.0.0.1:20554");
    }

    #[test]
    fn test_duration_flags_accept_clock_format() {
        let config = Config::try_parse_from([
            "interval-timer",
            "--warmup",
            "0",
            "--workout",
            "0:45",
            "--cooldown",
            "01:00:00",
            "--set-rest",
            "90",
            "-r",
            "4",
            "-v",
        ])
        .unwrap();

        let workout = config.workout_configuration();
        assert_eq!(workout.warmup_seconds, 0);
        assert_eq!(workout.workout_seconds, 45);
        assert_eq!(workout.cooldown_seconds, 3600);
        assert_eq!(workout.set_rest_seconds, 90);
        assert_eq!(workout.rounds, 4);
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_bad_duration_rejected() {
        assert!(Config::try_parse_from(["interval-timer", "--rest", "ten"]).is_err());
        assert!(Config::try_parse_from(["interval-timer", "--tick-ms", "0"]).is_err());
    }
}
