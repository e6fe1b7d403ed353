//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// A single rule broken by a configuration file
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("sensor.read_timeout_secs must be a positive number of seconds (got {value})")]
    InvalidTimeout { value: f64 },

    #[error("{field} must be between 0.0 and 1.0 (got {value})")]
    VolumeOutOfRange { field: &'static str, value: f32 },

    #[error("sensor.rules is empty; at least one rule is required")]
    NoRules,

    #[error("sensor.rules[{index}] has an empty pattern")]
    EmptyPattern { index: usize },

    #[error("sensor.rules[{index}] maps '{pattern}' to the unknown event")]
    UnknownEventRule { index: usize, pattern: String },

    #[error("audio.extension must not be empty")]
    EmptyExtension,

    #[error("leds.mode = \"groups\" needs at least one entry in leds.groups")]
    MissingLedGroups,
}

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("config file is not valid TOML: {0}")]
    Parse(String),

    /// Every violation found, not just the first
    #[error("invalid configuration: {}", summarize(.0))]
    Invalid(Vec<ConfigViolation>),

    #[error("no .{extension} tracks found in {dir}")]
    NoTracks { dir: PathBuf, extension: String },

    #[error("cannot list {dir}: {reason}")]
    Assets { dir: PathBuf, reason: String },
}

fn summarize(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
