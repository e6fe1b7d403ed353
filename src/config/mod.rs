//! Installation configuration.
//!
//! Configuration is a TOML file; every section and field is optional and
//! falls back to the values the installation has always used (sensor on
//! `/dev/ttyACM0` at 9600 baud, five second reads, music from `./music`).
//!
//! ```toml
//! log_level = "info"
//!
//! [sensor]
//! port = "/dev/ttyACM0"
//! baud_rate = 9600
//! read_timeout_secs = 5.0
//!
//! [[sensor.rules]]
//! pattern = "isNear"
//! event = "near"
//!
//! [audio]
//! music_dir = "music"
//! talking_volume = 0.2
//!
//! [leds]
//! mode = "random"
//! groups = ["halo", "floor"]
//! ```

mod error;
mod validation;

pub use error::{ConfigError, ConfigViolation};
pub use validation::validate;

use crate::controller::DEFAULT_READ_TIMEOUT;
use crate::core::{EventClassifier, MatchRule, Volume, DEFAULT_HISTORY_CAPACITY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use stillwater::validation::Validation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// `tracing` filter directive, overridden by `RUST_LOG`
    pub log_level: String,
    /// Dispatched events kept in memory
    pub history_capacity: usize,
    pub sensor: SensorConfig,
    pub audio: AudioConfig,
    pub leds: LedConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            sensor: SensorConfig::default(),
            audio: AudioConfig::default(),
            leds: LedConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SensorConfig {
    /// Serial device, or `-` for stdin
    pub port: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baud_rate: Option<u32>,
    pub read_timeout_secs: f64,
    /// Classification rules, highest priority first
    pub rules: Vec<MatchRule>,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            port: PathBuf::from("/dev/ttyACM0"),
            baud_rate: Some(9600),
            read_timeout_secs: DEFAULT_READ_TIMEOUT.as_secs_f64(),
            rules: EventClassifier::default().rules().to_vec(),
        }
    }
}

impl SensorConfig {
    /// Falls back to the default timeout when the value is not a valid duration.
    pub fn read_timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.read_timeout_secs).unwrap_or(DEFAULT_READ_TIMEOUT)
    }

    pub fn reads_stdin(&self) -> bool {
        self.port.as_os_str() == "-"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AudioConfig {
    pub music_dir: PathBuf,
    /// File extension of playable tracks, without the dot
    pub extension: String,
    /// mpg123-compatible player binary
    pub player: String,
    /// Play the first track as soon as the loop starts
    pub play_on_startup: bool,
    pub talking_volume: f32,
    pub full_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            music_dir: PathBuf::from("music"),
            extension: "mp3".to_string(),
            player: "mpg123".to_string(),
            play_on_startup: true,
            talking_volume: Volume::HUSHED.fraction(),
            full_volume: Volume::FULL.fraction(),
        }
    }
}

impl AudioConfig {
    pub fn talking_volume(&self) -> Volume {
        Volume::new(self.talking_volume)
    }

    pub fn full_volume(&self) -> Volume {
        Volume::new(self.full_volume)
    }
}

/// LED response when a visitor comes near.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedMode {
    #[default]
    Off,
    Random,
    Groups,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedConfig {
    pub mode: LedMode,
    /// Groups lit in `groups` mode, and the pool for `random` mode
    pub groups: Vec<String>,
}

impl Config {
    /// Read, parse and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        Self::parse(&text)
    }

    /// Load `path` if it exists. `Ok(None)` means there is no file and the
    /// caller decides how to fall back.
    pub fn load_if_exists(path: &Path) -> Result<Option<Self>, ConfigError> {
        if path.exists() {
            Self::load(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Parse and validate TOML text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validated()
    }

    /// Return `self` if every check passes, or every violation otherwise.
    pub fn validated(self) -> Result<Self, ConfigError> {
        match validate(&self) {
            Validation::Success(_) => Ok(self),
            Validation::Failure(errors) => Err(ConfigError::Invalid(errors.iter().cloned().collect())),
        }
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    pub fn classifier(&self) -> EventClassifier {
        EventClassifier::new(self.sensor.rules.clone())
    }
}
