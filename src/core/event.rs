//! Discrete events derived from raw sensor lines.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of events the sensor can report.
///
/// `Unknown` is what a line classifies to when no rule matches; it is
/// never dispatched to an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorEvent {
    Near,
    Talking,
    Silence,
    Unknown,
}

impl SensorEvent {
    /// Stable lowercase name used in logs and configuration.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Near => "near",
            Self::Talking => "talking",
            Self::Silence => "silence",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for SensorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
