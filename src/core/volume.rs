//! Playback volume as a fraction of the device maximum.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Volume fraction, always within `0.0..=1.0`.
///
/// Construction clamps out-of-range input; `NaN` becomes silence.
///
/// ```rust
/// use pythia::core::Volume;
///
/// assert_eq!(Volume::new(1.7), Volume::FULL);
/// assert_eq!(Volume::new(-0.5).fraction(), 0.0);
/// assert_eq!(Volume::QUIET.percent(), 30);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Volume(f32);

impl Volume {
    pub const MUTE: Volume = Volume(0.0);
    /// Level while visitors are talking.
    pub const HUSHED: Volume = Volume(0.2);
    pub const QUIET: Volume = Volume(0.3);
    pub const FULL: Volume = Volume(1.0);

    pub fn new(fraction: f32) -> Self {
        if fraction.is_nan() {
            return Self::MUTE;
        }
        Self(fraction.clamp(0.0, 1.0))
    }

    pub fn fraction(self) -> f32 {
        self.0
    }

    pub fn percent(self) -> u8 {
        (self.0 * 100.0).round() as u8
    }
}

impl From<f32> for Volume {
    fn from(fraction: f32) -> Self {
        Self::new(fraction)
    }
}

impl From<Volume> for f32 {
    fn from(volume: Volume) -> Self {
        volume.0
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_levels() {
        assert_eq!(Volume::HUSHED.percent(), 20);
        assert_eq!(Volume::QUIET.percent(), 30);
        assert_eq!(Volume::FULL.percent(), 100);
        assert_eq!(Volume::MUTE.to_string(), "0%");
    }

    #[test]
    fn nan_is_mute() {
        assert_eq!(Volume::new(f32::NAN), Volume::MUTE);
    }
}
