//! Devices that report through the log.
//!
//! The LED driver itself runs outside this process; [`LoggingLedLighter`]
//! emits one structured `tracing` event per lighting command so the driver
//! (or an operator) can follow along. [`LoggingPlayer`] does the same for
//! audio in dry runs.

use super::{lock, AudioPlayer, DeviceError, LedLighter};
use crate::core::{Track, Volume};
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Player that logs every command instead of producing sound.
///
/// Only the loaded track and the busy flag are kept. Nothing ever finishes
/// playing, so the player stays busy from the first `play` until `stop`.
#[derive(Debug, Default)]
pub struct LoggingPlayer {
    loaded: Mutex<Option<Track>>,
    busy: AtomicBool,
}

impl LoggingPlayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioPlayer for LoggingPlayer {
    fn load(&self, track: &Track) -> Result<(), DeviceError> {
        tracing::info!(track = %track, "load");
        *lock(&self.loaded) = Some(track.clone());
        Ok(())
    }

    fn play(&self) -> Result<(), DeviceError> {
        let loaded = lock(&self.loaded);
        let track = loaded
            .as_ref()
            .ok_or_else(|| DeviceError::Protocol("play called before load".to_string()))?;
        tracing::info!(track = %track, "play");
        self.busy.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn queue(&self, track: &Track) -> Result<(), DeviceError> {
        tracing::debug!(track = %track, "queue");
        Ok(())
    }

    fn stop(&self) -> Result<(), DeviceError> {
        tracing::info!("stop");
        self.busy.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn set_volume(&self, volume: Volume) -> Result<(), DeviceError> {
        tracing::info!(%volume, "volume");
        Ok(())
    }

    fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }
}

pub struct LoggingLedLighter {
    groups: Vec<String>,
}

impl LoggingLedLighter {
    /// `groups` are the group names eligible for random lighting.
    pub fn new(groups: Vec<String>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    fn random_selection(&self) -> Vec<String> {
        let mut rng = rand::thread_rng();
        let count = match self.groups.len() {
            0 => 0,
            n => rng.gen_range(1..=n),
        };
        self.groups
            .choose_multiple(&mut rng, count)
            .cloned()
            .collect()
    }
}

impl LedLighter for LoggingLedLighter {
    fn light_led_groups(&self, groups: &[String]) -> Result<(), DeviceError> {
        tracing::info!(groups = ?groups, "lighting LED groups");
        Ok(())
    }

    fn light_random_leds(&self) -> Result<(), DeviceError> {
        let selection = self.random_selection();
        tracing::info!(groups = ?selection, "lighting random LED groups");
        Ok(())
    }
}
