//! Device collaborators driven by actions and the controller.
//!
//! Each device is a trait so that actions can be exercised against
//! in-memory doubles and the binary can choose a hardware backend at
//! startup. Handles are shared as `Arc<dyn AudioPlayer>` and
//! `Arc<dyn LedLighter>`; calls are synchronous from the caller's side.
//!
//! # Backends
//!
//! | Device | Hardware | In-memory |
//! |---|---|---|
//! | [`AudioPlayer`] | [`Mpg123Player`], [`LoggingPlayer`] (dry run) | [`RecordingPlayer`] |
//! | [`LedLighter`] | [`LoggingLedLighter`] | [`RecordingLeds`] |
//! | [`SensorLine`] | [`LineSensor`] | [`ScriptedSensor`] |

mod console;
mod error;
mod memory;
mod mpg123;
mod serial;

pub use console::{LoggingLedLighter, LoggingPlayer};
pub use error::DeviceError;
pub use memory::{LedCall, PlayerCall, RecordingLeds, RecordingPlayer, ScriptedSensor};
pub use mpg123::Mpg123Player;
pub use serial::LineSensor;

use crate::core::{Track, Volume};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Audio output with a single current track and a play queue.
pub trait AudioPlayer: Send + Sync {
    /// Select the track the next `play` starts.
    fn load(&self, track: &Track) -> Result<(), DeviceError>;

    /// Start the loaded track from the beginning.
    fn play(&self) -> Result<(), DeviceError>;

    /// Append a track to play after the current one finishes.
    fn queue(&self, track: &Track) -> Result<(), DeviceError>;

    /// Stop playback immediately and drop anything queued.
    fn stop(&self) -> Result<(), DeviceError>;

    fn set_volume(&self, volume: Volume) -> Result<(), DeviceError>;

    /// Whether a track is currently playing.
    fn is_busy(&self) -> bool;
}

/// LED strip split into named groups.
pub trait LedLighter: Send + Sync {
    fn light_led_groups(&self, groups: &[String]) -> Result<(), DeviceError>;

    fn light_random_leds(&self) -> Result<(), DeviceError>;
}

/// Line-oriented sensor stream.
pub trait SensorLine {
    /// Wait up to `timeout` for the next line.
    ///
    /// Returns `Ok(None)` on timeout and `Err(DeviceError::Closed)` once the
    /// stream has ended.
    fn read_line(&mut self, timeout: Duration) -> Result<Option<String>, DeviceError>;
}

/// Lock a mutex, recovering the data if a panicking holder poisoned it.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
