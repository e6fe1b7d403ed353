//! In-memory device doubles.
//!
//! These backends record every call instead of touching hardware. They
//! back the `--dry-run` mode of the binary and the test suite.

use super::{lock, AudioPlayer, DeviceError, LedLighter, SensorLine};
use crate::core::{Track, Volume};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// A call received by [`RecordingPlayer`].
#[derive(Clone, Debug, PartialEq)]
pub enum PlayerCall {
    Load(Track),
    Play,
    Queue(Track),
    Stop,
    SetVolume(Volume),
}

#[derive(Debug, Default)]
struct PlayerLog {
    calls: Vec<PlayerCall>,
    loaded: Option<Track>,
    queue: Vec<Track>,
    volume: Option<Volume>,
}

/// Player that records calls and simulates the busy flag.
///
/// `play` marks the player busy and `stop` clears it; tests can also force
/// the flag with [`set_busy`](Self::set_busy).
#[derive(Debug, Default)]
pub struct RecordingPlayer {
    log: Mutex<PlayerLog>,
    busy: AtomicBool,
    unavailable: AtomicBool,
}

impl RecordingPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_busy(&self, busy: bool) {
        self.busy.store(busy, Ordering::SeqCst);
    }

    /// Make every subsequent call fail with `DeviceError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<PlayerCall> {
        lock(&self.log).calls.clone()
    }

    pub fn loaded(&self) -> Option<Track> {
        lock(&self.log).loaded.clone()
    }

    /// Tracks queued since the last `stop`.
    pub fn queued(&self) -> Vec<Track> {
        lock(&self.log).queue.clone()
    }

    pub fn volume(&self) -> Option<Volume> {
        lock(&self.log).volume
    }

    /// Number of `load` calls so far.
    pub fn load_count(&self) -> usize {
        self.count(|call| matches!(call, PlayerCall::Load(_)))
    }

    /// Number of `play` calls so far.
    pub fn play_count(&self) -> usize {
        self.count(|call| matches!(call, PlayerCall::Play))
    }

    fn count(&self, predicate: impl Fn(&PlayerCall) -> bool) -> usize {
        lock(&self.log).calls.iter().filter(|&call| predicate(call)).count()
    }

    fn check_available(&self) -> Result<(), DeviceError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DeviceError::unavailable("recording player", "marked unavailable"));
        }
        Ok(())
    }
}

impl AudioPlayer for RecordingPlayer {
    fn load(&self, track: &Track) -> Result<(), DeviceError> {
        self.check_available()?;
        let mut log = lock(&self.log);
        log.calls.push(PlayerCall::Load(track.clone()));
        log.loaded = Some(track.clone());
        Ok(())
    }

    fn play(&self) -> Result<(), DeviceError> {
        self.check_available()?;
        let mut log = lock(&self.log);
        if log.loaded.is_none() {
            return Err(DeviceError::Protocol("play called before load".to_string()));
        }
        log.calls.push(PlayerCall::Play);
        self.busy.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn queue(&self, track: &Track) -> Result<(), DeviceError> {
        self.check_available()?;
        let mut log = lock(&self.log);
        log.calls.push(PlayerCall::Queue(track.clone()));
        log.queue.push(track.clone());
        Ok(())
    }

    fn stop(&self) -> Result<(), DeviceError> {
        self.check_available()?;
        let mut log = lock(&self.log);
        log.calls.push(PlayerCall::Stop);
        log.queue.clear();
        self.busy.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn set_volume(&self, volume: Volume) -> Result<(), DeviceError> {
        self.check_available()?;
        let mut log = lock(&self.log);
        log.calls.push(PlayerCall::SetVolume(volume));
        log.volume = Some(volume);
        Ok(())
    }

    fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }
}

/// A call received by [`RecordingLeds`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedCall {
    Groups(Vec<String>),
    Random,
}

/// LED lighter that records calls.
#[derive(Debug, Default)]
pub struct RecordingLeds {
    calls: Mutex<Vec<LedCall>>,
}

impl RecordingLeds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<LedCall> {
        lock(&self.calls).clone()
    }
}

impl LedLighter for RecordingLeds {
    fn light_led_groups(&self, groups: &[String]) -> Result<(), DeviceError> {
        lock(&self.calls).push(LedCall::Groups(groups.to_vec()));
        Ok(())
    }

    fn light_random_leds(&self) -> Result<(), DeviceError> {
        lock(&self.calls).push(LedCall::Random);
        Ok(())
    }
}

/// Sensor replaying a fixed script.
///
/// Each entry is either a line or a timeout. Once the script is exhausted
/// the sensor reports [`DeviceError::Closed`].
///
/// ```rust
/// use pythia::devices::{ScriptedSensor, SensorLine};
/// use std::time::Duration;
///
/// let mut sensor = ScriptedSensor::new(["isNear"]).with_timeout();
/// let wait = Duration::from_secs(5);
///
/// assert_eq!(sensor.read_line(wait).unwrap(), Some("isNear".to_string()));
/// assert_eq!(sensor.read_line(wait).unwrap(), None);
/// assert!(sensor.read_line(wait).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedSensor {
    script: VecDeque<Option<String>>,
}

impl ScriptedSensor {
    pub fn new<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            script: lines.into_iter().map(|line| Some(line.into())).collect(),
        }
    }

    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.script.push_back(Some(line.into()));
        self
    }

    pub fn with_timeout(mut self) -> Self {
        self.script.push_back(None);
        self
    }

    /// Entries not yet read.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl SensorLine for ScriptedSensor {
    fn read_line(&mut self, _timeout: Duration) -> Result<Option<String>, DeviceError> {
        self.script.pop_front().ok_or(DeviceError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_requires_load() {
        let player = RecordingPlayer::new();
        assert!(matches!(player.play(), Err(DeviceError::Protocol(_))));
        assert!(!player.is_busy());
    }

    #[test]
    fn play_then_stop_toggles_busy() {
        let player = RecordingPlayer::new();
        player.load(&Track::from("a.mp3")).unwrap();
        player.play().unwrap();
        assert!(player.is_busy());

        player.queue(&Track::from("b.mp3")).unwrap();
        player.stop().unwrap();
        assert!(!player.is_busy());
        assert!(player.queued().is_empty());
    }

    #[test]
    fn unavailable_player_rejects_calls() {
        let player = RecordingPlayer::new();
        player.set_unavailable(true);

        let result = player.set_volume(Volume::FULL);
        assert!(matches!(result, Err(DeviceError::Unavailable { .. })));
        assert!(player.calls().is_empty());
    }

    #[test]
    fn leds_record_calls_in_order() {
        let leds = RecordingLeds::new();
        leds.light_random_leds().unwrap();
        leds.light_led_groups(&["ring".to_string()]).unwrap();

        assert_eq!(
            leds.calls(),
            vec![LedCall::Random, LedCall::Groups(vec!["ring".to_string()])]
        );
    }

    #[test]
    fn scripted_sensor_closes_when_exhausted() {
        let mut sensor = ScriptedSensor::default();
        assert!(matches!(
            sensor.read_line(Duration::ZERO),
            Err(DeviceError::Closed)
        ));
    }
}
