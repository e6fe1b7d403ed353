//! The installation event loop.
//!
//! The controller reads one sensor line at a time, classifies it, and runs
//! the action registered for the resulting event. Everything happens on
//! the calling thread; the only wait is the bounded sensor read.

mod error;

pub use error::ControllerError;

use crate::actions::Action;
use crate::core::{EventClassifier, EventHistory, SensorEvent};
use crate::devices::{DeviceError, SensorLine};
use std::collections::HashMap;
use std::time::Duration;

/// Default bound on a single sensor read.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// What a single step did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The read timed out or returned a blank line
    Idle,

    /// The line matched no rule
    Unrecognized(String),

    /// The event has no registered reaction
    Ignored(SensorEvent),

    /// The event's reaction ran
    Dispatched(SensorEvent),
}

/// Sensor-driven event loop over a world `W`.
///
/// Build one with [`ControllerBuilder`](crate::builder::ControllerBuilder).
pub struct Controller<W, S> {
    pub(crate) world: W,
    pub(crate) sensor: S,
    pub(crate) classifier: EventClassifier,
    pub(crate) reactions: HashMap<SensorEvent, Action<W>>,
    pub(crate) startup: Option<Action<W>>,
    pub(crate) history: EventHistory,
    pub(crate) read_timeout: Duration,
}

impl<W, S: SensorLine> Controller<W, S> {
    /// Read, classify and react to one sensor line.
    pub fn step(&mut self) -> Result<StepOutcome, ControllerError> {
        match self.sensor.read_line(self.read_timeout)? {
            Some(line) => self.handle_line(&line),
            None => Ok(StepOutcome::Idle),
        }
    }

    /// Run the startup action, then step until the sensor closes.
    ///
    /// Failing actions are logged and the loop carries on; a sensor failure
    /// other than end of stream ends the run with an error.
    pub fn run(&mut self) -> Result<(), ControllerError> {
        if let Some(startup) = &self.startup {
            tracing::info!(action = startup.name(), "running startup action");
            if let Err(err) = startup.run(&mut self.world) {
                tracing::warn!(error = %err, "startup action failed");
            }
        }

        loop {
            match self.step() {
                Ok(_) => {}
                Err(ControllerError::Sensor(DeviceError::Closed)) => {
                    tracing::info!(events = self.history.total(), "sensor closed, stopping");
                    return Ok(());
                }
                Err(err @ ControllerError::Action { .. }) => {
                    tracing::warn!(error = %err, "reaction failed");
                }
                Err(err) => return Err(err),
            }
        }
    }
}

impl<W, S> Controller<W, S> {
    /// Classify `line` and react to it as if the sensor had sent it.
    pub fn handle_line(&mut self, line: &str) -> Result<StepOutcome, ControllerError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(StepOutcome::Idle);
        }

        let event = self.classifier.classify(line);
        if !event.is_known() {
            tracing::debug!(line, "unrecognized sensor line");
            return Ok(StepOutcome::Unrecognized(line.to_string()));
        }

        self.dispatch(event, line)
    }

    /// Run the reaction for `event` directly, bypassing the sensor.
    pub fn trigger(&mut self, event: SensorEvent) -> Result<StepOutcome, ControllerError> {
        if !event.is_known() {
            return Err(ControllerError::UnrecognizedEvent {
                line: event.name().to_string(),
            });
        }
        self.dispatch(event, event.name())
    }

    fn dispatch(&mut self, event: SensorEvent, line: &str) -> Result<StepOutcome, ControllerError> {
        let Some(action) = self.reactions.get(&event) else {
            tracing::debug!(%event, "no reaction registered");
            return Ok(StepOutcome::Ignored(event));
        };

        tracing::info!(%event, action = action.name(), "dispatching");
        self.history.record(event, line);
        action
            .run(&mut self.world)
            .map_err(|source| ControllerError::Action { event, source })?;

        Ok(StepOutcome::Dispatched(event))
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn history(&self) -> &EventHistory {
        &self.history
    }

    pub fn classifier(&self) -> &EventClassifier {
        &self.classifier
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Registered reaction for `event`, if any.
    pub fn reaction(&self, event: SensorEvent) -> Option<&Action<W>> {
        self.reactions.get(&event)
    }

    /// Tear the controller down, handing back the world and the sensor.
    pub fn into_parts(self) -> (W, S) {
        (self.world, self.sensor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{increment_aphorism_count, play_random_speech, set_volume};
    use crate::builder::ControllerBuilder;
    use crate::core::{InstallationState, Volume, WorldState};
    use crate::devices::{AudioPlayer, RecordingPlayer, ScriptedSensor};
    use std::sync::Arc;

    fn controller(
        sensor: ScriptedSensor,
    ) -> (Arc<RecordingPlayer>, Controller<InstallationState, ScriptedSensor>) {
        let player = Arc::new(RecordingPlayer::new());
        let handle: Arc<dyn AudioPlayer> = player.clone();

        let controller = ControllerBuilder::new()
            .world(InstallationState::new())
            .sensor(sensor)
            .on(SensorEvent::Near, increment_aphorism_count())
            .on(SensorEvent::Talking, set_volume(handle, Volume::HUSHED))
            .build()
            .unwrap();
        (player, controller)
    }

    #[test]
    fn timeout_is_idle() {
        let (_, mut controller) = controller(ScriptedSensor::default().with_timeout());
        assert_eq!(controller.step().unwrap(), StepOutcome::Idle);
    }

    #[test]
    fn blank_line_is_idle() {
        let (_, mut controller) = controller(ScriptedSensor::new(["  \r"]));
        assert_eq!(controller.step().unwrap(), StepOutcome::Idle);
        assert!(controller.history().is_empty());
    }

    #[test]
    fn unrecognized_line_is_skipped() {
        let (player, mut controller) = controller(ScriptedSensor::new(["distance=12"]));

        assert_eq!(
            controller.step().unwrap(),
            StepOutcome::Unrecognized("distance=12".to_string())
        );
        assert!(player.calls().is_empty());
        assert!(controller.history().is_empty());
    }

    #[test]
    fn known_event_dispatches_and_records() {
        let (player, mut controller) = controller(ScriptedSensor::new(["talking"]));

        assert_eq!(
            controller.step().unwrap(),
            StepOutcome::Dispatched(SensorEvent::Talking)
        );
        assert_eq!(player.volume(), Some(Volume::HUSHED));
        assert_eq!(controller.history().count(SensorEvent::Talking), 1);
    }

    #[test]
    fn event_without_reaction_is_ignored() {
        let (_, mut controller) = controller(ScriptedSensor::new(["silence"]));
        assert_eq!(
            controller.step().unwrap(),
            StepOutcome::Ignored(SensorEvent::Silence)
        );
    }

    #[test]
    fn closed_sensor_is_an_error_for_step() {
        let (_, mut controller) = controller(ScriptedSensor::default());
        assert!(matches!(
            controller.step(),
            Err(ControllerError::Sensor(DeviceError::Closed))
        ));
    }

    #[test]
    fn trigger_unknown_is_rejected() {
        let (_, mut controller) = controller(ScriptedSensor::default());
        assert!(matches!(
            controller.trigger(SensorEvent::Unknown),
            Err(ControllerError::UnrecognizedEvent { .. })
        ));
    }

    #[test]
    fn trigger_runs_reaction() {
        let (_, mut controller) = controller(ScriptedSensor::default());
        controller.trigger(SensorEvent::Near).unwrap();
        assert_eq!(controller.world().aphorism_count(), 1);
    }

    #[test]
    fn run_continues_past_failed_reaction() {
        let player = Arc::new(RecordingPlayer::new());
        let handle: Arc<dyn AudioPlayer> = player.clone();

        let mut controller = ControllerBuilder::new()
            .world(InstallationState::new())
            .sensor(ScriptedSensor::new(["isNear", "talking", "isNear"]))
            .on(SensorEvent::Near, play_random_speech(handle.clone(), Vec::new()))
            .on(SensorEvent::Talking, increment_aphorism_count())
            .build()
            .unwrap();

        controller.run().unwrap();

        assert_eq!(controller.world().aphorism_count(), 1);
        assert_eq!(controller.history().total(), 3);
    }

    #[test]
    fn run_executes_startup_first() {
        let mut controller = ControllerBuilder::new()
            .world(InstallationState::new())
            .sensor(ScriptedSensor::default())
            .startup(increment_aphorism_count())
            .on(SensorEvent::Near, increment_aphorism_count())
            .build()
            .unwrap();

        controller.run().unwrap();
        assert_eq!(controller.world().aphorism_count(), 1);
    }
}
