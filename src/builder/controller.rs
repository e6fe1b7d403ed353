//! Builder for constructing controllers.

use crate::actions::Action;
use crate::builder::error::BuildError;
use crate::controller::{Controller, DEFAULT_READ_TIMEOUT};
use crate::core::{EventClassifier, EventHistory, MatchRule, SensorEvent, DEFAULT_HISTORY_CAPACITY};
use std::collections::HashMap;
use std::time::Duration;

/// Builder for constructing controllers with a fluent API.
///
/// The classifier starts with the stock sensor rules; replace them with
/// [`rules`](Self::rules) or append with [`rule`](Self::rule).
///
/// # Example
///
/// ```
/// use pythia::actions::increment_aphorism_count;
/// use pythia::builder::ControllerBuilder;
/// use pythia::core::{InstallationState, SensorEvent, WorldState};
/// use pythia::devices::ScriptedSensor;
///
/// let mut controller = ControllerBuilder::new()
///     .world(InstallationState::new())
///     .sensor(ScriptedSensor::new(["isNear", "noise", "isNear"]))
///     .on(SensorEvent::Near, increment_aphorism_count())
///     .build()
///     .unwrap();
///
/// controller.run().unwrap();
/// assert_eq!(controller.world().aphorism_count(), 2);
/// ```
pub struct ControllerBuilder<W, S> {
    world: Option<W>,
    sensor: Option<S>,
    classifier: EventClassifier,
    reactions: HashMap<SensorEvent, Action<W>>,
    unknown_reaction: bool,
    startup: Option<Action<W>>,
    read_timeout: Duration,
    history_capacity: usize,
}

impl<W, S> ControllerBuilder<W, S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            world: None,
            sensor: None,
            classifier: EventClassifier::default(),
            reactions: HashMap::new(),
            unknown_reaction: false,
            startup: None,
            read_timeout: DEFAULT_READ_TIMEOUT,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }

    /// Set the world state (required).
    pub fn world(mut self, world: W) -> Self {
        self.world = Some(world);
        self
    }

    /// Set the sensor (required).
    pub fn sensor(mut self, sensor: S) -> Self {
        self.sensor = Some(sensor);
        self
    }

    /// Replace the classification rules.
    pub fn rules(mut self, rules: Vec<MatchRule>) -> Self {
        self.classifier = EventClassifier::new(rules);
        self
    }

    /// Append one classification rule after the existing ones.
    pub fn rule(mut self, pattern: impl Into<String>, event: SensorEvent) -> Self {
        self.classifier = self.classifier.with_rule(pattern, event);
        self
    }

    /// Register the reaction to `event`, replacing any earlier one.
    pub fn on(mut self, event: SensorEvent, action: Action<W>) -> Self {
        if event.is_known() {
            self.reactions.insert(event, action);
        } else {
            self.unknown_reaction = true;
        }
        self
    }

    /// Action run once when the loop starts (optional).
    pub fn startup(mut self, action: Action<W>) -> Self {
        self.startup = Some(action);
        self
    }

    /// Bound on each sensor read (default 5 seconds).
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Number of dispatched events kept in the history.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Build the controller.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<Controller<W, S>, BuildError> {
        let world = self.world.ok_or(BuildError::MissingWorld)?;
        let sensor = self.sensor.ok_or(BuildError::MissingSensor)?;

        if self.classifier.is_empty() {
            return Err(BuildError::NoRules);
        }
        if self.unknown_reaction {
            return Err(BuildError::UnknownEventReaction);
        }

        for event in self.reactions.keys() {
            if !self.classifier.rules().iter().any(|rule| rule.event == *event) {
                tracing::warn!(%event, "reaction registered for an event no rule produces");
            }
        }

        Ok(Controller {
            world,
            sensor,
            classifier: self.classifier,
            reactions: self.reactions,
            startup: self.startup,
            history: EventHistory::with_capacity(self.history_capacity),
            read_timeout: self.read_timeout,
        })
    }
}

impl<W, S> Default for ControllerBuilder<W, S> {
    fn default() -> Self {
        Self::new()
    }
}
