//! Build errors for the controller builder.

use thiserror::Error;

/// Errors that can occur when building a controller.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("World state not specified. Call .world(state) before .build()")]
    MissingWorld,

    #[error("Sensor not specified. Call .sensor(sensor) before .build()")]
    MissingSensor,

    #[error("No classification rules. Add at least one rule")]
    NoRules,

    #[error("Reactions cannot be registered for the unknown event")]
    UnknownEventReaction,
}
