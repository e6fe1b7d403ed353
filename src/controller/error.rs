//! Controller error types.

use crate::actions::ActionError;
use crate::core::SensorEvent;
use crate::devices::DeviceError;
use thiserror::Error;

/// Errors that can occur while driving the event loop
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("sensor read failed: {0}")]
    Sensor(#[from] DeviceError),

    #[error("reaction to '{event}' failed: {source}")]
    Action {
        event: SensorEvent,
        #[source]
        source: ActionError,
    },

    /// Non-fatal: the loop skips lines that classify to nothing
    #[error("unrecognized event '{line}'")]
    UnrecognizedEvent { line: String },
}
