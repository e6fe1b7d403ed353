//! Device error types.

use thiserror::Error;

/// Errors raised by device backends
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Device could not be opened or stopped responding
    #[error("{device} unavailable: {reason}")]
    Unavailable { device: String, reason: String },

    #[error("device I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Sensor stream reached its end
    #[error("sensor stream closed")]
    Closed,

    /// Device was driven out of order or answered unexpectedly
    #[error("device protocol error: {0}")]
    Protocol(String),
}

impl DeviceError {
    pub fn unavailable(device: impl Into<String>, reason: impl ToString) -> Self {
        Self::Unavailable {
            device: device.into(),
            reason: reason.to_string(),
        }
    }
}
