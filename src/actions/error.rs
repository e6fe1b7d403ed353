//! Action error types.

use crate::devices::DeviceError;
use thiserror::Error;

/// Errors that can occur while running an action
#[derive(Debug, Error)]
pub enum ActionError {
    /// A random pick was asked of an empty list
    #[error("{action} has nothing to choose from")]
    EmptySelection { action: &'static str },

    #[error(transparent)]
    Device(#[from] DeviceError),
}
