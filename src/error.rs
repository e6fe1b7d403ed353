//! Top-level error type.

use crate::builder::BuildError;
use crate::config::ConfigError;
use crate::controller::ControllerError;
use crate::devices::DeviceError;
use thiserror::Error;

/// Everything that can stop an installation from starting or running.
///
/// Configuration and device errors are fatal at startup. Unrecognized
/// sensor lines never reach this type: the controller skips them.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error("device unavailable: {0}")]
    DeviceUnavailable(#[from] DeviceError),

    #[error("cannot assemble controller: {0}")]
    Build(#[from] BuildError),

    #[error(transparent)]
    Controller(#[from] ControllerError),
}
