//! Drive cycle error types
//!
//! All of these are caller contract violations rather than recoverable
//! conditions: the cycle fails fast instead of emitting a wrong rotation
//! command to a physical drive base.

use core::fmt;

use crate::actuator::ActuatorError;
use crate::control::ConfigError;

/// Errors from constructing or cycling a drive controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriveError {
    /// The cycle timestamp did not advance past the previous cycle
    InvalidTiming {
        /// Computed time delta in seconds
        dt: f32,
    },
    /// Rejected tuning configuration
    Config(ConfigError),
    /// The actuator refused the command
    Actuator(ActuatorError),
}

impl fmt::Display for DriveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriveError::InvalidTiming { dt } => {
                write!(f, "non-positive cycle delta: {} s", dt)
            }
            DriveError::Config(err) => write!(f, "invalid configuration: {}", err),
            DriveError::Actuator(err) => write!(f, "actuator rejected command: {}", err),
        }
    }
}

impl From<ConfigError> for DriveError {
    fn from(err: ConfigError) -> Self {
        DriveError::Config(err)
    }
}

impl From<ActuatorError> for DriveError {
    fn from(err: ActuatorError) -> Self {
        DriveError::Actuator(err)
    }
}
