//! Holonomic actuator abstraction
//!
//! The drive facade hands its final actuation tuple to an implementation
//! of [`HolonomicActuator`]. All wheel math (field-orientation transform,
//! four-wheel speed mixing, normalization) lives behind this trait; the
//! controller itself never touches wheel speeds.

use core::fmt;

/// Actuator error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// Command component outside the actuator-acceptable range or not finite
    InvalidCommand,
    /// Motor controller or output stage failure
    HardwareFault,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActuatorError::InvalidCommand => write!(f, "command outside acceptable range"),
            ActuatorError::HardwareFault => write!(f, "actuator hardware fault"),
        }
    }
}

/// Four-wheel holonomic drive actuator.
///
/// Accepts one actuation tuple per control cycle and performs the
/// wheel-speed mixing and field-orientation transform for the drive base.
pub trait HolonomicActuator {
    /// Apply one actuation command.
    ///
    /// # Arguments
    ///
    /// * `forward` - Forward command in [-1, 1]
    /// * `strafe` - Strafe command in [-1, 1]
    /// * `rotation` - Rotation command in [-1, 1]
    /// * `field_heading_deg` - Heading for the field-orientation transform
    ///
    /// # Errors
    ///
    /// Returns `ActuatorError::InvalidCommand` for out-of-range or
    /// non-finite components, `ActuatorError::HardwareFault` on output
    /// stage failure.
    fn drive_cartesian(
        &mut self,
        forward: f32,
        strafe: f32,
        rotation: f32,
        field_heading_deg: f32,
    ) -> Result<(), ActuatorError>;

    /// Command the base to a standstill.
    fn stop(&mut self) -> Result<(), ActuatorError> {
        self.drive_cartesian(0.0, 0.0, 0.0, 0.0)
    }
}
