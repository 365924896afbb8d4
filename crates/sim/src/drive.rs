//! Simulated holonomic drive actuator
//!
//! Owns the wheel math the controller deliberately does not: rotates the
//! command vector into the robot frame using the supplied field heading,
//! mixes the four mecanum wheel speeds, and normalizes them. The latched
//! wheel speeds are what the physics step integrates.

use std::cell::RefCell;
use std::rc::Rc;

use mecadrive_core::actuator::{ActuatorError, HolonomicActuator};

/// Wheel speed set: [front-left, front-right, rear-left, rear-right].
pub type WheelSpeeds = [f32; 4];

/// Field-oriented mecanum wheel mix.
///
/// Rotates the `(forward, strafe)` vector by `-field_heading_deg` so the
/// operator's frame stays fixed to the field, mixes the four wheel
/// speeds, and scales them down uniformly if any wheel saturates.
pub fn mecanum_wheel_speeds(
    forward: f32,
    strafe: f32,
    rotation: f32,
    field_heading_deg: f32,
) -> WheelSpeeds {
    let (sin_a, cos_a) = field_heading_deg.to_radians().sin_cos();
    let x = strafe * cos_a + forward * sin_a;
    let y = -strafe * sin_a + forward * cos_a;

    let mut speeds = [
        y + x + rotation,
        y - x - rotation,
        y - x + rotation,
        y + x - rotation,
    ];

    let max = speeds.iter().fold(0.0_f32, |m, s| m.max(s.abs()));
    if max > 1.0 {
        for speed in speeds.iter_mut() {
            *speed /= max;
        }
    }
    speeds
}

/// Simulated drive actuator latching wheel speeds for the physics step.
///
/// Clones share one state handle.
#[derive(Clone, Default)]
pub struct SimulatedDrive {
    wheels: Rc<RefCell<WheelSpeeds>>,
}

impl SimulatedDrive {
    /// Create an actuator with all wheels at rest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last commanded wheel speeds.
    pub fn wheel_speeds(&self) -> WheelSpeeds {
        *self.wheels.borrow()
    }
}

impl HolonomicActuator for SimulatedDrive {
    fn drive_cartesian(
        &mut self,
        forward: f32,
        strafe: f32,
        rotation: f32,
        field_heading_deg: f32,
    ) -> Result<(), ActuatorError> {
        for component in [forward, strafe, rotation] {
            if !component.is_finite() || component.abs() > 1.0 {
                return Err(ActuatorError::InvalidCommand);
            }
        }
        if !field_heading_deg.is_finite() {
            return Err(ActuatorError::InvalidCommand);
        }

        *self.wheels.borrow_mut() =
            mecanum_wheel_speeds(forward, strafe, rotation, field_heading_deg);
        Ok(())
    }
}
