//! Drive cycle value types

/// Operator input and timing for one control cycle.
///
/// `rotation_or_heading` carries either a direct rotation command in
/// [-1, 1] (stick modes) or a target heading in degrees (knob and
/// rotate modes); which semantic applies is decided by the active mode,
/// not validated here.
#[derive(Clone, Copy, Debug, Default)]
pub struct CycleInput {
    /// Forward command, normalized to [-1, 1]
    pub forward: f32,
    /// Strafe command, normalized to [-1, 1]
    pub strafe: f32,
    /// Rotation command or target heading, per active mode
    pub rotation_or_heading: f32,
    /// Monotonic timestamp of this cycle in seconds
    pub now_s: f32,
}

impl CycleInput {
    /// Input carrying a direct rotation command (stick modes).
    pub fn with_rotation(forward: f32, strafe: f32, rotation: f32, now_s: f32) -> Self {
        Self {
            forward,
            strafe,
            rotation_or_heading: rotation,
            now_s,
        }
    }

    /// Input carrying a target heading in degrees (knob and rotate modes).
    pub fn with_heading_target(forward: f32, strafe: f32, heading_deg: f32, now_s: f32) -> Self {
        Self {
            forward,
            strafe,
            rotation_or_heading: heading_deg,
            now_s,
        }
    }
}

/// Final actuation command for one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DriveCommand {
    /// Forward command, clamped to the actuator-acceptable range
    pub forward: f32,
    /// Strafe command, clamped to the actuator-acceptable range
    pub strafe: f32,
    /// Shaped rotation command
    pub rotation: f32,
    /// Heading forwarded for the actuator's field-orientation transform,
    /// in degrees
    pub field_heading: f32,
}
