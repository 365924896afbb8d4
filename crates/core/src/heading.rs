//! Heading sensor abstraction
//!
//! The controller's read-only view of the orientation sensor. Different
//! control laws want the heading in different forms: the raw accumulated
//! angle for the field-oriented stick modes, the normalized angle for
//! closed-loop rotation.

use crate::angle::wrap_360;

/// Provides the drive base heading in degrees.
///
/// Implementations wrap a physical gyro/IMU or a simulated one. The
/// controller never writes to the sensor; zeroing or recalibration is a
/// caller concern.
pub trait HeadingSensor {
    /// Returns the accumulated heading in degrees.
    ///
    /// The value is unbounded: it keeps growing past 360 (or below 0) as
    /// the base continues to rotate in one direction.
    fn raw_angle(&self) -> f32;

    /// Returns the heading normalized to [0, 360).
    fn normalized_angle(&self) -> f32 {
        wrap_360(self.raw_angle())
    }
}
