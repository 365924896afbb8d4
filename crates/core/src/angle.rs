//! Heading angle normalization
//!
//! Heading values arrive from the gyro either unbounded (the raw angle
//! keeps accumulating past 360 as the base rotates) or pre-normalized.
//! These helpers map any real-valued angle onto the two canonical ranges
//! used by the control laws, plus the single-step rollover fold used by
//! the knob-field law.

use libm::fabsf;

/// Error magnitude at which a raw-degree error is treated as sensor
/// rollover rather than a genuine command to spin most of a turn.
pub const ROLLOVER_FOLD_THRESHOLD_DEG: f32 = 300.0;

/// Normalize an angle to the [0, 360) range.
pub fn wrap_360(angle_deg: f32) -> f32 {
    ((angle_deg % 360.0) + 360.0) % 360.0
}

/// Normalize an angle to the -180 to +180 range (shortest path).
pub fn wrap_180(angle_deg: f32) -> f32 {
    let mut a = angle_deg % 360.0;
    if a > 180.0 {
        a -= 360.0;
    } else if a < -180.0 {
        a += 360.0;
    }
    a
}

/// Single-step rollover fold for raw-degree heading errors.
///
/// Errors whose magnitude reaches [`ROLLOVER_FOLD_THRESHOLD_DEG`] are
/// folded by one full turn toward zero. This only handles gyro rollover
/// near +/-360; it is not a general shortest-path correction (use
/// [`wrap_180`] for that).
pub fn fold_rollover(error_deg: f32) -> f32 {
    if fabsf(error_deg) >= ROLLOVER_FOLD_THRESHOLD_DEG {
        if error_deg > 0.0 {
            error_deg - 360.0
        } else {
            error_deg + 360.0
        }
    } else {
        error_deg
    }
}
