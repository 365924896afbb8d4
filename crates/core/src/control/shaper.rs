//! Output shaping
//!
//! Final-stage conditioning for rotation commands: clamping to the
//! actuator-acceptable range and suppressing sub-threshold outputs that
//! would buzz the rotational actuator without moving the base.

use libm::fabsf;

/// Clip `value` to the `[min, max]` range.
pub fn clamp_output(value: f32, min: f32, max: f32) -> f32 {
    if value <= min {
        min
    } else if value >= max {
        max
    } else {
        value
    }
}

/// Zero `value` when its magnitude is below `min_to_move`.
pub fn apply_deadband(value: f32, min_to_move: f32) -> f32 {
    if fabsf(value) < min_to_move {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_output_inside_range() {
        assert!((clamp_output(0.3, -1.0, 1.0) - 0.3).abs() < 0.001);
    }

    #[test]
    fn test_clamp_output_at_bounds() {
        assert!((clamp_output(1.5, -1.0, 1.0) - 1.0).abs() < 0.001);
        assert!((clamp_output(-1.5, -1.0, 1.0) - (-1.0)).abs() < 0.001);
        assert!((clamp_output(1.0, -1.0, 1.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_clamp_output_asymmetric_range() {
        assert!((clamp_output(-0.8, -0.25, 0.5) - (-0.25)).abs() < 0.001);
        assert!((clamp_output(0.8, -0.25, 0.5) - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_deadband_suppresses_small_output() {
        assert!((apply_deadband(0.1, 0.17) - 0.0).abs() < 0.001);
        assert!((apply_deadband(-0.1, 0.17) - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_deadband_passes_threshold_and_above() {
        assert!((apply_deadband(0.17, 0.17) - 0.17).abs() < 0.001);
        assert!((apply_deadband(0.5, 0.17) - 0.5).abs() < 0.001);
        assert!((apply_deadband(-0.5, 0.17) - (-0.5)).abs() < 0.001);
    }

    #[test]
    fn test_deadband_zero_threshold_is_passthrough() {
        assert!((apply_deadband(0.001, 0.0) - 0.001).abs() < 0.0001);
    }
}
