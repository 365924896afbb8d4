//! Heading control laws
//!
//! Two closed-loop laws compute a rotation correction from a heading
//! error. They share the proportional/integral/derivative structure but
//! differ deliberately in angle handling, anti-windup, and derivative
//! normalization, so they stay separate named strategies instead of one
//! parametrized algorithm:
//!
//! - [`knob_field`]: holds the heading commanded by an absolute dial.
//!   Works on raw accumulated degrees with a single-step rollover fold,
//!   accumulates the integral without a windup bound, and time-scales
//!   the integral and derivative terms by the cycle delta.
//! - [`rotate_to_heading`]: rotates to a target heading along the
//!   shortest path. Works on normalized degrees, bounds the integral
//!   contribution, uses an unscaled cycle-difference derivative, and
//!   biases the output away from zero with a feed-forward term.
//!
//! Both laws mutate one [`PidState`] owned by the drive facade; switching
//! laws mid-session intentionally carries the accumulated state across
//! until the facade's explicit reset.

use libm::fabsf;

use crate::angle::{fold_rollover, wrap_180, wrap_360};
use crate::control::config::DrivePidConfig;
use crate::control::shaper::{apply_deadband, clamp_output};

/// Bound on the integral term's contribution to the rotate-to-heading
/// output: `|integral * ki|` never exceeds this value.
pub const INTEGRAL_GAIN_LIMIT: f32 = 0.4;

/// Error deadband for the rotate-to-heading law, in degrees.
pub const ROTATE_DEADBAND_DEG: f32 = 3.0;

/// Accumulated controller state shared by both laws.
#[derive(Debug, Clone, Copy, Default)]
pub struct PidState {
    /// Error accumulated across cycles
    pub integral: f32,
    /// Error from the previous cycle
    pub prev_error: f32,
}

impl PidState {
    /// Create a zeroed state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear accumulated error history.
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.prev_error = 0.0;
    }
}

/// Errors inside `setpoint * tolerance` count as on target.
fn on_target(config: &DrivePidConfig, error_deg: f32) -> bool {
    fabsf(error_deg) <= config.setpoint * config.tolerance
}

/// Knob-field law: hold the heading commanded by an absolute dial.
///
/// `target_deg` and `measured_deg` are both raw, non-normalized degrees.
/// Errors at or past the rollover threshold are folded by one turn; an
/// on-target error (magnitude within `setpoint * tolerance`) is zeroed
/// before it reaches the integral. The output is clamped to
/// `[min_output, max_output]` and passed through the `min_to_move`
/// deadband.
///
/// # Arguments
///
/// * `target_deg` - Dial target in degrees
/// * `measured_deg` - Raw gyro angle in degrees
/// * `dt` - Elapsed time since the previous cycle, seconds
///
/// The caller must guarantee `dt > 0`; the derivative term divides by it.
pub fn knob_field(
    config: &DrivePidConfig,
    state: &mut PidState,
    target_deg: f32,
    measured_deg: f32,
    dt: f32,
) -> f32 {
    let mut error = fold_rollover(target_deg - measured_deg);

    if on_target(config, error) {
        error = 0.0;
    }
    state.integral += error;

    let output = error * config.kp
        + state.integral * config.ki * dt
        + (error - state.prev_error) * config.kd / dt;
    state.prev_error = error;

    let output = clamp_output(output, config.min_output, config.max_output);
    apply_deadband(output, config.min_to_move)
}

/// Rotate-to-heading law: spin to a target heading by the shortest path.
///
/// Both angles are normalized to [0, 360) and the error wrapped to
/// +/-180 before use. The running integral is clamped so its output
/// contribution `integral * ki` stays within [`INTEGRAL_GAIN_LIMIT`]
/// (and is zeroed outright while `ki` is zero). Errors inside
/// [`ROTATE_DEADBAND_DEG`] are zeroed after integration, then the output
/// is biased away from zero by `kf` and clamped to [-1, 1].
///
/// Unlike [`knob_field`], the derivative term is the plain
/// cycle-to-cycle error difference, not divided by the cycle delta.
pub fn rotate_to_heading(
    config: &DrivePidConfig,
    state: &mut PidState,
    target_deg: f32,
    measured_deg: f32,
) -> f32 {
    let measured = wrap_360(measured_deg);
    let target = wrap_360(target_deg);
    let mut error = wrap_180(target - measured);

    if config.ki != 0.0 {
        let candidate = (state.integral + error) * config.ki;
        if fabsf(candidate) < INTEGRAL_GAIN_LIMIT {
            state.integral += error;
        } else if candidate > 0.0 {
            state.integral = INTEGRAL_GAIN_LIMIT / config.ki;
        } else {
            state.integral = -INTEGRAL_GAIN_LIMIT / config.ki;
        }
    } else {
        state.integral = 0.0;
    }

    if fabsf(error) < ROTATE_DEADBAND_DEG {
        error = 0.0;
    }

    let mut output =
        config.kp * error + config.ki * state.integral + config.kd * (error - state.prev_error);
    if output > 0.0 {
        output += config.kf;
    } else {
        output -= config.kf;
    }
    state.prev_error = error;

    clamp_output(output, -1.0, 1.0)
}
