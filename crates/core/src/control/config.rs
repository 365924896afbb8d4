//! Drive controller tuning configuration

use core::fmt;

/// Errors from validating a [`DrivePidConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `min_output` exceeds `max_output`
    OutputRangeInverted,
    /// `tolerance` is negative
    NegativeTolerance,
    /// `min_to_move` is negative
    NegativeDeadband,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::OutputRangeInverted => write!(f, "min_output exceeds max_output"),
            ConfigError::NegativeTolerance => write!(f, "tolerance is negative"),
            ConfigError::NegativeDeadband => write!(f, "min_to_move is negative"),
        }
    }
}

/// Tuning configuration for the heading control laws.
///
/// Immutable per tuning session from the laws' point of view; the drive
/// facade exposes explicit setters that take effect on the next cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrivePidConfig {
    /// Proportional gain
    pub kp: f32,
    /// Integral gain
    pub ki: f32,
    /// Derivative gain
    pub kd: f32,
    /// Feed-forward bias (rotate-to-heading law only)
    pub kf: f32,
    /// Target orientation in degrees, used for on-target tolerance scaling
    pub setpoint: f32,
    /// On-target tolerance scale; the knob-field law zeroes errors with
    /// magnitude at most `setpoint * tolerance`
    pub tolerance: f32,
    /// Lower clamp for the knob-field law output
    pub min_output: f32,
    /// Upper clamp for the knob-field law output
    pub max_output: f32,
    /// Deadband threshold; rotation outputs below this magnitude stall
    /// the base without producing motion and are forced to zero
    pub min_to_move: f32,
}

impl Default for DrivePidConfig {
    fn default() -> Self {
        Self {
            kp: 0.0,
            ki: 0.0,
            kd: 0.0,
            kf: 0.0,
            setpoint: 0.0,
            tolerance: 1.0,
            min_output: -1.0,
            max_output: 1.0,
            // stall threshold measured while strafing the base
            min_to_move: 0.17,
        }
    }
}

impl DrivePidConfig {
    /// Create a configuration with the given gains and default shaping.
    pub fn with_gains(kp: f32, ki: f32, kd: f32, kf: f32) -> Self {
        Self {
            kp,
            ki,
            kd,
            kf,
            ..Self::default()
        }
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant: inverted output range,
    /// negative tolerance, or negative deadband threshold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_output > self.max_output {
            return Err(ConfigError::OutputRangeInverted);
        }
        if self.tolerance < 0.0 {
            return Err(ConfigError::NegativeTolerance);
        }
        if self.min_to_move < 0.0 {
            return Err(ConfigError::NegativeDeadband);
        }
        Ok(())
    }
}
