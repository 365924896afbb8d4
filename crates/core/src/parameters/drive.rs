//! Drive tuning parameter block
//!
//! Maps the heading controller's tuning fields to parameter store
//! entries for runtime configuration.
//!
//! # Parameters
//!
//! - `DRV_KP` / `DRV_KI` / `DRV_KD` / `DRV_KF` - control law gains
//! - `DRV_SETPOINT` - target orientation for tolerance scaling (degrees)
//! - `DRV_TOL` - on-target tolerance scale
//! - `DRV_OUT_MIN` / `DRV_OUT_MAX` - knob-field output clamp range
//! - `DRV_MIN_MOVE` - stall deadband threshold

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::control::DrivePidConfig;

// --- Defaults ---

const DEFAULT_KP: f32 = 0.0;
const DEFAULT_KI: f32 = 0.0;
const DEFAULT_KD: f32 = 0.0;
const DEFAULT_KF: f32 = 0.0;
const DEFAULT_SETPOINT: f32 = 0.0;
const DEFAULT_TOLERANCE: f32 = 1.0;
const DEFAULT_OUT_MIN: f32 = -1.0;
const DEFAULT_OUT_MAX: f32 = 1.0;
const DEFAULT_MIN_MOVE: f32 = 0.17;

// --- Ranges ---

const MIN_GAIN: f32 = 0.0;
const MAX_GAIN: f32 = 10.0;

const MIN_SETPOINT: f32 = -360.0;
const MAX_SETPOINT: f32 = 360.0;

const MIN_TOLERANCE: f32 = 0.0;
const MAX_TOLERANCE: f32 = 90.0;

const MIN_OUTPUT_BOUND: f32 = -1.0;
const MAX_OUTPUT_BOUND: f32 = 1.0;

const MIN_DEADBAND: f32 = 0.0;
const MAX_DEADBAND: f32 = 1.0;

/// Drive tuning parameters loaded from a parameter store
#[derive(Debug, Clone)]
pub struct DriveTuningParams {
    /// Proportional gain (DRV_KP)
    pub kp: f32,
    /// Integral gain (DRV_KI)
    pub ki: f32,
    /// Derivative gain (DRV_KD)
    pub kd: f32,
    /// Feed-forward bias (DRV_KF)
    pub kf: f32,
    /// Target orientation for tolerance scaling, degrees (DRV_SETPOINT)
    pub setpoint: f32,
    /// On-target tolerance scale (DRV_TOL)
    pub tolerance: f32,
    /// Lower output clamp (DRV_OUT_MIN)
    pub min_output: f32,
    /// Upper output clamp (DRV_OUT_MAX)
    pub max_output: f32,
    /// Stall deadband threshold (DRV_MIN_MOVE)
    pub min_to_move: f32,
}

impl Default for DriveTuningParams {
    fn default() -> Self {
        Self {
            kp: DEFAULT_KP,
            ki: DEFAULT_KI,
            kd: DEFAULT_KD,
            kf: DEFAULT_KF,
            setpoint: DEFAULT_SETPOINT,
            tolerance: DEFAULT_TOLERANCE,
            min_output: DEFAULT_OUT_MIN,
            max_output: DEFAULT_OUT_MAX,
            min_to_move: DEFAULT_MIN_MOVE,
        }
    }
}

impl DriveTuningParams {
    /// Register drive tuning parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register("DRV_KP", ParamValue::Float(DEFAULT_KP), ParamFlags::empty())?;
        store.register("DRV_KI", ParamValue::Float(DEFAULT_KI), ParamFlags::empty())?;
        store.register("DRV_KD", ParamValue::Float(DEFAULT_KD), ParamFlags::empty())?;
        store.register("DRV_KF", ParamValue::Float(DEFAULT_KF), ParamFlags::empty())?;
        store.register(
            "DRV_SETPOINT",
            ParamValue::Float(DEFAULT_SETPOINT),
            ParamFlags::empty(),
        )?;
        store.register(
            "DRV_TOL",
            ParamValue::Float(DEFAULT_TOLERANCE),
            ParamFlags::empty(),
        )?;
        store.register(
            "DRV_OUT_MIN",
            ParamValue::Float(DEFAULT_OUT_MIN),
            ParamFlags::empty(),
        )?;
        store.register(
            "DRV_OUT_MAX",
            ParamValue::Float(DEFAULT_OUT_MAX),
            ParamFlags::empty(),
        )?;
        store.register(
            "DRV_MIN_MOVE",
            ParamValue::Float(DEFAULT_MIN_MOVE),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    /// Load drive tuning parameters from a parameter store
    ///
    /// Out-of-range stored values are clamped; missing entries fall back
    /// to defaults.
    pub fn from_store(store: &ParameterStore) -> Self {
        Self {
            kp: load_float(store, "DRV_KP", DEFAULT_KP, MIN_GAIN, MAX_GAIN),
            ki: load_float(store, "DRV_KI", DEFAULT_KI, MIN_GAIN, MAX_GAIN),
            kd: load_float(store, "DRV_KD", DEFAULT_KD, MIN_GAIN, MAX_GAIN),
            kf: load_float(store, "DRV_KF", DEFAULT_KF, MIN_GAIN, MAX_GAIN),
            setpoint: load_float(
                store,
                "DRV_SETPOINT",
                DEFAULT_SETPOINT,
                MIN_SETPOINT,
                MAX_SETPOINT,
            ),
            tolerance: load_float(
                store,
                "DRV_TOL",
                DEFAULT_TOLERANCE,
                MIN_TOLERANCE,
                MAX_TOLERANCE,
            ),
            min_output: load_float(
                store,
                "DRV_OUT_MIN",
                DEFAULT_OUT_MIN,
                MIN_OUTPUT_BOUND,
                MAX_OUTPUT_BOUND,
            ),
            max_output: load_float(
                store,
                "DRV_OUT_MAX",
                DEFAULT_OUT_MAX,
                MIN_OUTPUT_BOUND,
                MAX_OUTPUT_BOUND,
            ),
            min_to_move: load_float(
                store,
                "DRV_MIN_MOVE",
                DEFAULT_MIN_MOVE,
                MIN_DEADBAND,
                MAX_DEADBAND,
            ),
        }
    }

    /// Convert to a [`DrivePidConfig`] for the drive controller
    pub fn to_config(&self) -> DrivePidConfig {
        DrivePidConfig {
            kp: self.kp,
            ki: self.ki,
            kd: self.kd,
            kf: self.kf,
            setpoint: self.setpoint,
            tolerance: self.tolerance,
            min_output: self.min_output,
            max_output: self.max_output,
            min_to_move: self.min_to_move,
        }
    }

    /// Validate drive tuning parameters
    pub fn is_valid(&self) -> bool {
        for gain in [self.kp, self.ki, self.kd, self.kf] {
            if !(MIN_GAIN..=MAX_GAIN).contains(&gain) {
                return false;
            }
        }
        if !(MIN_SETPOINT..=MAX_SETPOINT).contains(&self.setpoint) {
            return false;
        }
        if !(MIN_TOLERANCE..=MAX_TOLERANCE).contains(&self.tolerance) {
            return false;
        }
        if !(MIN_OUTPUT_BOUND..=MAX_OUTPUT_BOUND).contains(&self.min_output) {
            return false;
        }
        if !(MIN_OUTPUT_BOUND..=MAX_OUTPUT_BOUND).contains(&self.max_output) {
            return false;
        }
        if !(MIN_DEADBAND..=MAX_DEADBAND).contains(&self.min_to_move) {
            return false;
        }

        // Consistency: the clamp range must not be inverted
        if self.min_output > self.max_output {
            return false;
        }

        true
    }
}

/// Load a float parameter from store with clamping
fn load_float(store: &ParameterStore, name: &str, default: f32, min: f32, max: f32) -> f32 {
    match store.get(name) {
        Some(ParamValue::Float(v)) => v.clamp(min, max),
        Some(ParamValue::Int(v)) => (*v as f32).clamp(min, max),
        _ => default,
    }
}
