//! Drive controller facade
//!
//! Owns the controller state (mode, accumulated PID state, cycle clock)
//! and runs one control cycle at a time: validate the time delta,
//! dispatch on the active mode to the matching control law or
//! pass-through, shape the rotation output, and forward the final
//! actuation tuple to the holonomic actuator.
//!
//! The controller is strictly single-owner and synchronous: one instance
//! per drive base, invoked once per fixed external cycle, no internal
//! scheduling and no I/O of its own.

use libm::{cosf, fabsf, sinf};

use crate::actuator::HolonomicActuator;
use crate::control::config::{ConfigError, DrivePidConfig};
use crate::control::law::{self, PidState};
use crate::drive::error::DriveError;
use crate::drive::types::{CycleInput, DriveCommand};
use crate::heading::HeadingSensor;
use crate::mode::DriveMode;

/// Forward-axis compensation factor for the experimental mode.
const STICK_FIELD2_FORWARD_SCALE: f32 = 1.7;

/// Per-cycle heading controller for a mecanum drive base.
///
/// Collaborators (heading sensor, actuator) are passed into each cycle
/// rather than owned, so the controller state stays a plain value that
/// no external code can touch mid-cycle.
#[derive(Debug)]
pub struct DriveController {
    config: DrivePidConfig,
    mode: DriveMode,
    pid: PidState,
    prev_cycle_s: f32,
}

impl DriveController {
    /// Create a controller with a validated tuning configuration.
    ///
    /// `now_s` seeds the cycle clock so the first cycle's delta is
    /// measured from initialization.
    ///
    /// # Errors
    ///
    /// Returns `DriveError::Config` if the configuration violates its
    /// invariants (see [`DrivePidConfig::validate`]).
    pub fn new(config: DrivePidConfig, now_s: f32) -> Result<Self, DriveError> {
        config.validate()?;
        Ok(Self {
            config,
            mode: DriveMode::default(),
            pid: PidState::new(),
            prev_cycle_s: now_s,
        })
    }

    /// Clear accumulated PID state and restart the cycle clock.
    ///
    /// Mode switches deliberately carry PID state across; this is the
    /// only operation that discards it.
    pub fn reset(&mut self, now_s: f32) {
        self.pid.reset();
        self.prev_cycle_s = now_s;
    }

    /// Current drive mode.
    pub fn mode(&self) -> DriveMode {
        self.mode
    }

    /// Unconditionally override the drive mode.
    pub fn set_mode(&mut self, mode: DriveMode) {
        self.mode = mode;
    }

    /// Apply the operator's mode toggle; see [`DriveMode::advance`].
    pub fn advance_mode(&mut self) {
        self.mode = self.mode.advance();
    }

    /// Current tuning configuration.
    pub fn config(&self) -> &DrivePidConfig {
        &self.config
    }

    /// Replace the PID gains; takes effect on the next cycle.
    pub fn set_gains(&mut self, kp: f32, ki: f32, kd: f32, kf: f32) {
        self.config.kp = kp;
        self.config.ki = ki;
        self.config.kd = kd;
        self.config.kf = kf;
    }

    /// Replace the on-target setpoint, in degrees.
    pub fn set_setpoint(&mut self, setpoint_deg: f32) {
        self.config.setpoint = setpoint_deg;
    }

    /// Replace the on-target tolerance scale.
    pub fn set_tolerance(&mut self, tolerance: f32) -> Result<(), ConfigError> {
        if tolerance < 0.0 {
            return Err(ConfigError::NegativeTolerance);
        }
        self.config.tolerance = tolerance;
        Ok(())
    }

    /// Replace the knob-field output clamp range.
    pub fn set_output_limits(&mut self, min: f32, max: f32) -> Result<(), ConfigError> {
        if min > max {
            return Err(ConfigError::OutputRangeInverted);
        }
        self.config.min_output = min;
        self.config.max_output = max;
        Ok(())
    }

    /// Replace the stall deadband threshold.
    pub fn set_min_to_move(&mut self, min_to_move: f32) -> Result<(), ConfigError> {
        if min_to_move < 0.0 {
            return Err(ConfigError::NegativeDeadband);
        }
        self.config.min_to_move = min_to_move;
        Ok(())
    }

    /// Run one control cycle.
    ///
    /// Validates the time delta, selects the heading accessor and control
    /// law for the active mode, shapes the rotation output, forwards the
    /// actuation tuple to `actuator`, and returns it.
    ///
    /// # Errors
    ///
    /// - `DriveError::InvalidTiming` if `input.now_s` has not advanced
    ///   past the previous cycle. The cycle clock and PID state are left
    ///   untouched so the caller can retry with a fresh timestamp.
    /// - `DriveError::Actuator` if the actuator refuses the command.
    pub fn cycle<S, A>(
        &mut self,
        input: &CycleInput,
        gyro: &S,
        actuator: &mut A,
    ) -> Result<DriveCommand, DriveError>
    where
        S: HeadingSensor,
        A: HolonomicActuator,
    {
        let dt = input.now_s - self.prev_cycle_s;
        if dt <= 0.0 {
            return Err(DriveError::InvalidTiming { dt });
        }
        self.prev_cycle_s = input.now_s;

        let command = match self.mode {
            DriveMode::StickField => {
                let heading = gyro.raw_angle();
                DriveCommand {
                    forward: input.forward,
                    strafe: input.strafe,
                    rotation: input.rotation_or_heading,
                    field_heading: heading,
                }
            }
            DriveMode::KnobField => {
                let heading = gyro.raw_angle();
                let rotation = law::knob_field(
                    &self.config,
                    &mut self.pid,
                    input.rotation_or_heading,
                    heading,
                    dt,
                );
                DriveCommand {
                    forward: input.forward,
                    strafe: input.strafe,
                    rotation,
                    field_heading: heading,
                }
            }
            DriveMode::RotatePid => {
                let heading = gyro.normalized_angle();
                let rotation = law::rotate_to_heading(
                    &self.config,
                    &mut self.pid,
                    input.rotation_or_heading,
                    heading,
                );
                DriveCommand {
                    forward: input.forward,
                    strafe: input.strafe,
                    rotation,
                    field_heading: heading,
                }
            }
            DriveMode::StickField2 => {
                let heading = gyro.normalized_angle();
                let (forward, strafe) = stick_field2_vector(input.forward, input.strafe, heading);
                DriveCommand {
                    forward,
                    strafe,
                    rotation: input.rotation_or_heading,
                    field_heading: heading,
                }
            }
        };

        actuator.drive_cartesian(
            command.forward,
            command.strafe,
            command.rotation,
            command.field_heading,
        )?;
        Ok(command)
    }
}

/// Robot-orient transform for the experimental `StickField2` mode.
///
/// Untested on hardware and preserved as-is: the second rotation step
/// reads the already-updated forward term.
fn stick_field2_vector(mut forward: f32, mut strafe: f32, heading_deg: f32) -> (f32, f32) {
    let cos_a = cosf(heading_deg * (3.14159 / 180.0));
    let sin_a = sinf(heading_deg * (3.14159 / 180.0));

    forward = forward * cos_a - strafe * sin_a;
    strafe = forward * sin_a + strafe * cos_a;

    // account for the difference in forward/strafe drive power
    forward = STICK_FIELD2_FORWARD_SCALE * forward;
    if fabsf(forward) > 1.0 {
        forward = if forward > 0.0 { 1.0 } else { -1.0 };
    }

    forward = strafe * sin_a + forward * cos_a;
    strafe = strafe * cos_a - forward * sin_a;

    (forward, strafe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuator::ActuatorError;
    use crate::traits::{MockTime, TimeSource};

    struct MockGyro {
        raw: f32,
    }

    impl MockGyro {
        fn new(raw: f32) -> Self {
            Self { raw }
        }
    }

    impl HeadingSensor for MockGyro {
        fn raw_angle(&self) -> f32 {
            self.raw
        }
    }

    #[derive(Default)]
    struct RecordingActuator {
        last: Option<DriveCommand>,
        calls: u32,
        fail: bool,
    }

    impl HolonomicActuator for RecordingActuator {
        fn drive_cartesian(
            &mut self,
            forward: f32,
            strafe: f32,
            rotation: f32,
            field_heading_deg: f32,
        ) -> Result<(), ActuatorError> {
            if self.fail {
                return Err(ActuatorError::HardwareFault);
            }
            self.last = Some(DriveCommand {
                forward,
                strafe,
                rotation,
                field_heading: field_heading_deg,
            });
            self.calls += 1;
            Ok(())
        }
    }

    fn controller_with(config: DrivePidConfig) -> DriveController {
        DriveController::new(config, 0.0).unwrap()
    }

    // ========== Construction and Configuration ==========

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = DrivePidConfig {
            min_output: 1.0,
            max_output: -1.0,
            ..DrivePidConfig::default()
        };
        assert_eq!(
            DriveController::new(config, 0.0).unwrap_err(),
            DriveError::Config(ConfigError::OutputRangeInverted)
        );
    }

    #[test]
    fn test_setters_take_effect() {
        let mut controller = controller_with(DrivePidConfig::default());
        controller.set_gains(0.1, 0.01, 0.001, 0.2);
        controller.set_setpoint(45.0);
        controller.set_tolerance(2.0).unwrap();
        controller.set_output_limits(-0.5, 0.5).unwrap();
        controller.set_min_to_move(0.1).unwrap();

        let config = controller.config();
        assert!((config.kp - 0.1).abs() < 0.0001);
        assert!((config.ki - 0.01).abs() < 0.0001);
        assert!((config.kd - 0.001).abs() < 0.0001);
        assert!((config.kf - 0.2).abs() < 0.0001);
        assert!((config.setpoint - 45.0).abs() < 0.001);
        assert!((config.tolerance - 2.0).abs() < 0.001);
        assert!((config.min_output - (-0.5)).abs() < 0.001);
        assert!((config.max_output - 0.5).abs() < 0.001);
        assert!((config.min_to_move - 0.1).abs() < 0.001);
    }

    #[test]
    fn test_setters_reject_invalid_values() {
        let mut controller = controller_with(DrivePidConfig::default());
        assert_eq!(
            controller.set_tolerance(-1.0),
            Err(ConfigError::NegativeTolerance)
        );
        assert_eq!(
            controller.set_output_limits(0.5, -0.5),
            Err(ConfigError::OutputRangeInverted)
        );
        assert_eq!(
            controller.set_min_to_move(-0.1),
            Err(ConfigError::NegativeDeadband)
        );
    }

    // ========== Timing ==========

    #[test]
    fn test_cycle_rejects_stale_timestamp() {
        let mut controller = controller_with(DrivePidConfig::default());
        let gyro = MockGyro::new(0.0);
        let mut actuator = RecordingActuator::default();

        let input = CycleInput::with_rotation(0.0, 0.0, 0.0, 0.0);
        let err = controller.cycle(&input, &gyro, &mut actuator).unwrap_err();
        assert_eq!(err, DriveError::InvalidTiming { dt: 0.0 });
        assert_eq!(actuator.calls, 0, "no command may reach the actuator");
    }

    #[test]
    fn test_cycle_rejects_backwards_timestamp() {
        let mut controller = controller_with(DrivePidConfig::default());
        let gyro = MockGyro::new(0.0);
        let mut actuator = RecordingActuator::default();

        let input = CycleInput::with_rotation(0.0, 0.0, 0.0, 0.02);
        controller.cycle(&input, &gyro, &mut actuator).unwrap();

        let input = CycleInput::with_rotation(0.0, 0.0, 0.0, 0.01);
        assert!(matches!(
            controller.cycle(&input, &gyro, &mut actuator),
            Err(DriveError::InvalidTiming { .. })
        ));
    }

    #[test]
    fn test_cycle_clock_advances_with_time_source() {
        let time = MockTime::new();
        let mut controller = controller_with(DrivePidConfig::default());
        let gyro = MockGyro::new(0.0);
        let mut actuator = RecordingActuator::default();

        for _ in 0..3 {
            time.advance(20_000); // 20 ms cycle
            let input = CycleInput::with_rotation(0.0, 0.0, 0.0, time.now_s());
            controller.cycle(&input, &gyro, &mut actuator).unwrap();
        }
        assert_eq!(actuator.calls, 3);
        assert!((controller.prev_cycle_s - 0.06).abs() < 0.001);
    }

    #[test]
    fn test_failed_cycle_leaves_clock_untouched() {
        let mut controller = controller_with(DrivePidConfig::default());
        let gyro = MockGyro::new(0.0);
        let mut actuator = RecordingActuator::default();

        let input = CycleInput::with_rotation(0.0, 0.0, 0.0, -1.0);
        assert!(controller.cycle(&input, &gyro, &mut actuator).is_err());
        assert!((controller.prev_cycle_s - 0.0).abs() < 0.0001);

        // A fresh timestamp still works afterwards
        let input = CycleInput::with_rotation(0.0, 0.0, 0.0, 0.02);
        assert!(controller.cycle(&input, &gyro, &mut actuator).is_ok());
    }

    // ========== Mode Dispatch ==========

    #[test]
    fn test_stick_field_passes_rotation_through() {
        // PID constants must not affect the pass-through path
        let mut controller = controller_with(DrivePidConfig::with_gains(50.0, 50.0, 50.0, 50.0));
        let gyro = MockGyro::new(123.0);
        let mut actuator = RecordingActuator::default();

        let input = CycleInput::with_rotation(0.25, -0.5, 0.42, 0.02);
        let command = controller.cycle(&input, &gyro, &mut actuator).unwrap();

        assert_eq!(command.rotation, 0.42);
        assert_eq!(command.forward, 0.25);
        assert_eq!(command.strafe, -0.5);
        assert!((command.field_heading - 123.0).abs() < 0.001);
        assert_eq!(actuator.last.unwrap(), command);
    }

    #[test]
    fn test_stick_field_uses_raw_angle() {
        let mut controller = controller_with(DrivePidConfig::default());
        let gyro = MockGyro::new(725.0);
        let mut actuator = RecordingActuator::default();

        let input = CycleInput::with_rotation(0.0, 0.0, 0.0, 0.02);
        let command = controller.cycle(&input, &gyro, &mut actuator).unwrap();
        assert!(
            (command.field_heading - 725.0).abs() < 0.001,
            "stick mode must forward the unbounded raw angle"
        );
    }

    #[test]
    fn test_knob_field_corrects_toward_dial() {
        let config = DrivePidConfig {
            setpoint: 1.0,
            tolerance: 2.0,
            max_output: 10.0,
            ..DrivePidConfig::with_gains(1.0, 0.0, 0.0, 0.0)
        };
        let mut controller = controller_with(config);
        controller.set_mode(DriveMode::KnobField);
        let gyro = MockGyro::new(5.0);
        let mut actuator = RecordingActuator::default();

        let input = CycleInput::with_heading_target(0.0, 0.0, 10.0, 0.02);
        let command = controller.cycle(&input, &gyro, &mut actuator).unwrap();
        assert!(
            (command.rotation - 5.0).abs() < 0.001,
            "expected raw error * kp, got {}",
            command.rotation
        );
    }

    #[test]
    fn test_rotate_pid_normalizes_heading() {
        let mut controller = controller_with(DrivePidConfig::with_gains(1.0, 0.0, 0.0, 0.0));
        controller.set_mode(DriveMode::RotatePid);
        // raw 710 normalizes to 350; target 10 is +20 through the seam
        let gyro = MockGyro::new(710.0);
        let mut actuator = RecordingActuator::default();

        let input = CycleInput::with_heading_target(0.0, 0.0, 10.0, 0.02);
        let command = controller.cycle(&input, &gyro, &mut actuator).unwrap();
        assert!((command.rotation - 1.0).abs() < 0.001, "p-term 20 clamps to 1");
        assert!(
            (command.field_heading - 350.0).abs() < 0.001,
            "rotate mode must forward the normalized angle"
        );
    }

    #[test]
    fn test_stick_field2_scales_forward_at_zero_heading() {
        let mut controller = controller_with(DrivePidConfig::default());
        controller.set_mode(DriveMode::StickField2);
        let gyro = MockGyro::new(0.0);
        let mut actuator = RecordingActuator::default();

        // At heading 0 the rotations collapse and only the 1.7 forward
        // scale (clamped) remains.
        let input = CycleInput::with_rotation(0.5, 0.3, 0.1, 0.02);
        let command = controller.cycle(&input, &gyro, &mut actuator).unwrap();
        assert!(
            (command.forward - 0.85).abs() < 0.001,
            "got {}",
            command.forward
        );
        assert!((command.strafe - 0.3).abs() < 0.001);
        assert!((command.rotation - 0.1).abs() < 0.001);
    }

    #[test]
    fn test_stick_field2_clamps_scaled_forward() {
        let mut controller = controller_with(DrivePidConfig::default());
        controller.set_mode(DriveMode::StickField2);
        let gyro = MockGyro::new(0.0);
        let mut actuator = RecordingActuator::default();

        let input = CycleInput::with_rotation(0.9, 0.0, 0.0, 0.02);
        let command = controller.cycle(&input, &gyro, &mut actuator).unwrap();
        assert!((command.forward - 1.0).abs() < 0.001);
    }

    // ========== State Carry-Over ==========

    #[test]
    fn test_mode_switch_preserves_pid_state() {
        let config = DrivePidConfig {
            max_output: 100.0,
            min_output: -100.0,
            ..DrivePidConfig::with_gains(0.01, 0.001, 0.0, 0.0)
        };
        let mut controller = controller_with(config);
        controller.set_mode(DriveMode::KnobField);
        let gyro = MockGyro::new(0.0);
        let mut actuator = RecordingActuator::default();

        let input = CycleInput::with_heading_target(0.0, 0.0, 50.0, 0.02);
        controller.cycle(&input, &gyro, &mut actuator).unwrap();
        let integral = controller.pid.integral;
        let prev_error = controller.pid.prev_error;
        assert!(integral != 0.0);

        // Switching out and back does not clear anything
        controller.set_mode(DriveMode::RotatePid);
        assert!((controller.pid.integral - integral).abs() < 0.0001);
        controller.set_mode(DriveMode::KnobField);
        assert!((controller.pid.integral - integral).abs() < 0.0001);
        assert!((controller.pid.prev_error - prev_error).abs() < 0.0001);
    }

    #[test]
    fn test_reset_clears_pid_state_and_clock() {
        let config = DrivePidConfig {
            max_output: 100.0,
            min_output: -100.0,
            ..DrivePidConfig::with_gains(0.01, 0.001, 0.0, 0.0)
        };
        let mut controller = controller_with(config);
        controller.set_mode(DriveMode::KnobField);
        let gyro = MockGyro::new(0.0);
        let mut actuator = RecordingActuator::default();

        let input = CycleInput::with_heading_target(0.0, 0.0, 50.0, 0.02);
        controller.cycle(&input, &gyro, &mut actuator).unwrap();
        assert!(controller.pid.integral != 0.0);

        controller.reset(1.0);
        assert!((controller.pid.integral - 0.0).abs() < 0.0001);
        assert!((controller.pid.prev_error - 0.0).abs() < 0.0001);
        assert!((controller.prev_cycle_s - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_advance_mode_toggles() {
        let mut controller = controller_with(DrivePidConfig::default());
        assert_eq!(controller.mode(), DriveMode::StickField);
        controller.advance_mode();
        assert_eq!(controller.mode(), DriveMode::KnobField);
        controller.advance_mode();
        assert_eq!(controller.mode(), DriveMode::StickField);

        controller.set_mode(DriveMode::RotatePid);
        controller.advance_mode();
        assert_eq!(controller.mode(), DriveMode::RotatePid);
    }

    // ========== Actuator Forwarding ==========

    #[test]
    fn test_actuator_error_propagates() {
        let mut controller = controller_with(DrivePidConfig::default());
        let gyro = MockGyro::new(0.0);
        let mut actuator = RecordingActuator {
            fail: true,
            ..RecordingActuator::default()
        };

        let input = CycleInput::with_rotation(0.0, 0.0, 0.0, 0.02);
        let err = controller.cycle(&input, &gyro, &mut actuator).unwrap_err();
        assert_eq!(err, DriveError::Actuator(ActuatorError::HardwareFault));
    }

    // ========== StickField2 Vector Math ==========

    #[test]
    fn test_stick_field2_vector_matches_step_by_step() {
        // Replay the transform at heading 90 and compare term by term
        let heading = 90.0_f32;
        let cos_a = libm::cosf(heading * (3.14159 / 180.0));
        let sin_a = libm::sinf(heading * (3.14159 / 180.0));

        let (f0, s0) = (0.4_f32, -0.2_f32);
        let mut f = f0 * cos_a - s0 * sin_a;
        let mut s = f * sin_a + s0 * cos_a;
        f *= 1.7;
        if f.abs() > 1.0 {
            f = f.signum();
        }
        f = s * sin_a + f * cos_a;
        s = s * cos_a - f * sin_a;

        let (forward, strafe) = stick_field2_vector(0.4, -0.2, heading);
        assert!((forward - f).abs() < 0.0001);
        assert!((strafe - s).abs() < 0.0001);
    }
}
