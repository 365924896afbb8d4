//! Closed-loop simulation rig
//!
//! Bundles the simulated gyro, actuator, physics, and a drive controller
//! into one steppable loop: each step runs one controller cycle followed
//! by one physics integration at the configured cycle period.

use log::{debug, info, warn};

use mecadrive_core::angle::wrap_180;
use mecadrive_core::control::DrivePidConfig;
use mecadrive_core::drive::{CycleInput, DriveCommand, DriveController};
use mecadrive_core::heading::HeadingSensor;
use mecadrive_core::mode::DriveMode;

use crate::config::SimConfig;
use crate::drive::SimulatedDrive;
use crate::error::SimError;
use crate::gyro::SimulatedGyro;
use crate::physics::MecanumPhysics;

/// Outcome of a scripted maneuver.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    /// Control cycles executed
    pub cycles: u32,
    /// Remaining shortest-path heading error, degrees
    pub final_error_deg: f32,
    /// True if the error entered the tolerance band
    pub converged: bool,
}

/// Simulated vehicle plus controller, stepped in lockstep.
pub struct SimRig {
    config: SimConfig,
    gyro: SimulatedGyro,
    drive: SimulatedDrive,
    physics: MecanumPhysics,
    controller: DriveController,
    now_s: f32,
}

impl SimRig {
    /// Build a rig from a simulation config and controller tuning.
    pub fn new(config: SimConfig, tuning: DrivePidConfig) -> Result<Self, SimError> {
        if config.cycle_period_s <= 0.0 {
            return Err(SimError::InvalidConfig("cycle_period_s must be positive"));
        }

        let gyro = SimulatedGyro::new(config.gyro_noise_deg, config.seed);
        let drive = SimulatedDrive::new();
        let physics = MecanumPhysics::new(config.clone(), gyro.clone(), drive.clone());
        let controller = DriveController::new(tuning, 0.0).map_err(SimError::Controller)?;

        info!(
            "sim rig ready: {} Hz control loop",
            (1.0 / config.cycle_period_s).round()
        );
        Ok(Self {
            config,
            gyro,
            drive,
            physics,
            controller,
            now_s: 0.0,
        })
    }

    /// The drive controller under test.
    pub fn controller_mut(&mut self) -> &mut DriveController {
        &mut self.controller
    }

    /// The simulated vehicle state.
    pub fn physics_mut(&mut self) -> &mut MecanumPhysics {
        &mut self.physics
    }

    /// The shared gyro handle.
    pub fn gyro(&self) -> &SimulatedGyro {
        &self.gyro
    }

    /// Shortest-path error from the gyro to `target_deg`, degrees.
    pub fn heading_error_deg(&self, target_deg: f32) -> f32 {
        wrap_180(target_deg - self.gyro.normalized_angle())
    }

    /// Advance one control cycle followed by one physics step.
    pub fn step(
        &mut self,
        forward: f32,
        strafe: f32,
        rotation_or_heading: f32,
    ) -> Result<DriveCommand, SimError> {
        self.now_s += self.config.cycle_period_s;
        let input = CycleInput {
            forward,
            strafe,
            rotation_or_heading,
            now_s: self.now_s,
        };
        let command = self
            .controller
            .cycle(&input, &self.gyro, &mut self.drive)
            .map_err(SimError::Controller)?;
        self.physics.step(self.config.cycle_period_s);
        Ok(command)
    }

    /// Drive a rotate-to-heading maneuver until the heading error enters
    /// `tolerance_deg`, up to `max_cycles`.
    pub fn run_to_heading(
        &mut self,
        target_deg: f32,
        tolerance_deg: f32,
        max_cycles: u32,
    ) -> Result<RunSummary, SimError> {
        self.controller.set_mode(DriveMode::RotatePid);

        for cycles in 1..=max_cycles {
            self.step(0.0, 0.0, target_deg)?;
            let error = self.heading_error_deg(target_deg);
            if error.abs() <= tolerance_deg {
                debug!("converged after {} cycles, error {:.2} deg", cycles, error);
                return Ok(RunSummary {
                    cycles,
                    final_error_deg: error,
                    converged: true,
                });
            }
        }

        let error = self.heading_error_deg(target_deg);
        warn!(
            "no convergence after {} cycles, error {:.2} deg",
            max_cycles, error
        );
        Ok(RunSummary {
            cycles: max_cycles,
            final_error_deg: error,
            converged: false,
        })
    }
}
