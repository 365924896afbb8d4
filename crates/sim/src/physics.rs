//! Mecanum vehicle physics
//!
//! Closes the simulation loop: inverse-mixes the latched wheel speeds
//! back into body rates, integrates pose and true heading, and writes
//! the gyro (true heading plus drift; read noise is the gyro's own).

use log::debug;

use crate::config::SimConfig;
use crate::drive::SimulatedDrive;
use crate::gyro::SimulatedGyro;

/// Kinematic integrator for the simulated vehicle.
pub struct MecanumPhysics {
    config: SimConfig,
    gyro: SimulatedGyro,
    drive: SimulatedDrive,
    /// East position, meters
    x_m: f32,
    /// North position, meters
    y_m: f32,
    /// True heading, accumulated degrees (unbounded)
    true_heading_deg: f32,
    /// Accumulated gyro drift, degrees
    drift_deg: f32,
    sim_time_s: f32,
}

impl MecanumPhysics {
    /// Create a physics integrator sharing the given gyro and actuator.
    pub fn new(config: SimConfig, gyro: SimulatedGyro, drive: SimulatedDrive) -> Self {
        Self {
            config,
            gyro,
            drive,
            x_m: 0.0,
            y_m: 0.0,
            true_heading_deg: 0.0,
            drift_deg: 0.0,
            sim_time_s: 0.0,
        }
    }

    /// Integrate one time step of `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        let [fl, fr, rl, rr] = self.drive.wheel_speeds();

        // Inverse of the actuator's wheel mix: recover body rates
        let forward_r = (fl + fr + rl + rr) / 4.0;
        let strafe_r = (fl - fr - rl + rr) / 4.0;
        let yaw = (fl - fr + rl - rr) / 4.0;

        self.true_heading_deg += yaw * self.config.max_yaw_rate_dps * dt;

        // Rotate body velocity back into the field frame
        let (sin_a, cos_a) = self.true_heading_deg.to_radians().sin_cos();
        let strafe_f = strafe_r * cos_a - forward_r * sin_a;
        let forward_f = strafe_r * sin_a + forward_r * cos_a;
        self.x_m += strafe_f * self.config.max_speed * dt;
        self.y_m += forward_f * self.config.max_speed * dt;

        self.drift_deg += self.config.gyro_drift_dps * dt;
        self.gyro.set_raw_angle(self.true_heading_deg + self.drift_deg);
        self.sim_time_s += dt;

        debug!(
            "t={:.2}s heading={:.1}deg pos=({:.2}, {:.2})m",
            self.sim_time_s, self.true_heading_deg, self.x_m, self.y_m
        );
    }

    /// Current position in meters (east, north).
    pub fn position(&self) -> (f32, f32) {
        (self.x_m, self.y_m)
    }

    /// True heading in accumulated degrees.
    pub fn heading_deg(&self) -> f32 {
        self.true_heading_deg
    }

    /// Elapsed simulation time in seconds.
    pub fn sim_time_s(&self) -> f32 {
        self.sim_time_s
    }

    /// Place the vehicle at a heading (test and scenario setup).
    ///
    /// The gyro is updated immediately so the next controller cycle sees
    /// the new orientation.
    pub fn set_heading_deg(&mut self, heading_deg: f32) {
        self.true_heading_deg = heading_deg;
        self.gyro.set_raw_angle(self.true_heading_deg + self.drift_deg);
    }
}
