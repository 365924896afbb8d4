//! Simulation configuration

/// Configuration for the simulated mecanum vehicle.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Body speed at full wheel command, m/s.
    pub max_speed: f32,
    /// Yaw rate at full rotation command, deg/s.
    pub max_yaw_rate_dps: f32,
    /// Gyro noise standard deviation in degrees.
    pub gyro_noise_deg: f32,
    /// Gyro drift rate in deg/s.
    pub gyro_drift_dps: f32,
    /// RNG seed for deterministic mode. None = random.
    pub seed: Option<u64>,
    /// Control cycle period in seconds.
    pub cycle_period_s: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_speed: 2.0,
            max_yaw_rate_dps: 180.0,
            gyro_noise_deg: 0.0,
            gyro_drift_dps: 0.0,
            seed: None,
            cycle_period_s: 0.02, // 50 Hz
        }
    }
}
