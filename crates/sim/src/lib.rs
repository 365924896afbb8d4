//! mecadrive_sim - Host-side closed-loop simulation for mecadrive
//!
//! Implements the controller's collaborator traits with a simulated
//! mecanum vehicle so the control laws can be exercised end to end on a
//! host machine: a gyro fed by integrated vehicle motion, an actuator
//! that performs the real wheel mixing, and a physics step closing the
//! loop. Seeded runs are deterministic for CI use.

pub mod config;
pub mod drive;
pub mod error;
pub mod gyro;
pub mod physics;
pub mod rig;

pub use config::SimConfig;
pub use drive::{mecanum_wheel_speeds, SimulatedDrive, WheelSpeeds};
pub use error::SimError;
pub use gyro::SimulatedGyro;
pub use physics::MecanumPhysics;
pub use rig::{RunSummary, SimRig};
