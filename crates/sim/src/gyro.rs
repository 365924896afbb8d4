//! Simulated heading gyro
//!
//! Models a fused-yaw orientation sensor: the raw angle accumulates
//! without wrapping as the vehicle keeps turning, and reads can carry
//! Gaussian noise. Clones share one state handle, so the physics step
//! and the controller see the same sensor.

use std::cell::RefCell;
use std::rc::Rc;

use mecadrive_core::heading::HeadingSensor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

struct GyroState {
    raw_angle_deg: f32,
    noise_deg: f32,
    rng: StdRng,
}

/// Simulated gyro fed by the physics step.
#[derive(Clone)]
pub struct SimulatedGyro {
    state: Rc<RefCell<GyroState>>,
}

impl SimulatedGyro {
    /// Create a gyro with the given read-noise level.
    ///
    /// A fixed `seed` makes the noise sequence reproducible.
    pub fn new(noise_deg: f32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            state: Rc::new(RefCell::new(GyroState {
                raw_angle_deg: 0.0,
                noise_deg,
                rng,
            })),
        }
    }

    /// Overwrite the accumulated angle (physics step / test setup).
    pub(crate) fn set_raw_angle(&self, angle_deg: f32) {
        self.state.borrow_mut().raw_angle_deg = angle_deg;
    }

    /// Generate Gaussian noise using the Box-Muller transform.
    fn sample_noise(&self) -> f32 {
        let mut state = self.state.borrow_mut();
        if state.noise_deg == 0.0 {
            return 0.0;
        }
        let u1: f32 = state.rng.gen::<f32>().max(f32::EPSILON);
        let u2: f32 = state.rng.gen();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos();
        z * state.noise_deg
    }
}

impl HeadingSensor for SimulatedGyro {
    fn raw_angle(&self) -> f32 {
        let angle = self.state.borrow().raw_angle_deg;
        angle + self.sample_noise()
    }
}
