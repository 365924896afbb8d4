//! Closed-loop heading demo
//!
//! Loads controller tuning from a parameter store, drives the simulated
//! vehicle forward in pass-through mode, then runs a rotate-to-heading
//! maneuver to 90 degrees and reports convergence.

use chrono::Local;
use fern::Dispatch;
use log::info;

use mecadrive_core::parameters::{DriveTuningParams, ParamValue, ParameterStore};
use mecadrive_sim::{SimConfig, SimRig};

fn setup_logger() -> Result<(), Box<dyn std::error::Error>> {
    Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger()?;

    // Tuning session: registered defaults overridden by session values
    let mut store = ParameterStore::new();
    DriveTuningParams::register_defaults(&mut store).map_err(|e| e.to_string())?;
    store
        .set("DRV_KP", ParamValue::Float(0.02))
        .map_err(|e| e.to_string())?;
    store
        .set("DRV_KI", ParamValue::Float(0.0005))
        .map_err(|e| e.to_string())?;
    store
        .set("DRV_KD", ParamValue::Float(0.002))
        .map_err(|e| e.to_string())?;
    let tuning = DriveTuningParams::from_store(&store).to_config();
    info!("tuning loaded: kp={} ki={} kd={}", tuning.kp, tuning.ki, tuning.kd);

    let sim = SimConfig {
        seed: Some(7),
        gyro_noise_deg: 0.2,
        ..SimConfig::default()
    };
    let mut rig = SimRig::new(sim, tuning)?;

    // Phase 1: field-oriented stick drive, rotation passes through
    info!("phase 1: pass-through drive, 1 s forward at half speed");
    for _ in 0..50 {
        rig.step(0.5, 0.0, 0.0)?;
    }
    let (x, y) = rig.physics_mut().position();
    info!("position after pass-through phase: ({:.2}, {:.2}) m", x, y);

    // Phase 2: closed-loop rotation to 90 degrees
    info!("phase 2: rotate to 90 deg");
    let summary = rig.run_to_heading(90.0, 3.0, 1000)?;
    info!(
        "rotate maneuver: converged={} cycles={} final error={:.2} deg",
        summary.converged, summary.cycles, summary.final_error_deg
    );

    Ok(())
}
