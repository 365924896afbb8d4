//! Tuning parameter management
//!
//! Bounded, allocation-free key-value store for named tuning parameters,
//! plus the drive tuning block mapping stored values onto a validated
//! [`crate::control::DrivePidConfig`]. Persistence of the store contents
//! is a platform concern and lives outside this crate.

pub mod drive;
pub mod error;
pub mod storage;

pub use drive::DriveTuningParams;
pub use error::ParameterError;
pub use storage::{ParamFlags, ParamValue, ParameterStore};
