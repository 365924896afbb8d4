//! Heading control laws and output shaping
//!
//! The rotation axis is governed by one of two closed-loop laws, kept as
//! distinct named strategies because they encode different tunings:
//!
//! - [`law::knob_field`]: raw-degree error against an absolute dial
//!   target, time-scaled integral and derivative terms
//! - [`law::rotate_to_heading`]: normalized shortest-path error with
//!   integral anti-windup and feed-forward bias
//!
//! [`shaper`] holds the final-stage output conditioning (range clamp and
//! stall deadband); [`config`] the shared tuning value object.

pub mod config;
pub mod law;
pub mod shaper;

pub use config::{ConfigError, DrivePidConfig};
pub use law::{knob_field, rotate_to_heading, PidState};
pub use shaper::{apply_deadband, clamp_output};
