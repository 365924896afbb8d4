//! Drive mode state machine
//!
//! One mode governs each control cycle. The operator's mode-toggle input
//! cycles between the two field-oriented driving modes; the closed-loop
//! rotation mode and the experimental mode are sticky and only leave via
//! an explicit mode override. No transition touches accumulated PID
//! state; clearing it is the drive facade's explicit reset.

/// Control mode for the drive base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriveMode {
    /// Field-oriented stick drive; the operator rotation command passes
    /// through unmodified.
    #[default]
    StickField,
    /// Field-oriented drive with the heading held against an absolute
    /// dial target by the knob-field law.
    KnobField,
    /// Closed-loop rotation to a target heading by the shortest path.
    RotatePid,
    /// Experimental robot-orient stick variant. Untested on hardware;
    /// preserved as-is.
    StickField2,
}

impl DriveMode {
    /// Next mode for the operator's mode-toggle input.
    ///
    /// Toggles `StickField <-> KnobField`. `RotatePid` and `StickField2`
    /// are unaffected; once entered they only exit via an explicit mode
    /// override.
    pub fn advance(self) -> Self {
        match self {
            DriveMode::KnobField => DriveMode::StickField,
            DriveMode::StickField => DriveMode::KnobField,
            DriveMode::RotatePid => DriveMode::RotatePid,
            DriveMode::StickField2 => DriveMode::StickField2,
        }
    }

    /// Mode name for logging and telemetry.
    pub fn name(&self) -> &'static str {
        match self {
            DriveMode::StickField => "StickField",
            DriveMode::KnobField => "KnobField",
            DriveMode::RotatePid => "RotatePid",
            DriveMode::StickField2 => "StickField2",
        }
    }
}
