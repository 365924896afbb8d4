use mecadrive_core::drive::DriveError;

/// Errors that can occur during simulation runs.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("invalid simulation config: {0}")]
    InvalidConfig(&'static str),

    #[error("drive controller fault: {0}")]
    Controller(DriveError),
}
