use thiserror::Error;

use crate::scoring::GENERIC_FAILURE_MESSAGE;

/// Failures surfaced by a camera session. Every variant renders as a
/// dismissible, user-readable message; the payloads carry the platform
/// detail for logging.
#[derive(Error, Debug)]
pub enum CameraError {
    #[error("No cameras found on this device")]
    NoDevices,

    #[error("Unable to access camera. Please grant camera permissions.")]
    PermissionDenied(String),

    #[error("Failed to start camera. Please check permissions.")]
    StartFailure(String),

    #[error("Camera connection was lost: {0}")]
    DeviceLost(String),

    #[error("Scanner is already running")]
    AlreadyScanning,

    #[error("Camera session hit an error; close it before retrying")]
    CloseRequired,

    #[error("Scanner is not running")]
    NotScanning,

    #[error("Camera session is closed")]
    SessionClosed,
}

/// Failures from the remote scoring call.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Scoring request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Service { status: u16, message: String },
}

impl ScanError {
    /// The message shown to the user. Server-supplied detail wins; transport
    /// failures collapse to the generic message.
    pub fn user_message(&self) -> String {
        match self {
            ScanError::Http(_) => GENERIC_FAILURE_MESSAGE.to_string(),
            ScanError::Service { message, .. } => message.clone(),
        }
    }
}
