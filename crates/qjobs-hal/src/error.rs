//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur when talking to a remote quantum service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Device is unknown to the service or not reachable.
    #[error("Device not available: {0}")]
    DeviceUnavailable(String),

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Job not found.
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// Job has no result payload yet (or never will).
    #[error("Job {0} has no result available")]
    ResultUnavailable(String),

    /// A calibration value the caller asked for is absent from the snapshot.
    #[error("Calibration value '{property}' missing for qubit {qubit}")]
    MissingCalibration {
        /// Physical qubit index.
        qubit: u32,
        /// Property name (e.g. `readout_error`).
        property: String,
    },

    /// Network error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic service error.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
