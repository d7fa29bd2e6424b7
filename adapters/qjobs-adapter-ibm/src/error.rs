//! Error types for IBM Quantum adapter.

use thiserror::Error;

/// Result type for IBM operations.
pub type IbmResult<T> = Result<T, IbmError>;

/// Errors that can occur when using IBM Quantum.
#[derive(Debug, Error)]
pub enum IbmError {
    /// Missing API token.
    #[error(
        "IBM Quantum API token not found. Set IBM_API_KEY or IBM_QUANTUM_TOKEN environment variable."
    )]
    MissingToken,

    /// Invalid API token.
    #[error("Invalid IBM Quantum API token")]
    InvalidToken,

    /// IAM token exchange failed.
    #[error("IAM token exchange failed: {0}")]
    IamTokenExchange(String),

    /// Missing service CRN.
    #[error("IBM_SERVICE_CRN environment variable is required when using IBM_API_KEY")]
    MissingServiceCrn,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API returned an error.
    #[error("IBM Quantum API error: {message}")]
    ApiError {
        /// Error code from API.
        code: Option<String>,
        /// Error message.
        message: String,
    },

    /// Job not found.
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// Job has no results to fetch.
    #[error("Job {0} has no results")]
    NoResults(String),

    /// Backend not available.
    #[error("Backend not available: {0}")]
    BackendUnavailable(String),

    /// Invalid parameter.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl From<IbmError> for qjobs_hal::HalError {
    fn from(e: IbmError) -> Self {
        match e {
            IbmError::MissingToken
            | IbmError::InvalidToken
            | IbmError::IamTokenExchange(_)
            | IbmError::MissingServiceCrn => {
                qjobs_hal::HalError::AuthenticationFailed(e.to_string())
            }
            IbmError::JobNotFound(id) => qjobs_hal::HalError::JobNotFound(id),
            IbmError::NoResults(id) => qjobs_hal::HalError::ResultUnavailable(id),
            IbmError::BackendUnavailable(name) => qjobs_hal::HalError::DeviceUnavailable(name),
            IbmError::HttpError(err) => qjobs_hal::HalError::Network(err),
            IbmError::InvalidParameter(msg) => qjobs_hal::HalError::Configuration(msg),
            IbmError::ApiError { .. } => qjobs_hal::HalError::Backend(e.to_string()),
        }
    }
}
