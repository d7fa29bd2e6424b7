//! Error types for dataset collection and export.

use std::path::PathBuf;

use thiserror::Error;

use qjobs_hal::HalError;

use crate::validate::ShapeError;

/// Errors that abort a collection or export run.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Filesystem error.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The input glob is malformed.
    #[error("Invalid input pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// A path matched by the glob could not be read.
    #[error("Cannot read matched path: {0}")]
    Glob(#[from] glob::GlobError),

    /// A cached mapping file is not a valid mapping record.
    #[error("Failed to parse job mapping {path}: {source}")]
    Parse {
        /// Offending file.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },

    /// A mapping key is not a logical-qubit index.
    #[error("Job {job_id}: mapping key '{key}' is not a qubit index")]
    InvalidLogicalIndex {
        /// Job identifier.
        job_id: String,
        /// Offending key.
        key: String,
    },

    /// Two mapping keys name the same logical qubit (e.g. `"0"` and `"00"`).
    #[error("Job {job_id}: mapping keys '{first}' and '{second}' both name logical qubit {logical}")]
    DuplicateLogicalIndex {
        /// Job identifier.
        job_id: String,
        /// Logical index both keys parse to.
        logical: usize,
        /// Lesser of the two keys.
        first: String,
        /// Greater of the two keys.
        second: String,
    },

    /// Logical qubits 0..4 are not all present in the mapping.
    #[error("Job {job_id}: anchor circuit needs logical qubits 0-4, found {found:?}")]
    InsufficientAnchorQubits {
        /// Job identifier.
        job_id: String,
        /// Logical indices below 5 that were present.
        found: Vec<usize>,
    },

    /// None of the configured classical registers is in the result.
    #[error("Job {job_id}: no classical register among {candidates:?} (result has {available:?})")]
    MissingRegister {
        /// Job identifier.
        job_id: String,
        /// Names tried.
        candidates: Vec<String>,
        /// Names the result carries.
        available: Vec<String>,
    },

    /// The expected bitstring was never measured.
    #[error("Job {job_id}: expected outcome '{bitstring}' not present in register '{register}'")]
    MissingOutcome {
        /// Job identifier.
        job_id: String,
        /// Register the counts came from.
        register: String,
        /// Bitstring looked up.
        bitstring: String,
    },

    /// More hits than shots: the shot count does not match the job.
    #[error("Job {job_id}: {count} hits exceed the configured {shots} shots")]
    CountExceedsShots {
        /// Job identifier.
        job_id: String,
        /// Observed count.
        count: u64,
        /// Configured shot count.
        shots: u32,
    },

    /// A gate has no calibration parameters.
    #[error("Gate {gate} has no calibration parameters")]
    MissingGateParameter {
        /// Gate instance name.
        gate: String,
    },

    /// The device exposes no connection of the configured gate type.
    #[error("Device {device} exposes no '{gate}' connections")]
    EmptyConnectionList {
        /// Device name.
        device: String,
        /// Gate type filtered on.
        gate: String,
    },

    /// A record does not fit the fixed CSV schema.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// CSV serialization error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Remote service error.
    #[error("Service error: {0}")]
    Service(#[from] HalError),
}

/// Result type for dataset operations.
pub type DatasetResult<T> = Result<T, DatasetError>;
