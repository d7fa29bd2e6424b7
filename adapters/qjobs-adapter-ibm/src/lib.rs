//! IBM Quantum service adapter for qjobs.
//!
//! Reads device calibration snapshots, job status, and sampler results from
//! the IBM Quantum REST API and exposes them through
//! [`qjobs_hal::QuantumService`].
//!
//! # Authentication
//!
//! Two modes are supported:
//!
//! - **Cloud API** (recommended): set `IBM_API_KEY` and `IBM_SERVICE_CRN`.
//!   The API key is exchanged for a short-lived IAM bearer token.
//! - **Legacy token**: set `IBM_QUANTUM_TOKEN` to talk to
//!   `api.quantum-computing.ibm.com` directly.
//!
//! # Example
//!
//! ```ignore
//! use qjobs_adapter_ibm::IbmService;
//! use qjobs_hal::{JobId, QuantumService};
//!
//! let service = IbmService::connect(None).await?;
//! let calibration = service.resolve_device("ibm_sherbrooke").await?;
//! let job = service.resolve_job(&JobId::new("cw3t0ywggr6g0087j4h0")).await?;
//! println!("{} ecr links, job is {}", calibration.gates_of_type("ecr").len(), job.status().await?);
//! ```

mod api;
mod error;
mod service;

pub use api::{DEFAULT_ENDPOINT, IbmClient, JobStatusResponse, LEGACY_ENDPOINT};
pub use error::{IbmError, IbmResult};
pub use service::{IbmJob, IbmService};
