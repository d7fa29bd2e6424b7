//! qjobs Hardware Abstraction Layer
//!
//! This crate describes the slice of a cloud quantum service that dataset
//! collection reads from: device calibration snapshots, job status, and
//! sampler results.
//!
//! # Overview
//!
//! - A [`QuantumService`] trait for device and job lookup
//! - A [`RemoteJob`] handle for per-job status, calibration, and results
//! - [`Calibration`] snapshots with per-qubit and per-gate error data
//! - [`Counts`] and [`SamplerOutput`] for measured histograms
//!
//! # Supported Services
//!
//! | Service | Crate | Authentication |
//! |---------|-------|----------------|
//! | IBM Quantum (Cloud) | `qjobs-adapter-ibm` | `IBM_API_KEY` + `IBM_SERVICE_CRN` |
//! | IBM Quantum (legacy) | `qjobs-adapter-ibm` | `IBM_QUANTUM_TOKEN` |
//!
//! # Implementing a Custom Service
//!
//! ```ignore
//! use qjobs_hal::{
//!     Calibration, HalResult, JobId, JobStatus, QuantumService, RemoteJob, SamplerOutput,
//! };
//! use async_trait::async_trait;
//!
//! struct MyService;
//!
//! #[async_trait]
//! impl QuantumService for MyService {
//!     fn name(&self) -> &str { "my_service" }
//!
//!     async fn resolve_device(&self, device: &str) -> HalResult<Calibration> {
//!         // Fetch the device's current calibration
//!         # todo!()
//!     }
//!
//!     async fn resolve_job(&self, job_id: &JobId) -> HalResult<Box<dyn RemoteJob>> {
//!         // Look the job up and wrap it in a handle
//!         # todo!()
//!     }
//! }
//! ```

pub mod calibration;
pub mod error;
pub mod job;
pub mod result;
pub mod service;

pub use calibration::{Calibration, GateProperties, Nduv, READOUT_ERROR};
pub use error::{HalError, HalResult};
pub use job::{JobId, JobStatus};
pub use result::{Counts, SamplerOutput};
pub use service::{QuantumService, RemoteJob};
