//! Service traits.
//!
//! A [`QuantumService`] is the read-only view of a cloud quantum provider
//! that dataset collection needs:
//!
//! ```text
//!   resolve_device(name) ──→ Calibration            (current snapshot)
//!   resolve_job(id)      ──→ RemoteJob ──→ status()
//!                                      ──→ properties()   (job-time snapshot)
//!                                      ──→ result()       (Completed only)
//! ```
//!
//! | Method | Kind | Returns |
//! |--------|------|---------|
//! | `QuantumService::name()` | sync | `&str` |
//! | `QuantumService::resolve_device()` | async | `HalResult<Calibration>` |
//! | `QuantumService::resolve_job()` | async | `HalResult<Box<dyn RemoteJob>>` |
//! | `RemoteJob::id()` | sync | `&JobId` |
//! | `RemoteJob::status()` | async | `HalResult<JobStatus>` |
//! | `RemoteJob::properties()` | async | `HalResult<Calibration>` |
//! | `RemoteJob::result()` | async | `HalResult<SamplerOutput>` |

use async_trait::async_trait;

use crate::calibration::Calibration;
use crate::error::HalResult;
use crate::job::{JobId, JobStatus};
use crate::result::SamplerOutput;

/// Read-only access to a remote quantum service.
#[async_trait]
pub trait QuantumService: Send + Sync {
    /// Provider name, for logging.
    fn name(&self) -> &str;

    /// Current calibration snapshot of a device.
    async fn resolve_device(&self, device: &str) -> HalResult<Calibration>;

    /// Look up a previously submitted job.
    async fn resolve_job(&self, job_id: &JobId) -> HalResult<Box<dyn RemoteJob>>;
}

/// Handle to one job on the remote service.
#[async_trait]
pub trait RemoteJob: Send + Sync {
    /// Job identifier.
    fn id(&self) -> &JobId;

    /// Lifecycle status as reported by the service.
    async fn status(&self) -> HalResult<JobStatus>;

    /// Calibration snapshot of the device the job ran on, as of the job.
    async fn properties(&self) -> HalResult<Calibration>;

    /// Sampler output of the job's first circuit.
    async fn result(&self) -> HalResult<SamplerOutput>;
}
