//! IBM Quantum service implementation.

use std::sync::Arc;

use async_trait::async_trait;
use qjobs_hal::{
    Calibration, Counts, HalError, HalResult, JobId, JobStatus, QuantumService, RemoteJob,
    SamplerOutput,
};

use crate::api::{IbmClient, JobResultResponse, JobStatusResponse, LEGACY_ENDPOINT};
use crate::error::{IbmError, IbmResult};

/// IBM Quantum service adapter.
pub struct IbmService {
    /// API client, shared with every job resolved through this service.
    client: Arc<IbmClient>,
}

impl IbmService {
    /// Wrap an already configured client.
    pub fn with_client(client: IbmClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Connect using credentials from the environment.
    ///
    /// Reads `IBM_API_KEY` and `IBM_SERVICE_CRN` for the Cloud API. If
    /// `IBM_API_KEY` is not set, falls back to `IBM_QUANTUM_TOKEN` with the
    /// legacy endpoint (or `legacy_endpoint` when given).
    pub async fn connect(legacy_endpoint: Option<&str>) -> IbmResult<Self> {
        if let Ok(api_key) = std::env::var("IBM_API_KEY") {
            let service_crn =
                std::env::var("IBM_SERVICE_CRN").map_err(|_| IbmError::MissingServiceCrn)?;

            tracing::info!("connecting to IBM Cloud API (IAM key exchange)");
            let client = IbmClient::connect(&api_key, &service_crn).await?;
            return Ok(Self::with_client(client));
        }

        if let Ok(token) = std::env::var("IBM_QUANTUM_TOKEN") {
            tracing::info!("falling back to legacy IBM Quantum token");
            let endpoint = legacy_endpoint.unwrap_or(LEGACY_ENDPOINT);
            let client = IbmClient::new(endpoint, &token)?;
            return Ok(Self::with_client(client));
        }

        Err(IbmError::MissingToken)
    }

    /// Underlying API client.
    pub fn client(&self) -> &IbmClient {
        &self.client
    }
}

#[async_trait]
impl QuantumService for IbmService {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "ibm"
    }

    async fn resolve_device(&self, device: &str) -> HalResult<Calibration> {
        Ok(self.client.get_backend_properties(device, None).await?)
    }

    async fn resolve_job(&self, job_id: &JobId) -> HalResult<Box<dyn RemoteJob>> {
        let info = self.client.get_job_status(job_id.as_str()).await?;
        Ok(Box::new(IbmJob {
            client: Arc::clone(&self.client),
            id: job_id.clone(),
            info,
        }))
    }
}

/// A job resolved on IBM Quantum.
///
/// Status is captured when the job is resolved; properties and results are
/// fetched on demand.
pub struct IbmJob {
    client: Arc<IbmClient>,
    id: JobId,
    info: JobStatusResponse,
}

#[async_trait]
impl RemoteJob for IbmJob {
    fn id(&self) -> &JobId {
        &self.id
    }

    async fn status(&self) -> HalResult<JobStatus> {
        Ok(map_status(&self.info))
    }

    async fn properties(&self) -> HalResult<Calibration> {
        let backend = self.info.backend.as_deref().ok_or_else(|| {
            HalError::Backend(format!("job {} does not report its backend", self.id))
        })?;

        Ok(self
            .client
            .get_backend_properties(backend, self.info.created)
            .await?)
    }

    async fn result(&self) -> HalResult<SamplerOutput> {
        let results = self.client.get_job_results(self.id.as_str()).await?;
        results_to_output(&results)
            .ok_or_else(|| IbmError::NoResults(self.id.to_string()).into())
    }
}

/// Map the service's status string onto [`JobStatus`].
fn map_status(info: &JobStatusResponse) -> JobStatus {
    match info.normalized_status().as_str() {
        "QUEUED" | "INITIALIZING" => JobStatus::Queued,
        "VALIDATING" | "RUNNING" => JobStatus::Running,
        "COMPLETED" => JobStatus::Completed,
        "FAILED" | "ERROR" => JobStatus::Failed(
            info.error_message()
                .unwrap_or_else(|| "Unknown error".to_string()),
        ),
        "CANCELLED" | "CANCELLED - RAN TOO LONG" => JobStatus::Cancelled,
        _ => JobStatus::Running, // Treat unknown as running
    }
}

/// Aggregate the first circuit's per-register samples into counts.
fn results_to_output(results: &JobResultResponse) -> Option<SamplerOutput> {
    let result = results.results.first()?;

    let mut output = SamplerOutput::new();
    for (name, register) in &result.data {
        let width = register
            .num_bits
            .unwrap_or_else(|| infer_bit_width(&register.samples));

        let mut counts = Counts::new();
        for sample in &register.samples {
            counts.record(hex_to_binary(sample, width));
        }
        output.insert(name.clone(), counts);
    }
    Some(output)
}

/// Infer the classical register bit width from the V2 hex samples.
///
/// Finds the maximum value across all samples and uses its bit length.
/// Falls back to 1 if all samples are zero.
fn infer_bit_width(samples: &[String]) -> usize {
    let max_val = samples
        .iter()
        .filter_map(|s| {
            let hex = s.strip_prefix("0x").unwrap_or(s);
            u64::from_str_radix(hex, 16).ok()
        })
        .max()
        .unwrap_or(0);

    if max_val == 0 {
        1
    } else {
        64 - max_val.leading_zeros() as usize
    }
}

/// Convert hex string to binary string, zero-padded to `width` bits.
fn hex_to_binary(hex: &str, width: usize) -> String {
    let hex = hex.strip_prefix("0x").unwrap_or(hex);

    if let Ok(value) = u64::from_str_radix(hex, 16) {
        format!("{value:0>width$b}")
    } else {
        // If not hex, assume it's already binary
        hex.to_string()
    }
}
