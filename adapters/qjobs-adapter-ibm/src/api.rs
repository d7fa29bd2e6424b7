//! IBM Quantum Platform API client.
//!
//! This module implements the read side of the IBM Quantum REST API:
//! - Authentication via IAM token exchange (new API key flow)
//! - Backend calibration properties, optionally as of a point in time
//! - Job status and sampler results
//!
//! Supports both the new IBM Cloud API (`quantum.cloud.ibm.com/api`) and the
//! legacy endpoint (`api.quantum-computing.ibm.com`) for backward compatibility.

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, Response, header};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

use qjobs_hal::Calibration;

use crate::error::{IbmError, IbmResult};

/// Default IBM Quantum Cloud API endpoint (new).
pub const DEFAULT_ENDPOINT: &str = "https://quantum.cloud.ibm.com/api";

/// Legacy IBM Quantum API endpoint.
pub const LEGACY_ENDPOINT: &str = "https://api.quantum-computing.ibm.com";

/// IBM Cloud IAM token endpoint.
const IAM_TOKEN_URL: &str = "https://iam.cloud.ibm.com/identity/token";

/// IBM API version header value.
const IBM_API_VERSION: &str = "2026-02-01";

/// User-Agent sent with requests (Cloudflare blocks default reqwest UA).
const USER_AGENT: &str = concat!("qjobs/", env!("CARGO_PKG_VERSION"), " (quantum-dataset)");

/// IBM Quantum API client.
pub struct IbmClient {
    /// HTTP client.
    client: Client,
    /// API endpoint URL.
    endpoint: String,
    /// Whether using the new Cloud API (vs legacy).
    cloud_api: bool,
}

impl fmt::Debug for IbmClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IbmClient")
            .field("endpoint", &self.endpoint)
            .field("token", &"[REDACTED]")
            .field("cloud_api", &self.cloud_api)
            .finish()
    }
}

/// IAM token response from `iam.cloud.ibm.com`.
#[derive(Debug, Deserialize)]
struct IamTokenResponse {
    access_token: String,
}

impl IbmClient {
    /// Create a new IBM Quantum client using the legacy direct-token mode.
    ///
    /// This connects to the old `api.quantum-computing.ibm.com` endpoint.
    /// For the new IBM Cloud API, use [`IbmClient::connect`] instead.
    pub fn new(endpoint: impl Into<String>, token: &str) -> IbmResult<Self> {
        let headers = base_headers(token)?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(60))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            cloud_api: false,
        })
    }

    /// Create a new IBM Quantum client using the new IBM Cloud API key flow.
    ///
    /// Exchanges the API key for an IAM bearer token and configures the
    /// Service-CRN header required by the new `quantum.cloud.ibm.com/api`.
    pub async fn connect(api_key: &str, service_crn: &str) -> IbmResult<Self> {
        let iam_client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()?;

        let iam_response = iam_client
            .post(IAM_TOKEN_URL)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(format!(
                "grant_type=urn:ibm:params:oauth:grant-type:apikey&apikey={api_key}"
            ))
            .send()
            .await
            .map_err(|e| IbmError::IamTokenExchange(e.to_string()))?;

        if !iam_response.status().is_success() {
            let status = iam_response.status();
            let body = iam_response
                .text()
                .await
                .unwrap_or_else(|_| "no body".to_string());
            return Err(IbmError::IamTokenExchange(format!(
                "IAM returned {status}: {body}"
            )));
        }

        let iam_token: IamTokenResponse = iam_response.json().await.map_err(|e| {
            IbmError::IamTokenExchange(format!("failed to parse IAM response: {e}"))
        })?;

        let mut headers = base_headers(&iam_token.access_token)?;
        // Required on every request to the Cloud API
        headers.insert(
            header::HeaderName::from_static("service-crn"),
            header::HeaderValue::from_str(service_crn)
                .map_err(|_| IbmError::InvalidParameter("invalid Service-CRN value".into()))?,
        );
        headers.insert(
            header::HeaderName::from_static("ibm-api-version"),
            header::HeaderValue::from_static(IBM_API_VERSION),
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(60))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            cloud_api: true,
        })
    }

    /// Whether this client uses the new Cloud API.
    pub fn is_cloud_api(&self) -> bool {
        self.cloud_api
    }

    /// API endpoint this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch a backend's calibration properties.
    ///
    /// With `updated_before`, the service returns the last snapshot taken
    /// before that instant instead of the current one.
    pub async fn get_backend_properties(
        &self,
        name: &str,
        updated_before: Option<DateTime<Utc>>,
    ) -> IbmResult<Calibration> {
        let url = format!("{}/v1/backends/{}/properties", self.endpoint, name);

        let mut request = self.client.get(&url);
        if let Some(instant) = updated_before {
            request = request.query(&[(
                "updated_before",
                instant.to_rfc3339_opts(SecondsFormat::Secs, true),
            )]);
        }

        tracing::debug!(backend = name, ?updated_before, "fetching backend properties");
        let response = request.send().await?;

        if !response.status().is_success() {
            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Err(IbmError::BackendUnavailable(name.to_string()));
            }
            return Err(api_error(response, &format!("properties for {name}")).await);
        }

        let mut properties: Calibration = response.json().await?;
        if properties.backend_name.is_empty() {
            properties.backend_name = name.to_string();
        }
        Ok(properties)
    }

    /// Get job status.
    pub async fn get_job_status(&self, job_id: &str) -> IbmResult<JobStatusResponse> {
        let url = format!("{}/v1/jobs/{}", self.endpoint, job_id);

        tracing::debug!(job_id, "fetching job status");
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Err(IbmError::JobNotFound(job_id.to_string()));
            }
            return Err(api_error(response, &format!("status of job {job_id}")).await);
        }

        response.json().await.map_err(IbmError::from)
    }

    /// Get job results.
    pub async fn get_job_results(&self, job_id: &str) -> IbmResult<JobResultResponse> {
        let url = format!("{}/v1/jobs/{}/results", self.endpoint, job_id);

        tracing::debug!(job_id, "fetching job results");
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Err(IbmError::JobNotFound(job_id.to_string()));
            }
            return Err(api_error(response, &format!("results of job {job_id}")).await);
        }

        response.json().await.map_err(IbmError::from)
    }
}

/// Authorization and content-type headers shared by both API flavours.
fn base_headers(token: &str) -> IbmResult<header::HeaderMap> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| IbmError::InvalidToken)?,
    );
    headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("application/json"),
    );
    Ok(headers)
}

/// Turn a non-success response into an `ApiError`, keeping the service's
/// structured error when it sends one.
async fn api_error(response: Response, context: &str) -> IbmError {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "no body".to_string());

    match serde_json::from_str::<ApiErrorResponse>(&body) {
        Ok(error) if !error.message.is_empty() => IbmError::ApiError {
            code: error.code,
            message: format!("{context}: {}", error.message),
        },
        _ => IbmError::ApiError {
            code: None,
            message: format!("{context} failed with {status}: {body}"),
        },
    }
}

// ============================================================================
// Response types
// ============================================================================

/// API error response.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    /// Error code.
    #[serde(default)]
    code: Option<String>,
    /// Error message.
    #[serde(default)]
    message: String,
}

/// Job status response.
#[derive(Debug, Clone, Deserialize)]
pub struct JobStatusResponse {
    /// Job ID.
    pub id: String,
    /// Job status (top-level, may be mixed case on new API).
    pub status: String,
    /// Backend name.
    #[serde(default)]
    pub backend: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    /// Error information if failed (legacy API).
    #[serde(default)]
    pub error: Option<JobError>,
    /// State object with reason (new Cloud API).
    #[serde(default)]
    pub state: Option<JobState>,
}

/// Job error information (legacy API).
#[derive(Debug, Clone, Deserialize)]
pub struct JobError {
    /// Error code.
    #[serde(default)]
    pub code: Option<String>,
    /// Error message.
    pub message: String,
}

/// Job state with reason (new Cloud API).
#[derive(Debug, Clone, Deserialize)]
pub struct JobState {
    /// Status string.
    #[serde(default)]
    pub status: String,
    /// Reason for failure.
    #[serde(default)]
    pub reason: Option<String>,
}

impl JobStatusResponse {
    /// Normalized uppercase status for comparison.
    pub fn normalized_status(&self) -> String {
        self.status.to_uppercase()
    }

    /// Get the error/failure reason message.
    pub fn error_message(&self) -> Option<String> {
        if let Some(reason) = self.state.as_ref().and_then(|s| s.reason.as_ref()) {
            return Some(reason.clone());
        }
        self.error.as_ref().map(|e| e.message.clone())
    }
}

/// Job result response.
#[derive(Debug, Deserialize)]
pub struct JobResultResponse {
    /// Results, one per submitted circuit.
    pub results: Vec<SamplerResult>,
}

/// Sampler result for one circuit.
#[derive(Debug, Deserialize)]
pub struct SamplerResult {
    /// Map of classical register names to sample data.
    #[serde(default)]
    pub data: HashMap<String, ClassicalRegisterData>,
}

/// Classical register data from V2 Sampler results.
#[derive(Debug, Deserialize)]
pub struct ClassicalRegisterData {
    /// Raw measurement samples as hex strings (e.g., `["0x0", "0xd", ...]`).
    pub samples: Vec<String>,
    /// Register width, when the service reports it.
    #[serde(default)]
    pub num_bits: Option<usize>,
}
