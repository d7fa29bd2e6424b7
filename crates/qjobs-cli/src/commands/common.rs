//! Shared helpers for CLI commands.

use anyhow::{Context, Result};

use qjobs_adapter_ibm::IbmService;

/// Connect to IBM Quantum with credentials from the environment.
pub async fn connect_service(endpoint: Option<&str>) -> Result<IbmService> {
    let service = IbmService::connect(endpoint)
        .await
        .context("Failed to connect to IBM Quantum")?;
    tracing::debug!(
        endpoint = service.client().endpoint(),
        cloud_api = service.client().is_cloud_api(),
        "connected"
    );
    Ok(service)
}
