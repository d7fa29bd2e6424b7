//! Connections command implementation.
//!
//! List the two-qubit links of a device together with their current error.

use anyhow::{Context, Result};
use console::style;

use qjobs_hal::QuantumService;

use super::common::connect_service;

/// Execute the connections command.
pub async fn execute(device: &str, gate: &str, endpoint: Option<&str>) -> Result<()> {
    let service = connect_service(endpoint).await?;
    let calibration = service
        .resolve_device(device)
        .await
        .with_context(|| format!("Failed to fetch calibration of {device}"))?;

    let connections = calibration.gates_of_type(gate);
    println!(
        "{} {} '{}' connections on {}",
        style("→").cyan().bold(),
        connections.len(),
        gate,
        style(device).bold()
    );
    if let Some(updated) = &calibration.last_update_date {
        println!("  Calibrated: {}", style(updated).dim());
    }
    println!();

    for connection in &connections {
        let Some((a, b)) = connection.endpoints() else {
            continue;
        };
        match connection.first_parameter() {
            Some(param) => println!(
                "  {:<12} {:>4} → {:<4} {}: {}",
                style(&connection.name).cyan(),
                a,
                b,
                param.name,
                param.value
            ),
            None => println!(
                "  {:<12} {:>4} → {:<4} {}",
                style(&connection.name).cyan(),
                a,
                b,
                style("no calibration").yellow()
            ),
        }
    }

    Ok(())
}
