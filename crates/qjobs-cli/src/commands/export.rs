//! Export command implementation.
//!
//! Collect features of every cached job mapping and write them as CSV.

use anyhow::{Context, Result};
use console::style;

use qjobs_dataset::{Collector, CollectorConfig, write_csv};
use qjobs_hal::QuantumService;

use super::common::connect_service;

/// Execute the export command.
pub async fn execute(config: CollectorConfig, endpoint: Option<&str>) -> Result<()> {
    let service = connect_service(endpoint).await?;
    run(&service, config).await?;
    Ok(())
}

/// Collect and write against any service.
///
/// Returns the number of data rows written.
pub async fn run<S: QuantumService + ?Sized>(service: &S, config: CollectorConfig) -> Result<usize> {
    let device = config.device.clone();
    let collector = Collector::connect(service, config)
        .await
        .with_context(|| format!("Failed to load connection list of {device}"))?;

    println!(
        "{} Making job data list... ({} {} connections on {})\n",
        style("→").cyan().bold(),
        collector.connections().len(),
        collector.config().two_qubit_gate,
        style(&device).bold()
    );

    let paths = collector.discover()?;
    let collection = collector
        .collect_paths(&paths, |id| {
            println!("\tGetting Data for {}", style(id).dim());
        })
        .await
        .context("Failed to collect job features")?;

    let output = &collector.config().output;
    println!(
        "\n{} Completed, writing data to {}",
        style("✓").green().bold(),
        style(output.display()).cyan()
    );

    let written = write_csv(&collection.records, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "  Files scanned: {}  Rows written: {}  Skipped (not completed): {}",
        collection.scanned(),
        style(written).green(),
        style(collection.skipped.len()).yellow()
    );

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::Path;

    use async_trait::async_trait;
    use qjobs_hal::{
        Calibration, Counts, GateProperties, HalError, HalResult, JobId, JobStatus, Nduv,
        RemoteJob, SamplerOutput,
    };

    #[derive(Clone)]
    struct FixedJob {
        id: JobId,
        status: JobStatus,
        calibration: Calibration,
        output: SamplerOutput,
    }

    #[async_trait]
    impl RemoteJob for FixedJob {
        fn id(&self) -> &JobId {
            &self.id
        }

        async fn status(&self) -> HalResult<JobStatus> {
            Ok(self.status.clone())
        }

        async fn properties(&self) -> HalResult<Calibration> {
            Ok(self.calibration.clone())
        }

        async fn result(&self) -> HalResult<SamplerOutput> {
            Ok(self.output.clone())
        }
    }

    struct FixedService {
        device: Calibration,
        jobs: HashMap<String, FixedJob>,
    }

    #[async_trait]
    impl QuantumService for FixedService {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn resolve_device(&self, device: &str) -> HalResult<Calibration> {
            if device == self.device.backend_name {
                Ok(self.device.clone())
            } else {
                Err(HalError::DeviceUnavailable(device.to_string()))
            }
        }

        async fn resolve_job(&self, job_id: &JobId) -> HalResult<Box<dyn RemoteJob>> {
            self.jobs
                .get(job_id.as_str())
                .cloned()
                .map(|job| Box::new(job) as Box<dyn RemoteJob>)
                .ok_or_else(|| HalError::JobNotFound(job_id.to_string()))
        }
    }

    /// Eight qubits in a line coupled by `ecr` gates.
    fn line_device() -> Calibration {
        Calibration {
            backend_name: "ibm_sherbrooke".to_string(),
            last_update_date: None,
            qubits: (0..8)
                .map(|q| vec![Nduv::new("readout_error", 0.01 + f64::from(q) / 1000.0)])
                .collect(),
            gates: (0..7)
                .map(|q| GateProperties {
                    qubits: vec![q, q + 1],
                    gate: "ecr".to_string(),
                    name: format!("ecr{q}_{}", q + 1),
                    parameters: vec![Nduv::new("gate_error", 0.006)],
                })
                .collect(),
        }
    }

    fn service(jobs: &[(&str, JobStatus)]) -> FixedService {
        let jobs = jobs
            .iter()
            .map(|(id, status)| {
                let job = FixedJob {
                    id: JobId::new(*id),
                    status: status.clone(),
                    calibration: line_device(),
                    output: SamplerOutput::new().with_register(
                        "c_0",
                        Counts::from_pairs([("1101", 2048), ("0000", 6144)]),
                    ),
                };
                ((*id).to_string(), job)
            })
            .collect();
        FixedService {
            device: line_device(),
            jobs,
        }
    }

    fn write_mapping(dir: &Path, file: &str, id: &str, first: u32) {
        let mapping: String = (0..5)
            .map(|l| format!("\"{l}\": {}", first + l))
            .collect::<Vec<_>>()
            .join(", ");
        let doc =
            format!(r#"{{"id": "{id}", "mapping": {{{mapping}}}, "register_count": 2, "padding": 0}}"#);
        std::fs::write(dir.join(file), doc).unwrap();
    }

    fn config_for(dir: &Path) -> CollectorConfig {
        CollectorConfig::default()
            .with_input_glob(format!("{}/*.json", dir.display()))
            .with_output(dir.join("jobs_data.csv"))
    }

    #[tokio::test]
    async fn test_run_writes_completed_jobs_only() {
        let dir = tempfile::tempdir().unwrap();
        write_mapping(dir.path(), "a.json", "job-a", 0);
        write_mapping(dir.path(), "b.json", "job-b", 3);
        write_mapping(dir.path(), "c.json", "job-c", 1);

        let service = service(&[
            ("job-a", JobStatus::Completed),
            ("job-b", JobStatus::Completed),
            ("job-c", JobStatus::Running),
        ]);
        let config = config_for(dir.path());

        let written = run(&service, config.clone()).await.unwrap();
        assert_eq!(written, 2);

        let csv = std::fs::read_to_string(&config.output).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("job_id,"));
        assert!(lines[1].starts_with("job-a,2,0,0,1,2,3,4,"));
        assert!(lines[2].starts_with("job-b,2,0,3,4,5,6,7,"));
        assert!(lines[1].ends_with(",0.25"));
    }

    #[tokio::test]
    async fn test_run_fails_on_unknown_job() {
        let dir = tempfile::tempdir().unwrap();
        write_mapping(dir.path(), "a.json", "job-a", 0);

        let service = service(&[]);
        let config = config_for(dir.path());

        let err = run(&service, config.clone()).await.unwrap_err();
        assert!(format!("{err:#}").contains("job-a"));
        assert!(!config.output.exists());
    }

    #[tokio::test]
    async fn test_run_fails_on_unknown_device() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&[]);
        let config = config_for(dir.path()).with_device("ibm_nowhere");

        let err = run(&service, config).await.unwrap_err();
        assert!(err.to_string().contains("ibm_nowhere"));
    }
}
