//! Feature collection from completed jobs.
//!
//! The [`Collector`] owns the run's read-only context: the configuration and
//! the connection list taken from the device's current calibration. Each
//! cached mapping is then augmented independently:
//!
//! ```text
//!   JobMapping ──→ anchor qubits ──→ resolve_job ──→ properties + status
//!                                                      │
//!                      not Completed ──→ skipped ←─────┤
//!                                                      ↓
//!                 accuracy (result) ──→ readout errors ──→ gate errors
//! ```
//!
//! Work is strictly sequential: one file, then its remote calls, then the
//! next file.

use std::path::{Path, PathBuf};

use qjobs_hal::{Calibration, Counts, GateProperties, JobId, QuantumService, SamplerOutput};

use crate::config::CollectorConfig;
use crate::error::{DatasetError, DatasetResult};
use crate::mapping::JobMapping;
use crate::record::{AugmentedJob, QubitQuality};

/// Records produced by one collection pass.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// Augmented records of completed jobs, in discovery order.
    pub records: Vec<AugmentedJob>,
    /// Jobs that were not completed, in discovery order.
    pub skipped: Vec<JobId>,
}

impl Collection {
    /// Number of mapping files processed.
    pub fn scanned(&self) -> usize {
        self.records.len() + self.skipped.len()
    }
}

/// Builds [`AugmentedJob`]s from cached mappings and a remote service.
pub struct Collector<'a, S: QuantumService + ?Sized> {
    service: &'a S,
    config: CollectorConfig,
    connections: Vec<GateProperties>,
}

impl<'a, S: QuantumService + ?Sized> Collector<'a, S> {
    /// Fetch the device's connection list and prepare for collection.
    ///
    /// Fails if the device exposes no gate of the configured type, since
    /// every job would then end up with zero gate features.
    pub async fn connect(service: &'a S, config: CollectorConfig) -> DatasetResult<Self> {
        let calibration = service.resolve_device(&config.device).await?;
        Self::from_calibration(service, config, &calibration)
    }

    /// Prepare for collection from an already fetched device snapshot.
    pub fn from_calibration(
        service: &'a S,
        config: CollectorConfig,
        calibration: &Calibration,
    ) -> DatasetResult<Self> {
        let connections = calibration.gates_of_type(&config.two_qubit_gate);
        if connections.is_empty() {
            return Err(DatasetError::EmptyConnectionList {
                device: config.device.clone(),
                gate: config.two_qubit_gate.clone(),
            });
        }

        tracing::info!(
            service = service.name(),
            device = %config.device,
            gate = %config.two_qubit_gate,
            connections = connections.len(),
            "loaded connection list"
        );

        Ok(Self {
            service,
            config,
            connections,
        })
    }

    /// Run configuration.
    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Two-qubit connections of the device, in snapshot order.
    pub fn connections(&self) -> &[GateProperties] {
        &self.connections
    }

    /// Cached mapping files matching the input glob, in glob order.
    pub fn discover(&self) -> DatasetResult<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in glob::glob(&self.config.input_glob)? {
            paths.push(entry?);
        }
        tracing::debug!(pattern = %self.config.input_glob, files = paths.len(), "discovered job mappings");
        Ok(paths)
    }

    /// Discover and augment every cached mapping.
    pub async fn collect(&self) -> DatasetResult<Collection> {
        let paths = self.discover()?;
        self.collect_paths(&paths, |_| {}).await
    }

    /// Augment the given mapping files, in order.
    ///
    /// `on_job` is called with each job's id once its mapping is loaded and
    /// before the service is queried.
    pub async fn collect_paths<F>(
        &self,
        paths: &[PathBuf],
        mut on_job: F,
    ) -> DatasetResult<Collection>
    where
        F: FnMut(&JobId),
    {
        let mut collection = Collection::default();
        for path in paths {
            self.collect_file(path, &mut collection, &mut on_job).await?;
        }
        Ok(collection)
    }

    /// Load one mapping file and add its outcome to `collection`.
    pub async fn collect_file<F>(
        &self,
        path: &Path,
        collection: &mut Collection,
        on_job: &mut F,
    ) -> DatasetResult<()>
    where
        F: FnMut(&JobId) + ?Sized,
    {
        let mapping = JobMapping::load(path)?;
        on_job(&mapping.id);

        let id = mapping.id.clone();
        match self.augment(mapping).await? {
            Some(record) => collection.records.push(record),
            None => collection.skipped.push(id),
        }
        Ok(())
    }

    /// Derive the features of one job.
    ///
    /// Returns `Ok(None)` when the job is not completed.
    pub async fn augment(&self, mapping: JobMapping) -> DatasetResult<Option<AugmentedJob>> {
        let physical_qubits = mapping.anchor_qubits()?;

        let job = self.service.resolve_job(&mapping.id).await?;
        let properties = job.properties().await?;
        let status = job.status().await?;

        if !status.is_completed() {
            tracing::debug!(job_id = %job.id(), %status, "skipping job that is not completed");
            return Ok(None);
        }

        let output = job.result().await?;
        let accuracy = self.accuracy(&mapping.id, &output)?;

        let qubit_qualities = physical_qubits
            .iter()
            .map(|&qubit| -> DatasetResult<QubitQuality> {
                Ok(QubitQuality {
                    qubit,
                    readout_error: properties.readout_error(qubit)?,
                })
            })
            .collect::<DatasetResult<Vec<_>>>()?;

        let mut record = AugmentedJob {
            id: mapping.id,
            register_count: mapping.register_count,
            padding: mapping.padding,
            physical_qubits: physical_qubits.to_vec(),
            accuracy,
            qubit_qualities,
            gate_qualities: Vec::new(),
        };

        for connection in self.connections.iter().filter(|c| c.spans(&physical_qubits)) {
            let parameter =
                connection
                    .first_parameter()
                    .ok_or_else(|| DatasetError::MissingGateParameter {
                        gate: connection.name.clone(),
                    })?;
            record.set_gate_quality(&connection.name, parameter.value);
        }

        tracing::info!(
            job_id = %record.id,
            accuracy = record.accuracy,
            gates = record.gate_qualities.len(),
            "collected job features"
        );
        Ok(Some(record))
    }

    /// Fraction of shots that measured the expected bitstring.
    fn accuracy(&self, job_id: &JobId, output: &SamplerOutput) -> DatasetResult<f64> {
        let (register, counts) = self.anchor_counts(job_id, output)?;

        let hits = counts
            .lookup(&self.config.expected_output)
            .ok_or_else(|| DatasetError::MissingOutcome {
                job_id: job_id.to_string(),
                register: register.to_string(),
                bitstring: self.config.expected_output.clone(),
            })?;

        tracing::debug!(
            %job_id,
            register,
            hits,
            outcomes = counts.len(),
            observed_shots = counts.total_shots(),
            "counted expected outcome"
        );

        if hits > u64::from(self.config.shots) {
            return Err(DatasetError::CountExceedsShots {
                job_id: job_id.to_string(),
                count: hits,
                shots: self.config.shots,
            });
        }

        Ok(hits as f64 / f64::from(self.config.shots))
    }

    /// Counts of the first configured register present in the output.
    fn anchor_counts<'o>(
        &'o self,
        job_id: &JobId,
        output: &'o SamplerOutput,
    ) -> DatasetResult<(&'o str, &'o Counts)> {
        output
            .first_register(&self.config.registers)
            .ok_or_else(|| DatasetError::MissingRegister {
                job_id: job_id.to_string(),
                candidates: self.config.registers.clone(),
                available: output
                    .register_names()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            })
    }
}
