//! Fixed-shape feature rows.
//!
//! The CSV schema has room for exactly 5 anchor qubits and exactly 4
//! anchor connections. [`FeatureRow::try_from`] checks an [`AugmentedJob`]
//! against that shape so a malformed record surfaces as a [`ShapeError`]
//! naming the job and the field, before anything is written.

use thiserror::Error;

use crate::mapping::ANCHOR_QUBITS;
use crate::record::AugmentedJob;

/// Connections between the 5 anchor qubits on a heavy-hex device.
pub const ANCHOR_GATES: usize = 4;

/// A record that does not fit the fixed schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// Wrong number of entries in a feature list.
    #[error("Job {job_id}: expected {expected} {field}, found {found}")]
    Count {
        /// Job identifier.
        job_id: String,
        /// Which list.
        field: &'static str,
        /// Entries the schema needs.
        expected: usize,
        /// Entries the record has.
        found: usize,
    },

    /// The anchor maps two logical qubits to the same physical qubit.
    #[error("Job {job_id}: physical qubit {qubit} is used more than once")]
    DuplicateQubit {
        /// Job identifier.
        job_id: String,
        /// Repeated physical qubit.
        qubit: u32,
    },

    /// Accuracy outside [0, 1].
    #[error("Job {job_id}: accuracy {accuracy} is outside [0, 1]")]
    AccuracyOutOfRange {
        /// Job identifier.
        job_id: String,
        /// Offending value.
        accuracy: String,
    },
}

/// An [`AugmentedJob`] proven to fit the CSV schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub job_id: String,
    pub register_count: u32,
    pub padding: i64,
    pub qubits: [u32; ANCHOR_QUBITS],
    pub qubit_qualities: [f64; ANCHOR_QUBITS],
    pub gates: [String; ANCHOR_GATES],
    pub gate_qualities: [f64; ANCHOR_GATES],
    pub accuracy: f64,
}

fn exactly<T, const N: usize>(
    job_id: &str,
    field: &'static str,
    items: Vec<T>,
) -> Result<[T; N], ShapeError> {
    let found = items.len();
    items.try_into().map_err(|_| ShapeError::Count {
        job_id: job_id.to_string(),
        field,
        expected: N,
        found,
    })
}

impl TryFrom<&AugmentedJob> for FeatureRow {
    type Error = ShapeError;

    fn try_from(job: &AugmentedJob) -> Result<Self, Self::Error> {
        let job_id = job.id.to_string();

        let qubits: [u32; ANCHOR_QUBITS] =
            exactly(&job_id, "physical qubits", job.physical_qubits.clone())?;
        for (i, qubit) in qubits.iter().enumerate() {
            if qubits[..i].contains(qubit) {
                return Err(ShapeError::DuplicateQubit {
                    job_id,
                    qubit: *qubit,
                });
            }
        }

        let qubit_qualities = exactly(
            &job_id,
            "qubit qualities",
            job.qubit_qualities.iter().map(|q| q.readout_error).collect(),
        )?;
        let gates = exactly(
            &job_id,
            "gate qualities",
            job.gate_qualities.iter().map(|g| g.name.clone()).collect(),
        )?;
        let gate_qualities = exactly(
            &job_id,
            "gate qualities",
            job.gate_qualities.iter().map(|g| g.error).collect(),
        )?;

        if !(0.0..=1.0).contains(&job.accuracy) {
            return Err(ShapeError::AccuracyOutOfRange {
                job_id,
                accuracy: job.accuracy.to_string(),
            });
        }

        Ok(Self {
            job_id,
            register_count: job.register_count,
            padding: job.padding,
            qubits,
            qubit_qualities,
            gates,
            gate_qualities,
            accuracy: job.accuracy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{GateQuality, QubitQuality};
    use qjobs_hal::JobId;

    fn job(qubits: &[u32], gates: usize) -> AugmentedJob {
        AugmentedJob {
            id: JobId::new("job-7"),
            register_count: 3,
            padding: 1,
            physical_qubits: qubits.to_vec(),
            accuracy: 0.75,
            qubit_qualities: qubits
                .iter()
                .map(|&qubit| QubitQuality {
                    qubit,
                    readout_error: 0.01,
                })
                .collect(),
            gate_qualities: (0..gates)
                .map(|i| GateQuality {
                    name: format!("ecr{i}"),
                    error: 0.005,
                })
                .collect(),
        }
    }

    #[test]
    fn test_valid_job_converts() {
        let row = FeatureRow::try_from(&job(&[1, 2, 3, 4, 5], 4)).unwrap();
        assert_eq!(row.qubits, [1, 2, 3, 4, 5]);
        assert_eq!(row.gates[3], "ecr3");
        assert_eq!(row.job_id, "job-7");
    }

    #[test]
    fn test_three_gates_rejected() {
        let err = FeatureRow::try_from(&job(&[1, 2, 3, 4, 5], 3)).unwrap_err();
        assert_eq!(
            err,
            ShapeError::Count {
                job_id: "job-7".into(),
                field: "gate qualities",
                expected: 4,
                found: 3,
            }
        );
    }

    #[test]
    fn test_five_gates_rejected() {
        let err = FeatureRow::try_from(&job(&[1, 2, 3, 4, 5], 5)).unwrap_err();
        assert!(matches!(err, ShapeError::Count { found: 5, .. }));
    }

    #[test]
    fn test_four_qubits_rejected() {
        let err = FeatureRow::try_from(&job(&[1, 2, 3, 4], 4)).unwrap_err();
        assert!(matches!(
            err,
            ShapeError::Count {
                field: "physical qubits",
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_physical_qubit_rejected() {
        let err = FeatureRow::try_from(&job(&[1, 2, 3, 2, 5], 4)).unwrap_err();
        assert!(matches!(err, ShapeError::DuplicateQubit { qubit: 2, .. }));
    }

    #[test]
    fn test_accuracy_out_of_range_rejected() {
        let mut bad = job(&[1, 2, 3, 4, 5], 4);
        bad.accuracy = 1.5;
        assert!(matches!(
            FeatureRow::try_from(&bad),
            Err(ShapeError::AccuracyOutOfRange { .. })
        ));
    }
}
