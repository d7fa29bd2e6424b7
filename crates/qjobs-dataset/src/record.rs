//! Job records augmented with measured and calibrated features.

use serde::{Deserialize, Serialize};

use qjobs_hal::JobId;

/// Readout quality of one physical qubit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QubitQuality {
    /// Physical qubit index.
    pub qubit: u32,
    /// Readout error at the time the job ran.
    pub readout_error: f64,
}

/// Calibrated error of one two-qubit connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateQuality {
    /// Gate instance name (e.g. `ecr37_38`).
    pub name: String,
    /// First calibration parameter of the gate (its error rate).
    pub error: f64,
}

/// A cached job mapping plus the features derived for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentedJob {
    /// Job identifier.
    pub id: JobId,
    /// Number of circuit variants in the batch.
    pub register_count: u32,
    /// Circuit-construction parameter from the mapping.
    pub padding: i64,
    /// Physical qubits of the anchor circuit, logical order.
    pub physical_qubits: Vec<u32>,
    /// Fraction of shots that produced the expected bitstring.
    pub accuracy: f64,
    /// Readout error per anchor qubit, in `physical_qubits` order.
    pub qubit_qualities: Vec<QubitQuality>,
    /// Connections inside the anchor, in connection-list order.
    pub gate_qualities: Vec<GateQuality>,
}

impl AugmentedJob {
    /// Record a gate quality; a repeated gate name keeps its position and
    /// takes the newer value.
    pub fn set_gate_quality(&mut self, name: &str, error: f64) {
        if let Some(existing) = self.gate_qualities.iter_mut().find(|g| g.name == name) {
            existing.error = error;
        } else {
            self.gate_qualities.push(GateQuality {
                name: name.to_string(),
                error,
            });
        }
    }
}
