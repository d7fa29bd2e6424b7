//! Device calibration snapshots.
//!
//! A [`Calibration`] is a point-in-time set of error-rate measurements for a
//! device. The layout follows the service's `properties` document: a list of
//! per-qubit measurement lists, and a list of gate entries each carrying its
//! operand qubits and calibrated parameters.
//!
//! ```text
//!   qubits[q] = [ {name: "T1", ...}, {name: "readout_error", value: 0.012}, ... ]
//!   gates[i]  = { gate: "ecr", name: "ecr1_0", qubits: [1, 0],
//!                 parameters: [ {name: "gate_error", value: 0.007}, ... ] }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{HalError, HalResult};

/// Property name the service uses for measurement assignment error.
pub const READOUT_ERROR: &str = "readout_error";

/// A single calibrated value: name, date, unit, value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nduv {
    /// Property name (e.g. `T1`, `readout_error`, `gate_error`).
    pub name: String,
    /// Calibrated value.
    pub value: f64,
    /// Unit, empty for dimensionless rates.
    #[serde(default)]
    pub unit: Option<String>,
    /// When the value was measured.
    #[serde(default)]
    pub date: Option<String>,
}

impl Nduv {
    /// Create a dimensionless value with no timestamp.
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            unit: None,
            date: None,
        }
    }
}

/// Calibration entry for one gate instance on the device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateProperties {
    /// Operand qubits, in the order the gate is applied.
    pub qubits: Vec<u32>,
    /// Gate type (e.g. `ecr`, `sx`).
    pub gate: String,
    /// Instance name, unique per device (e.g. `ecr1_0`).
    pub name: String,
    /// Calibrated parameters; the first is the gate error on IBM devices.
    #[serde(default)]
    pub parameters: Vec<Nduv>,
}

impl GateProperties {
    /// Endpoints of a two-qubit gate, `None` for any other arity.
    pub fn endpoints(&self) -> Option<(u32, u32)> {
        match self.qubits.as_slice() {
            [a, b] => Some((*a, *b)),
            _ => None,
        }
    }

    /// First calibrated parameter.
    pub fn first_parameter(&self) -> Option<&Nduv> {
        self.parameters.first()
    }

    /// True when both endpoints of this gate are in `qubits`.
    pub fn spans(&self, qubits: &[u32]) -> bool {
        self.endpoints()
            .is_some_and(|(a, b)| qubits.contains(&a) && qubits.contains(&b))
    }
}

/// Point-in-time calibration data for a device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Device name.
    #[serde(default)]
    pub backend_name: String,
    /// When the snapshot was last refreshed by the service.
    #[serde(default)]
    pub last_update_date: Option<String>,
    /// Per-qubit measurements, indexed by physical qubit.
    #[serde(default)]
    pub qubits: Vec<Vec<Nduv>>,
    /// Per-gate measurements.
    #[serde(default)]
    pub gates: Vec<GateProperties>,
}

impl Calibration {
    /// All gate instances of the given type, in snapshot order.
    pub fn gates_of_type(&self, gate: &str) -> Vec<GateProperties> {
        self.gates
            .iter()
            .filter(|g| g.gate == gate)
            .cloned()
            .collect()
    }

    /// Look up a named property of a physical qubit.
    pub fn qubit_property(&self, qubit: u32, property: &str) -> HalResult<f64> {
        self.qubits
            .get(qubit as usize)
            .and_then(|props| props.iter().find(|p| p.name == property))
            .map(|p| p.value)
            .ok_or_else(|| HalError::MissingCalibration {
                qubit,
                property: property.to_string(),
            })
    }

    /// Readout (measurement assignment) error of a physical qubit.
    pub fn readout_error(&self, qubit: u32) -> HalResult<f64> {
        self.qubit_property(qubit, READOUT_ERROR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Calibration {
        serde_json::from_str(
            r#"{
                "backend_name": "ibm_sherbrooke",
                "backend_version": "1.6.9",
                "last_update_date": "2024-11-04T08:12:44+00:00",
                "qubits": [
                    [{"name": "T1", "unit": "us", "value": 231.2, "date": "2024-11-04T07:00:00+00:00"},
                     {"name": "readout_error", "unit": "", "value": 0.0123}],
                    [{"name": "readout_error", "unit": "", "value": 0.0311}]
                ],
                "gates": [
                    {"qubits": [0], "gate": "sx", "name": "sx0",
                     "parameters": [{"name": "gate_error", "unit": "", "value": 0.0002}]},
                    {"qubits": [1, 0], "gate": "ecr", "name": "ecr1_0",
                     "parameters": [{"name": "gate_error", "unit": "", "value": 0.0071},
                                    {"name": "gate_length", "unit": "ns", "value": 533.3}]}
                ],
                "general": []
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_deserialize_properties_document() {
        let cal = snapshot();
        assert_eq!(cal.backend_name, "ibm_sherbrooke");
        assert_eq!(cal.qubits.len(), 2);
        assert_eq!(cal.gates.len(), 2);
    }

    #[test]
    fn test_readout_error_lookup() {
        let cal = snapshot();
        assert!((cal.readout_error(0).unwrap() - 0.0123).abs() < 1e-12);
        assert!((cal.readout_error(1).unwrap() - 0.0311).abs() < 1e-12);
    }

    #[test]
    fn test_readout_error_missing_qubit() {
        let err = snapshot().readout_error(42).unwrap_err();
        assert!(matches!(err, HalError::MissingCalibration { qubit: 42, .. }));
    }

    #[test]
    fn test_gates_of_type_filters() {
        let ecr = snapshot().gates_of_type("ecr");
        assert_eq!(ecr.len(), 1);
        assert_eq!(ecr[0].name, "ecr1_0");
        assert_eq!(ecr[0].endpoints(), Some((1, 0)));
        assert!((ecr[0].first_parameter().unwrap().value - 0.0071).abs() < 1e-12);
    }

    #[test]
    fn test_spans_requires_both_endpoints() {
        let gate = snapshot().gates_of_type("ecr").remove(0);
        assert!(gate.spans(&[0, 1, 2]));
        assert!(!gate.spans(&[0, 2, 3]));

        let single = &snapshot().gates[0];
        assert!(!single.spans(&[0, 1]));
    }
}
