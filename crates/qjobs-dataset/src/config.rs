//! Collection settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Device whose coupling graph defines the connection list.
pub const DEFAULT_DEVICE: &str = "ibm_sherbrooke";

/// Native two-qubit gate on Eagle-class devices.
pub const DEFAULT_TWO_QUBIT_GATE: &str = "ecr";

/// Where the submission step caches job mappings.
pub const DEFAULT_INPUT_GLOB: &str = "ran_jobs/*.json";

/// Bitstring the anchor circuit is built to produce.
pub const DEFAULT_EXPECTED_OUTPUT: &str = "1101";

/// Shots per anchor circuit.
pub const DEFAULT_SHOTS: u32 = 8192;

/// CSV written at the end of a run.
pub const DEFAULT_OUTPUT: &str = "jobs_data.csv";

/// Classical-register names to read the anchor counts from, in priority
/// order. Batched circuits name their first register `c_0`; single-register
/// circuits name it `c`.
pub const DEFAULT_REGISTERS: [&str; 2] = ["c_0", "c"];

/// Settings for one collection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Device whose current calibration provides the connection list.
    pub device: String,
    /// Gate type that defines a connection.
    pub two_qubit_gate: String,
    /// Glob pattern matching cached job mappings.
    pub input_glob: String,
    /// Bitstring counted as a correct outcome.
    pub expected_output: String,
    /// Shot count the accuracy is normalised by.
    pub shots: u32,
    /// Register names tried, in order, when reading counts.
    pub registers: Vec<String>,
    /// Destination CSV file.
    pub output: PathBuf,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            device: DEFAULT_DEVICE.to_string(),
            two_qubit_gate: DEFAULT_TWO_QUBIT_GATE.to_string(),
            input_glob: DEFAULT_INPUT_GLOB.to_string(),
            expected_output: DEFAULT_EXPECTED_OUTPUT.to_string(),
            shots: DEFAULT_SHOTS,
            registers: DEFAULT_REGISTERS.iter().map(|s| (*s).to_string()).collect(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl CollectorConfig {
    /// Override the device name.
    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = device.into();
        self
    }

    /// Override the input glob.
    pub fn with_input_glob(mut self, pattern: impl Into<String>) -> Self {
        self.input_glob = pattern.into();
        self
    }

    /// Override the expected bitstring.
    pub fn with_expected_output(mut self, bitstring: impl Into<String>) -> Self {
        self.expected_output = bitstring.into();
        self
    }

    /// Override the shot count.
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// Override the output path.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }
}
