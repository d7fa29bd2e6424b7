//! Cached job mappings written by the submission step.
//!
//! Each file looks like:
//!
//! ```json
//! {
//!   "id": "cw3t0ywggr6g0087j4h0",
//!   "mapping": {"0": 37, "1": 38, "2": 39, "3": 40, "4": 41, "5": 52},
//!   "register_count": 3,
//!   "padding": 2
//! }
//! ```
//!
//! Logical qubits 0-4 form the anchor circuit; their placement is what the
//! dataset describes.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use qjobs_hal::JobId;

use crate::error::{DatasetError, DatasetResult};

/// Number of logical qubits in the anchor circuit.
pub const ANCHOR_QUBITS: usize = 5;

/// One cached job mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMapping {
    /// Job identifier on the remote service.
    pub id: JobId,
    /// Logical qubit index (as string) to physical qubit index.
    pub mapping: HashMap<String, u32>,
    /// Number of circuit variants run as one batch.
    pub register_count: u32,
    /// Circuit-construction parameter, carried through unchanged.
    pub padding: i64,
}

impl JobMapping {
    /// Read and parse a mapping file.
    pub fn load(path: &Path) -> DatasetResult<Self> {
        let source = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&source).map_err(|source| DatasetError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Physical qubits of the anchor circuit, ordered by logical index 0..4.
    ///
    /// Every mapping key must be a non-negative integer, and no two keys may
    /// name the same logical qubit. Logical qubits at index 5 and above are
    /// otherwise ignored.
    pub fn anchor_qubits(&self) -> DatasetResult<[u32; ANCHOR_QUBITS]> {
        let mut anchor = [None; ANCHOR_QUBITS];
        let mut seen: HashMap<usize, &str> = HashMap::with_capacity(self.mapping.len());

        for (key, &physical) in &self.mapping {
            let logical: usize =
                key.trim()
                    .parse()
                    .map_err(|_| DatasetError::InvalidLogicalIndex {
                        job_id: self.id.to_string(),
                        key: key.clone(),
                    })?;

            if let Some(other) = seen.insert(logical, key) {
                let (first, second) = if other < key.as_str() {
                    (other, key.as_str())
                } else {
                    (key.as_str(), other)
                };
                return Err(DatasetError::DuplicateLogicalIndex {
                    job_id: self.id.to_string(),
                    logical,
                    first: first.to_string(),
                    second: second.to_string(),
                });
            }

            if let Some(slot) = anchor.get_mut(logical) {
                *slot = Some(physical);
            }
        }

        let mut qubits = [0u32; ANCHOR_QUBITS];
        for (logical, slot) in anchor.iter().enumerate() {
            match slot {
                Some(physical) => qubits[logical] = *physical,
                None => {
                    let found = anchor
                        .iter()
                        .enumerate()
                        .filter_map(|(i, s)| s.map(|_| i))
                        .collect();
                    return Err(DatasetError::InsufficientAnchorQubits {
                        job_id: self.id.to_string(),
                        found,
                    });
                }
            }
        }
        Ok(qubits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn mapping(pairs: &[(&str, u32)]) -> JobMapping {
        JobMapping {
            id: JobId::new("job-1"),
            mapping: pairs.iter().map(|(k, v)| ((*k).to_string(), *v)).collect(),
            register_count: 2,
            padding: 0,
        }
    }

    #[test]
    fn test_anchor_qubits_ordered_by_logical_index() {
        let m = mapping(&[
            ("4", 44),
            ("7", 70),
            ("0", 10),
            ("2", 22),
            ("1", 11),
            ("3", 33),
        ]);
        assert_eq!(m.anchor_qubits().unwrap(), [10, 11, 22, 33, 44]);
    }

    #[test]
    fn test_anchor_qubits_missing_logical() {
        let m = mapping(&[("0", 1), ("1", 2), ("2", 3), ("3", 4), ("5", 6)]);
        let err = m.anchor_qubits().unwrap_err();
        match err {
            DatasetError::InsufficientAnchorQubits { found, .. } => {
                assert_eq!(found, vec![0, 1, 2, 3]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_anchor_qubits_rejects_non_numeric_key() {
        let m = mapping(&[("0", 1), ("q1", 2)]);
        assert!(matches!(
            m.anchor_qubits(),
            Err(DatasetError::InvalidLogicalIndex { key, .. }) if key == "q1"
        ));
    }

    #[test]
    fn test_anchor_qubits_rejects_aliased_keys() {
        let m = mapping(&[
            ("0", 10),
            ("00", 99),
            ("1", 11),
            ("2", 12),
            ("3", 13),
            ("4", 14),
        ]);
        match m.anchor_qubits().unwrap_err() {
            DatasetError::DuplicateLogicalIndex {
                logical,
                first,
                second,
                ..
            } => {
                assert_eq!(logical, 0);
                assert_eq!((first.as_str(), second.as_str()), ("0", "00"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_anchor_qubits_rejects_aliased_keys_above_anchor() {
        let m = mapping(&[
            ("0", 10),
            ("1", 11),
            ("2", 12),
            ("3", 13),
            ("4", 14),
            ("7", 70),
            (" 7", 71),
        ]);
        assert!(matches!(
            m.anchor_qubits(),
            Err(DatasetError::DuplicateLogicalIndex { logical: 7, .. })
        ));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"id": "cw3t0", "mapping": {{"0": 5, "1": 6, "2": 7, "3": 8, "4": 9}},
                "register_count": 3, "padding": 1, "extra": true}}"#
        )
        .unwrap();

        let m = JobMapping::load(file.path()).unwrap();
        assert_eq!(m.id, JobId::new("cw3t0"));
        assert_eq!(m.register_count, 3);
        assert_eq!(m.padding, 1);
        assert_eq!(m.anchor_qubits().unwrap(), [5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"id": "cw3t0", "mapping": "#).unwrap();
        assert!(matches!(
            JobMapping::load(file.path()),
            Err(DatasetError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = JobMapping::load(Path::new("/nonexistent/ran_jobs/x.json")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
