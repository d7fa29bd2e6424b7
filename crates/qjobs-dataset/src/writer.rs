//! CSV export of augmented jobs.
//!
//! Every record is validated into a [`FeatureRow`] before the output file is
//! opened, so a malformed record leaves any previous file untouched.

use std::fs::File;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::error::{DatasetError, DatasetResult};
use crate::record::AugmentedJob;
use crate::validate::FeatureRow;

/// Column names, in output order.
pub const HEADER: [&str; 22] = [
    "job_id",
    "num_circuits",
    "padding",
    "qubit_0",
    "qubit_1",
    "qubit_2",
    "qubit_3",
    "qubit_4",
    "qubit_0_quality",
    "qubit_1_quality",
    "qubit_2_quality",
    "qubit_3_quality",
    "qubit_4_quality",
    "gate_0",
    "gate_1",
    "gate_2",
    "gate_3",
    "gate_0_quality",
    "gate_1_quality",
    "gate_2_quality",
    "gate_3_quality",
    "accuracy",
];

#[derive(Serialize)]
struct CsvRow<'a> {
    job_id: &'a str,
    num_circuits: u32,
    padding: i64,
    qubit_0: u32,
    qubit_1: u32,
    qubit_2: u32,
    qubit_3: u32,
    qubit_4: u32,
    qubit_0_quality: f64,
    qubit_1_quality: f64,
    qubit_2_quality: f64,
    qubit_3_quality: f64,
    qubit_4_quality: f64,
    gate_0: &'a str,
    gate_1: &'a str,
    gate_2: &'a str,
    gate_3: &'a str,
    gate_0_quality: f64,
    gate_1_quality: f64,
    gate_2_quality: f64,
    gate_3_quality: f64,
    accuracy: f64,
}

impl<'a> From<&'a FeatureRow> for CsvRow<'a> {
    fn from(row: &'a FeatureRow) -> Self {
        let [qubit_0, qubit_1, qubit_2, qubit_3, qubit_4] = row.qubits;
        let [
            qubit_0_quality,
            qubit_1_quality,
            qubit_2_quality,
            qubit_3_quality,
            qubit_4_quality,
        ] = row.qubit_qualities;
        let [gate_0, gate_1, gate_2, gate_3] = &row.gates;
        let [gate_0_quality, gate_1_quality, gate_2_quality, gate_3_quality] = row.gate_qualities;

        Self {
            job_id: &row.job_id,
            num_circuits: row.register_count,
            padding: row.padding,
            qubit_0,
            qubit_1,
            qubit_2,
            qubit_3,
            qubit_4,
            qubit_0_quality,
            qubit_1_quality,
            qubit_2_quality,
            qubit_3_quality,
            qubit_4_quality,
            gate_0,
            gate_1,
            gate_2,
            gate_3,
            gate_0_quality,
            gate_1_quality,
            gate_2_quality,
            gate_3_quality,
            accuracy: row.accuracy,
        }
    }
}

/// Validate every record against the fixed schema.
pub fn feature_rows(records: &[AugmentedJob]) -> DatasetResult<Vec<FeatureRow>> {
    records
        .iter()
        .map(|record| FeatureRow::try_from(record).map_err(DatasetError::from))
        .collect()
}

/// Write the header and one line per row.
pub fn write_rows<W: io::Write>(rows: &[FeatureRow], writer: W) -> DatasetResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(HEADER)?;
    for row in rows {
        wtr.serialize(CsvRow::from(row))?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Validate `records` and write them to `path`, replacing any existing file.
///
/// Returns the number of data rows written.
pub fn write_csv(records: &[AugmentedJob], path: &Path) -> DatasetResult<usize> {
    let rows = feature_rows(records)?;

    let file = File::create(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_rows(&rows, file)?;

    tracing::info!(path = %path.display(), rows = rows.len(), "wrote job dataset");
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{GateQuality, QubitQuality};
    use qjobs_hal::JobId;

    fn record(id: &str, gates: usize) -> AugmentedJob {
        let qubits = vec![37, 38, 39, 40, 41];
        AugmentedJob {
            id: JobId::new(id),
            register_count: 3,
            padding: 2,
            qubit_qualities: qubits
                .iter()
                .map(|&qubit| QubitQuality {
                    qubit,
                    readout_error: 0.0125,
                })
                .collect(),
            physical_qubits: qubits,
            accuracy: 0.5,
            gate_qualities: (0..gates)
                .map(|i| GateQuality {
                    name: format!("ecr{}_{}", 37 + i, 38 + i),
                    error: 0.0075,
                })
                .collect(),
        }
    }

    fn render(records: &[AugmentedJob]) -> DatasetResult<String> {
        let rows = feature_rows(records)?;
        let mut buf = Vec::new();
        write_rows(&rows, &mut buf)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_header_has_22_columns() {
        let out = render(&[]).unwrap();
        let header = out.lines().next().unwrap();
        assert_eq!(header.split(',').count(), 22);
        assert!(header.starts_with("job_id,num_circuits,padding,qubit_0"));
        assert!(header.ends_with("gate_3_quality,accuracy"));
    }

    #[test]
    fn test_row_layout() {
        let out = render(&[record("job-a", 4)]).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "job-a,3,2,37,38,39,40,41,0.0125,0.0125,0.0125,0.0125,0.0125,\
             ecr37_38,ecr38_39,ecr39_40,ecr40_41,0.0075,0.0075,0.0075,0.0075,0.5"
        );
    }

    #[test]
    fn test_small_values_use_shortest_round_trip_form() {
        let mut r = record("job-a", 4);
        r.qubit_qualities[0].readout_error = 0.00001;
        r.gate_qualities[0].error = 0.0000015;

        let out = render(&[r]).unwrap();
        let fields: Vec<_> = out.lines().nth(1).unwrap().split(',').collect();
        assert_eq!(fields[8], "0.00001");
        assert_eq!(fields[17], "1.5e-6");
    }

    #[test]
    fn test_shape_error_blocks_whole_write() {
        let err = render(&[record("good", 4), record("bad", 3)]).unwrap_err();
        assert!(matches!(err, DatasetError::Shape(_)));
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn test_write_csv_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs_data.csv");
        std::fs::write(&path, "stale contents that are longer than the new file\n".repeat(50))
            .unwrap();

        let written = write_csv(&[record("job-a", 4)], &path).unwrap();
        assert_eq!(written, 1);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("stale"));
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn test_failed_validation_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs_data.csv");
        std::fs::write(&path, "previous\n").unwrap();

        assert!(write_csv(&[record("bad", 5)], &path).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous\n");
    }
}
