//! Training data from completed quantum jobs.
//!
//! Turns cached job mappings into one CSV row per completed job:
//!
//! ```text
//!   ran_jobs/*.json ──→ Collector ──→ Vec<AugmentedJob> ──→ write_csv ──→ jobs_data.csv
//!                          │
//!                          └── QuantumService (device calibration, job status/results)
//! ```
//!
//! Each row describes where the 5-qubit anchor circuit was placed, how noisy
//! those qubits and their 4 connecting gates were, and what fraction of shots
//! produced the expected bitstring.
//!
//! # Example
//!
//! ```ignore
//! use qjobs_dataset::{Collector, CollectorConfig, write_csv};
//!
//! let config = CollectorConfig::default();
//! let collector = Collector::connect(&service, config.clone()).await?;
//! let collection = collector.collect().await?;
//! write_csv(&collection.records, &config.output)?;
//! ```

pub mod collector;
pub mod config;
pub mod error;
pub mod mapping;
pub mod record;
pub mod validate;
pub mod writer;

pub use collector::{Collection, Collector};
pub use config::CollectorConfig;
pub use error::{DatasetError, DatasetResult};
pub use mapping::{ANCHOR_QUBITS, JobMapping};
pub use record::{AugmentedJob, GateQuality, QubitQuality};
pub use validate::{ANCHOR_GATES, FeatureRow, ShapeError};
pub use writer::{HEADER, feature_rows, write_csv, write_rows};
