//! Configuration types for the ingestion pipeline.
//!
//! All file-system paths for a run are derived once, up front, from a run
//! timestamp. Later steps only ever read the resolved paths.

use crate::error::IngestError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Sub-directory of the run artifact dir holding all ingestion outputs.
pub const DATA_INGESTION_DIR: &str = "data_ingestion";
/// Sub-directory holding the full pre-split snapshot.
pub const FEATURE_STORE_DIR: &str = "feature_store";
/// Sub-directory holding the train/test split outputs.
pub const INGESTED_DIR: &str = "ingested";
/// File name of the full snapshot.
pub const FEATURE_STORE_FILE: &str = "phishing_data.csv";
/// File name of the training subset.
pub const TRAIN_FILE: &str = "train.csv";
/// File name of the evaluation subset.
pub const TEST_FILE: &str = "test.csv";

/// Timestamp format used to name run artifact directories.
const RUN_TIMESTAMP_FORMAT: &str = "%m_%d_%Y_%H_%M_%S";

/// Identifies where raw documents live in the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub database: String,
    pub collection: String,
}

impl SourceLocation {
    pub fn new(database: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            collection: collection.into(),
        }
    }
}

/// Resolved configuration for one pipeline run.
///
/// Created once per run and immutable thereafter. All output paths hang off
/// `artifact_dir`, which embeds the run timestamp so distinct runs never
/// share output files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Timestamp token identifying this run.
    pub timestamp: String,
    /// Root directory for this run's artifacts.
    pub artifact_dir: PathBuf,
    /// Full snapshot written before any split.
    pub feature_store_file_path: PathBuf,
    /// Training subset output.
    pub train_file_path: PathBuf,
    /// Evaluation subset output.
    pub test_file_path: PathBuf,
}

impl RunConfig {
    /// Resolve all paths for a run with an explicit timestamp token.
    pub fn new(base_dir: impl AsRef<Path>, timestamp: impl Into<String>) -> Self {
        let timestamp = timestamp.into();
        let artifact_dir = base_dir.as_ref().join(&timestamp);
        let ingestion_dir = artifact_dir.join(DATA_INGESTION_DIR);
        Self {
            feature_store_file_path: ingestion_dir.join(FEATURE_STORE_DIR).join(FEATURE_STORE_FILE),
            train_file_path: ingestion_dir.join(INGESTED_DIR).join(TRAIN_FILE),
            test_file_path: ingestion_dir.join(INGESTED_DIR).join(TEST_FILE),
            artifact_dir,
            timestamp,
        }
    }

    /// Resolve paths for a run stamped with the current local time.
    pub fn for_run(base_dir: impl AsRef<Path>) -> Self {
        let timestamp = chrono::Local::now().format(RUN_TIMESTAMP_FORMAT).to_string();
        Self::new(base_dir, timestamp)
    }

    /// Create every output directory this run will write into.
    ///
    /// Idempotent; existing directories are not an error.
    pub fn ensure_dirs(&self) -> Result<(), IngestError> {
        for file in [
            &self.feature_store_file_path,
            &self.train_file_path,
            &self.test_file_path,
        ] {
            if let Some(parent) = file.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| IngestError::filesystem(parent, e))?;
            }
        }
        Ok(())
    }
}
