//! Ingestion orchestrator: source → feature store → split → artifact.

use crate::config::RunConfig;
use crate::data::DocumentSource;
use crate::error::IngestError;
use crate::ingest::feature_store::FeatureStoreWriter;
use crate::ingest::split::TrainTestSplitter;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Handoff object to downstream pipeline stages: where the split files live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionArtifact {
    pub trained_file_path: PathBuf,
    pub test_file_path: PathBuf,
}

/// Stages of one ingestion run, in execution order. Any stage failing aborts
/// the run; a failed run is re-invoked from the start, never resumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionStage {
    FetchingSource,
    PersistingSnapshot,
    Splitting,
    Done,
}

/// Sequences the ingestion steps for one run.
///
/// Steps execute strictly in order, each completing all of its I/O before the
/// next begins. Errors propagate unmodified; the artifact is constructed only
/// after every step has succeeded. Output files written before a failing step
/// are left on disk.
pub struct IngestionPipeline<S> {
    config: RunConfig,
    source: S,
    splitter: TrainTestSplitter,
}

impl<S: DocumentSource> IngestionPipeline<S> {
    pub fn new(config: RunConfig, source: S) -> Self {
        Self {
            config,
            source,
            splitter: TrainTestSplitter::default(),
        }
    }

    /// Run the full ingestion sequence and return the artifact.
    pub async fn run(&self) -> Result<IngestionArtifact, IngestError> {
        let info = self.source.source_info();
        tracing::info!(
            stage = ?IngestionStage::FetchingSource,
            source = %info.location,
            run = %self.config.timestamp,
            "starting data ingestion"
        );
        let dataset = self.source.fetch_all().await?;
        // Reader postcondition, re-checked here so it holds for any source
        // implementation, not just the MongoDB reader.
        if dataset.is_empty() {
            return Err(IngestError::data_absent(format!(
                "source '{}' returned zero rows; populate it before running ingestion",
                info.location
            )));
        }

        tracing::info!(
            stage = ?IngestionStage::PersistingSnapshot,
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "persisting feature store snapshot"
        );
        let writer = FeatureStoreWriter::new(&self.config.feature_store_file_path);
        writer.export(&dataset)?;

        tracing::info!(stage = ?IngestionStage::Splitting, "splitting into train and test sets");
        self.splitter.split_and_write(
            &dataset,
            &self.config.train_file_path,
            &self.config.test_file_path,
        )?;

        let artifact = IngestionArtifact {
            trained_file_path: self.config.train_file_path.clone(),
            test_file_path: self.config.test_file_path.clone(),
        };
        tracing::info!(stage = ?IngestionStage::Done, "data ingestion completed");
        Ok(artifact)
    }
}

/// Entry point for external callers: run one ingestion over the given source.
pub async fn run_ingestion<S: DocumentSource>(
    config: RunConfig,
    source: S,
) -> Result<IngestionArtifact, IngestError> {
    IngestionPipeline::new(config, source).run().await
}
