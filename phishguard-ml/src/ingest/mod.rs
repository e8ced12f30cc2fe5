//! Ingestion pipeline steps and orchestration.

pub mod feature_store;
pub mod pipeline;
pub mod split;

pub use feature_store::FeatureStoreWriter;
pub use pipeline::{IngestionArtifact, IngestionPipeline, IngestionStage, run_ingestion};
pub use split::{SPLIT_SEED, TEST_FRACTION, TrainTestSplitter};
