//! # phishguard-ml — Data Ingestion Pipeline
//!
//! Ingests raw phishing-URL records from a MongoDB collection, persists the
//! full dataset as a durable feature-store snapshot, and partitions it into
//! deterministic train/test CSV files for downstream model training.
//!
//! One run is one invocation of [`run_ingestion`]: fetch everything from the
//! source, checkpoint it, split it, and hand back an [`IngestionArtifact`]
//! naming the two output files. Steps run strictly in sequence; any failure
//! aborts the run.

pub mod config;
pub mod data;
pub mod error;
pub mod ingest;

pub use config::{RunConfig, SourceLocation};
pub use data::{Dataset, DocumentSource, MongoSource, SourceInfo};
pub use error::IngestError;
pub use ingest::{IngestionArtifact, IngestionPipeline, TrainTestSplitter, run_ingestion};
