//! Document source abstraction and the MongoDB-backed reader.

use crate::config::SourceLocation;
use crate::data::dataset::{Dataset, SOURCE_ID_COLUMN};
use crate::error::IngestError;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Client;
use mongodb::bson::{Document, doc};
use mongodb::options::ClientOptions;
use serde_json::Value;
use std::time::Duration;

/// Bound on how long connection establishment may block before the run fails
/// with a connectivity error instead of hanging.
pub const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Metadata about a source, for logging and lineage.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SourceInfo {
    pub source_type: String,
    pub location: String,
    pub accessed_at: chrono::DateTime<chrono::Utc>,
}

/// A store of raw key-value documents the pipeline can drain.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch every document in the source as a dataset, with the synthetic
    /// identifier column stripped and `"NaN"` tokens canonicalized to null.
    async fn fetch_all(&self) -> Result<Dataset, IngestError>;

    /// Return metadata about this source for logging.
    fn source_info(&self) -> SourceInfo;
}

/// MongoDB-backed document source.
///
/// The connection URI is injected explicitly; this type never reads the
/// process environment. Connections are opened fresh per fetch and not
/// pooled across runs.
pub struct MongoSource {
    uri: String,
    location: SourceLocation,
}

impl MongoSource {
    /// Create a source for the given collection.
    ///
    /// Fails fast with a configuration error if the URI is empty, before any
    /// network activity.
    pub fn new(uri: impl Into<String>, location: SourceLocation) -> Result<Self, IngestError> {
        let uri = uri.into();
        if uri.trim().is_empty() {
            return Err(IngestError::config(
                "document store URI is not set; provide a MongoDB connection string \
                 (e.g. via the MONGODB_URI environment variable)",
            ));
        }
        Ok(Self { uri, location })
    }
}

#[async_trait]
impl DocumentSource for MongoSource {
    async fn fetch_all(&self) -> Result<Dataset, IngestError> {
        let mut options = ClientOptions::parse(&self.uri).await.map_err(|e| {
            IngestError::config(format!("invalid document store URI: {e}"))
        })?;
        options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
        let client = Client::with_options(options)
            .map_err(|e| IngestError::connectivity(format!("failed to build client: {e}")))?;
        let collection = client
            .database(&self.location.database)
            .collection::<Document>(&self.location.collection);

        let mut cursor = collection.find(doc! {}).await.map_err(|e| {
            IngestError::connectivity(format!(
                "failed to query collection '{}' in database '{}': {e}",
                self.location.collection, self.location.database
            ))
        })?;
        let mut documents = Vec::new();
        while let Some(document) = cursor.try_next().await.map_err(|e| {
            IngestError::connectivity(format!(
                "lost connection while draining collection '{}': {e}",
                self.location.collection
            ))
        })? {
            if let Value::Object(map) = serde_json::to_value(document)? {
                documents.push(map);
            }
        }

        if documents.is_empty() {
            return Err(IngestError::data_absent(format!(
                "no documents found in collection '{}' in database '{}'; \
                 populate the collection with the bulk loader before running ingestion",
                self.location.collection, self.location.database
            )));
        }
        tracing::info!(
            count = documents.len(),
            collection = %self.location.collection,
            "fetched documents from document store"
        );

        let mut dataset = Dataset::from_documents(documents);
        dataset.drop_column(SOURCE_ID_COLUMN);
        dataset.normalize_nan_tokens();
        Ok(dataset)
    }

    fn source_info(&self) -> SourceInfo {
        SourceInfo {
            source_type: "mongodb".to_string(),
            location: format!("{}/{}", self.location.database, self.location.collection),
            accessed_at: chrono::Utc::now(),
        }
    }
}
