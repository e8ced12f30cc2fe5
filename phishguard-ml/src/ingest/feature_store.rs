//! Durable full-dataset snapshot written before any split.

use crate::data::Dataset;
use crate::error::IngestError;
use std::path::PathBuf;

/// Writes the fetched dataset to the feature store file.
///
/// This step is a durability checkpoint, not a transformation: it borrows the
/// dataset and leaves the in-memory data untouched for downstream steps.
pub struct FeatureStoreWriter {
    path: PathBuf,
}

impl FeatureStoreWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Persist the full dataset as CSV with a header row, overwriting any
    /// existing file at the configured path.
    pub fn export(&self, dataset: &Dataset) -> Result<(), IngestError> {
        dataset.write_csv(&self.path)?;
        tracing::info!(
            rows = dataset.row_count(),
            path = %self.path.display(),
            "exported dataset to feature store"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_export_writes_header_and_all_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feature_store").join("snapshot.csv");
        let dataset = Dataset::new(
            vec!["url".into(), "label".into()],
            vec![
                vec![json!("a.example"), json!(1)],
                vec![json!("b.example"), json!(0)],
            ],
        );
        let writer = FeatureStoreWriter::new(&path);
        writer.export(&dataset).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert_eq!(content.lines().next().unwrap(), "url,label");
        // Snapshot leaves the in-memory dataset untouched.
        assert_eq!(dataset.row_count(), 2);
    }
}
