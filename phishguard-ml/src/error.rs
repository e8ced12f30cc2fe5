//! Error types for the phishguard-ml crate.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for ingestion pipeline operations.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Missing or invalid configuration (environment, URI, paths). Never
    /// retried; raised before any network activity.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document store unreachable within the bounded server-selection
    /// timeout.
    #[error("Connectivity error: {0}")]
    Connectivity(String),

    /// Store reachable but the collection yielded zero documents.
    #[error("No data in source: {0}")]
    DataAbsent(String),

    /// The splitter received a dataset with zero rows.
    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    /// Directory creation or file write failure, with the offending path.
    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl IngestError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn connectivity(msg: impl Into<String>) -> Self {
        Self::Connectivity(msg.into())
    }

    pub fn data_absent(msg: impl Into<String>) -> Self {
        Self::DataAbsent(msg.into())
    }

    pub fn empty_dataset(msg: impl Into<String>) -> Self {
        Self::EmptyDataset(msg.into())
    }

    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filesystem_error_carries_path() {
        let err = IngestError::filesystem(
            "/tmp/out/train.csv",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/tmp/out/train.csv"));
    }

    #[test]
    fn test_data_absent_distinct_from_empty_dataset() {
        let absent = IngestError::data_absent("collection is empty");
        let empty = IngestError::empty_dataset("no rows to split");
        assert!(matches!(absent, IngestError::DataAbsent(_)));
        assert!(matches!(empty, IngestError::EmptyDataset(_)));
        assert_ne!(absent.to_string(), empty.to_string());
    }
}
