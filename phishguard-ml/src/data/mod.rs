//! Dataset model and document source readers.

pub mod dataset;
pub mod source;

pub use dataset::{Dataset, SOURCE_ID_COLUMN};
pub use source::{DocumentSource, MongoSource, SERVER_SELECTION_TIMEOUT, SourceInfo};
