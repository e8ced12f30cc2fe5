//! Deterministic train/test partitioning.

use crate::data::Dataset;
use crate::error::IngestError;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::path::Path;

/// Fixed seed for the split shuffle. Runs over the same input ordering must
/// produce identical partitions, so experiments stay comparable.
pub const SPLIT_SEED: u64 = 42;

/// Fraction of rows held out for evaluation.
pub const TEST_FRACTION: f64 = 0.2;

/// Partitions a dataset into train and test subsets with a seeded shuffle.
#[derive(Debug, Clone)]
pub struct TrainTestSplitter {
    pub seed: u64,
    pub test_fraction: f64,
}

impl Default for TrainTestSplitter {
    fn default() -> Self {
        Self {
            seed: SPLIT_SEED,
            test_fraction: TEST_FRACTION,
        }
    }
}

impl TrainTestSplitter {
    /// Split a non-empty dataset into `(train, test)`.
    ///
    /// Row indices are shuffled with the fixed seed; the test subset takes
    /// `ceil(n * test_fraction)` rows and train takes the rest. Row order
    /// within each subset follows the shuffle, not the source order.
    pub fn split(&self, dataset: &Dataset) -> Result<(Dataset, Dataset), IngestError> {
        if dataset.is_empty() {
            return Err(IngestError::empty_dataset(
                "cannot split a dataset with zero rows; check that the source collection has data",
            ));
        }
        let n = dataset.row_count();
        let mut indices: Vec<usize> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(self.seed);
        indices.shuffle(&mut rng);

        let test_len = ((n as f64) * self.test_fraction).ceil() as usize;
        let (train_idx, test_idx) = indices.split_at(n - test_len);
        Ok((dataset.select_rows(train_idx), dataset.select_rows(test_idx)))
    }

    /// Split and persist both subsets as CSV with headers, creating parent
    /// directories as needed.
    pub fn split_and_write(
        &self,
        dataset: &Dataset,
        train_path: &Path,
        test_path: &Path,
    ) -> Result<(), IngestError> {
        let (train, test) = self.split(dataset)?;
        tracing::info!(
            total = dataset.row_count(),
            train = train.row_count(),
            test = test.row_count(),
            "performed train/test split"
        );
        train.write_csv(train_path)?;
        test.write_csv(test_path)?;
        tracing::info!(
            train_path = %train_path.display(),
            test_path = %test_path.display(),
            "exported train and test files"
        );
        Ok(())
    }
}
