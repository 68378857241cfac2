//! Train/test split and feature scaling

use crate::core::{FeatureTransform, Result, SVMError};
use crate::data::CandidateDataset;
use crate::utils::scaling::StandardScaler;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Scaled partitions plus the scaler fitted on the training rows
#[derive(Debug, Clone)]
pub struct SplitData {
    pub train_features: Vec<Vec<f64>>,
    pub test_features: Vec<Vec<f64>>,
    pub train_labels: Vec<u8>,
    pub test_labels: Vec<u8>,
    pub scaler: StandardScaler,
}

/// Number of test rows for `n` records: ceil(n * fraction), keeping both sides non-empty
pub fn test_size(n: usize, test_fraction: f64) -> usize {
    let size = (n as f64 * test_fraction).ceil() as usize;
    size.clamp(1, n.saturating_sub(1).max(1))
}

/// Check that `n` records can be split with `test_fraction`
pub fn check_split(n: usize, test_fraction: f64) -> Result<()> {
    if n < 2 {
        return Err(SVMError::InvalidArgument(format!(
            "need at least 2 records to split, got {n}"
        )));
    }
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(SVMError::InvalidArgument(format!(
            "test_fraction must be in (0, 1), got {test_fraction}"
        )));
    }
    Ok(())
}

/// Shuffle with `seed`, split off the test rows and standardize both parts
pub fn split_and_scale(
    dataset: &CandidateDataset,
    test_fraction: f64,
    seed: u64,
) -> Result<SplitData> {
    let n = dataset.records().len();
    check_split(n, test_fraction)?;

    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut StdRng::seed_from_u64(seed));
    let (test_idx, train_idx) = indices.split_at(test_size(n, test_fraction));

    let records = dataset.records();
    let rows = |idx: &[usize]| -> Vec<Vec<f64>> { idx.iter().map(|&i| records[i].features()).collect() };
    let labels = |idx: &[usize]| -> Vec<u8> { idx.iter().map(|&i| records[i].label).collect() };

    let raw_train = rows(train_idx);
    let raw_test = rows(test_idx);

    let scaler = StandardScaler::fit(&raw_train)?;
    debug!("Scaler statistics: {:?}", scaler.feature_stats());
    info!("Split {n} records into {} train / {} test", train_idx.len(), test_idx.len());

    Ok(SplitData {
        train_features: scaler.transform_batch(&raw_train),
        test_features: scaler.transform_batch(&raw_test),
        train_labels: labels(train_idx),
        test_labels: labels(test_idx),
        scaler,
    })
}
