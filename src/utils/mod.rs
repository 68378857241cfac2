//! Utility functions for SVM operations

use crate::core::{Result, SVMError};

/// Feature scaling utilities
pub mod scaling {
    use super::*;
    use crate::core::FeatureTransform;
    use serde::{Deserialize, Serialize};

    /// Variances below this are treated as constant features
    const MIN_VARIANCE: f64 = 1e-12;

    /// Statistics for a single feature
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct FeatureStats {
        pub mean: f64,
        /// Population variance (ddof = 0)
        pub variance: f64,
        /// Divisor applied after centering
        pub scale: f64,
    }

    /// Standard (z-score) scaler: (x - mean) / std
    ///
    /// Fitted once on the training rows and immutable afterwards. A feature
    /// with zero variance is scaled by 1 so it only gets centered.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct StandardScaler {
        features: Vec<FeatureStats>,
        n_samples_seen: usize,
    }

    impl StandardScaler {
        /// Compute per-feature mean and population variance
        pub fn fit(rows: &[Vec<f64>]) -> Result<Self> {
            let first = rows.first().ok_or(SVMError::EmptyDataset)?;
            let dim = first.len();
            if dim == 0 {
                return Err(SVMError::InvalidArgument(
                    "cannot fit a scaler on rows without features".to_string(),
                ));
            }

            for row in rows {
                if row.len() != dim {
                    return Err(SVMError::DimensionMismatch {
                        expected: dim,
                        actual: row.len(),
                    });
                }
            }

            let n = rows.len() as f64;
            let features = (0..dim)
                .map(|j| {
                    let mean = rows.iter().map(|row| row[j]).sum::<f64>() / n;
                    let variance =
                        rows.iter().map(|row| (row[j] - mean).powi(2)).sum::<f64>() / n;
                    let scale = if variance < MIN_VARIANCE {
                        1.0
                    } else {
                        variance.sqrt()
                    };
                    FeatureStats {
                        mean,
                        variance,
                        scale,
                    }
                })
                .collect();

            Ok(Self {
                features,
                n_samples_seen: rows.len(),
            })
        }

        /// Per-feature statistics in column order
        pub fn feature_stats(&self) -> &[FeatureStats] {
            &self.features
        }

        pub fn n_features(&self) -> usize {
            self.features.len()
        }

        /// Number of rows the scaler was fitted on
        pub fn n_samples_seen(&self) -> usize {
            self.n_samples_seen
        }

        /// Scale a row, checking its width first
        pub fn try_transform(&self, row: &[f64]) -> Result<Vec<f64>> {
            if row.len() != self.features.len() {
                return Err(SVMError::DimensionMismatch {
                    expected: self.features.len(),
                    actual: row.len(),
                });
            }
            Ok(self.transform(row))
        }
    }

    impl FeatureTransform for StandardScaler {
        fn transform(&self, row: &[f64]) -> Vec<f64> {
            row.iter()
                .zip(&self.features)
                .map(|(&value, stats)| (value - stats.mean) / stats.scale)
                .collect()
        }
    }
}

/// Validation and preprocessing utilities
pub mod validation {
    use super::*;
    use std::collections::BTreeSet;

    /// Validate that all labels are dataset labels (0 or 1)
    pub fn validate_binary_labels(labels: &[u8]) -> Result<()> {
        for (i, &label) in labels.iter().enumerate() {
            if label > 1 {
                return Err(SVMError::InvalidArgument(format!(
                    "Invalid label {label} at index {i}: labels must be 0 or 1"
                )));
            }
        }
        Ok(())
    }

    /// Count distinct classes in a label vector
    pub fn distinct_classes(labels: &[u8]) -> usize {
        labels.iter().collect::<BTreeSet<_>>().len()
    }

    /// Require at least two classes so a separating boundary exists
    pub fn require_two_classes(labels: &[u8]) -> Result<()> {
        match distinct_classes(labels) {
            n if n >= 2 => Ok(()),
            n => Err(SVMError::InvalidArgument(format!(
                "training labels contain {n} distinct class(es), at least 2 are required"
            ))),
        }
    }
}

/// File system helpers
pub mod fs {
    use super::*;
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    /// Create the parent directory of `path` if it has one
    pub fn ensure_parent_dir(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    /// Write `path` through a uniquely named sibling temp file followed by a rename
    ///
    /// Readers see either the previous contents or the complete new file.
    /// The temp file is removed when any step fails.
    pub fn write_atomically<F>(path: &Path, write: F) -> Result<()>
    where
        F: FnOnce(&mut fs::File) -> Result<()>,
    {
        if path.file_name().is_none() {
            return Err(SVMError::InvalidArgument(format!(
                "{} has no file name",
                path.display()
            )));
        }
        ensure_parent_dir(path)?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir)?;
        write(temp.as_file_mut())?;
        temp.as_file_mut().flush()?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|err| err.error)?;
        Ok(())
    }

    /// Atomically replace `path` with `bytes`
    pub fn write_bytes_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
        write_atomically(path, |file| {
            file.write_all(bytes)?;
            Ok(())
        })
    }
}
