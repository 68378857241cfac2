//! Summary statistics for the dashboard

use crate::core::{Result, SVMError, LABEL_HIRED, LABEL_REJECTED};
use crate::data::candidate::CandidateDataset;
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of histogram bins over the technical score range
pub const HISTOGRAM_BINS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl FeatureSummary {
    fn from_values(values: &[f64]) -> Self {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        Self { mean, min, max }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LabelCounts {
    pub hired: usize,
    pub rejected: usize,
}

impl LabelCounts {
    fn add(&mut self, label: u8) {
        if label == LABEL_REJECTED {
            self.rejected += 1;
        } else {
            self.hired += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.hired + self.rejected
    }
}

/// One histogram bin covering `[lower, upper)`; the last bin is closed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub count: usize,
    pub experience_years: FeatureSummary,
    pub technical_score: FeatureSummary,
    pub labels: LabelCounts,
    /// Share of rejected candidates
    pub rejection_rate: f64,
    pub technical_score_histogram: Vec<HistogramBin>,
    /// Keyed by graduation year; rows without one are skipped
    pub labels_by_graduation_year: BTreeMap<i32, LabelCounts>,
}

impl DatasetSummary {
    pub fn from_dataset(dataset: &CandidateDataset) -> Result<Self> {
        let records = dataset.records();
        if records.is_empty() {
            return Err(SVMError::EmptyDataset);
        }

        let experience: Vec<f64> = records.iter().map(|r| r.experience_years).collect();
        let scores: Vec<f64> = records.iter().map(|r| r.technical_score).collect();

        let mut labels = LabelCounts::default();
        let mut labels_by_graduation_year: BTreeMap<i32, LabelCounts> = BTreeMap::new();
        for record in records {
            labels.add(record.label);
            if let Some(year) = record.graduation_year {
                labels_by_graduation_year
                    .entry(year)
                    .or_default()
                    .add(record.label);
            }
        }

        let technical_score = FeatureSummary::from_values(&scores);
        let technical_score_histogram =
            histogram(&scores, technical_score.min, technical_score.max);

        Ok(Self {
            count: records.len(),
            experience_years: FeatureSummary::from_values(&experience),
            technical_score,
            rejection_rate: labels.rejected as f64 / records.len() as f64,
            labels,
            technical_score_histogram,
            labels_by_graduation_year,
        })
    }
}

fn histogram(values: &[f64], min: f64, max: f64) -> Vec<HistogramBin> {
    let width = (max - min) / HISTOGRAM_BINS as f64;
    let mut bins: Vec<HistogramBin> = (0..HISTOGRAM_BINS)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == HISTOGRAM_BINS {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for &value in values {
        let index = if width > 0.0 {
            (((value - min) / width) as usize).min(HISTOGRAM_BINS - 1)
        } else {
            0
        };
        bins[index].count += 1;
    }
    bins
}
