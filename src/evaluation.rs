//! Model evaluation and report export
//!
//! Scores every trained classifier on the held-out partition and writes the
//! artefacts the dashboard reads: one JSON report per kernel, an aggregate
//! CSV table and a decision-surface grid per kernel.

use crate::core::{Result, SVMError, SVMModel, LABEL_HIRED, LABEL_REJECTED};
use crate::kernel::KernelKind;
use crate::trainer::TrainedModels;
use crate::utils::validation::validate_binary_labels;
use crate::utils::fs::{write_atomically, write_bytes_atomically};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Name of the aggregate summary table
pub const SUMMARY_FILE: &str = "all_results.csv";
/// Grid points per axis used by the pipeline
pub const DEFAULT_GRID_RESOLUTION: usize = 100;
/// Relative padding added around the training points on each axis
const GRID_MARGIN: f64 = 0.05;

/// 2x2 confusion matrix, rows = actual label, columns = predicted label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfusionMatrix(pub [[usize; 2]; 2]);

impl ConfusionMatrix {
    /// Count label pairs; labels are expected in {0, 1}
    pub fn from_labels(actual: &[u8], predicted: &[u8]) -> Self {
        let mut matrix = [[0usize; 2]; 2];
        for (&a, &p) in actual.iter().zip(predicted) {
            matrix[usize::from(a.min(1))][usize::from(p.min(1))] += 1;
        }
        Self(matrix)
    }

    pub fn total(&self) -> usize {
        self.0.iter().flatten().sum()
    }

    /// Share of correct predictions; 0 for an empty matrix
    pub fn accuracy(&self) -> f64 {
        ratio(self.0[0][0] + self.0[1][1], self.total())
    }

    /// Precision, recall, F1 and support for one label
    pub fn class_metrics(&self, label: u8) -> ClassMetrics {
        let c = usize::from(label.min(1));
        let other = 1 - c;

        let true_positives = self.0[c][c];
        let false_positives = self.0[other][c];
        let false_negatives = self.0[c][other];

        let precision = ratio(true_positives, true_positives + false_positives);
        let recall = ratio(true_positives, true_positives + false_negatives);
        let f1_score = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };

        ClassMetrics {
            precision,
            recall,
            f1_score,
            support: true_positives + false_negatives,
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    #[serde(rename = "f1-score")]
    pub f1_score: f64,
    pub support: usize,
}

/// Per-class metrics plus macro and support-weighted averages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    #[serde(rename = "0")]
    pub hired: ClassMetrics,
    #[serde(rename = "1")]
    pub rejected: ClassMetrics,
    pub accuracy: f64,
    #[serde(rename = "macro avg")]
    pub macro_avg: ClassMetrics,
    #[serde(rename = "weighted avg")]
    pub weighted_avg: ClassMetrics,
}

impl ClassificationReport {
    pub fn from_confusion(matrix: &ConfusionMatrix) -> Self {
        let hired = matrix.class_metrics(LABEL_HIRED);
        let rejected = matrix.class_metrics(LABEL_REJECTED);
        let support = hired.support + rejected.support;

        let macro_avg = ClassMetrics {
            precision: (hired.precision + rejected.precision) / 2.0,
            recall: (hired.recall + rejected.recall) / 2.0,
            f1_score: (hired.f1_score + rejected.f1_score) / 2.0,
            support,
        };

        let weight = |metric: fn(&ClassMetrics) -> f64| {
            if support == 0 {
                0.0
            } else {
                (metric(&hired) * hired.support as f64 + metric(&rejected) * rejected.support as f64)
                    / support as f64
            }
        };
        let weighted_avg = ClassMetrics {
            precision: weight(|m| m.precision),
            recall: weight(|m| m.recall),
            f1_score: weight(|m| m.f1_score),
            support,
        };

        Self {
            hired,
            rejected,
            accuracy: matrix.accuracy(),
            macro_avg,
            weighted_avg,
        }
    }
}

/// Held-out evaluation of one kernel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub kernel: KernelKind,
    pub accuracy: f64,
    pub confusion_matrix: ConfusionMatrix,
    pub classification_report: ClassificationReport,
}

impl EvaluationReport {
    pub fn new(kernel: KernelKind, actual: &[u8], predicted: &[u8]) -> Self {
        let confusion_matrix = ConfusionMatrix::from_labels(actual, predicted);
        Self {
            kernel,
            accuracy: confusion_matrix.accuracy(),
            classification_report: ClassificationReport::from_confusion(&confusion_matrix),
            confusion_matrix,
        }
    }

    pub fn summary_row(&self) -> SummaryRow {
        let macro_avg = &self.classification_report.macro_avg;
        SummaryRow {
            kernel: self.kernel,
            accuracy: self.accuracy,
            precision: macro_avg.precision,
            recall: macro_avg.recall,
            f1_score: macro_avg.f1_score,
        }
    }
}

/// One line of the aggregate table (macro-averaged metrics)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub kernel: KernelKind,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

pub type EvaluationReports = BTreeMap<KernelKind, EvaluationReport>;

/// Summary table in kernel enumeration order
pub fn summary_table(reports: &EvaluationReports) -> Vec<SummaryRow> {
    reports.values().map(EvaluationReport::summary_row).collect()
}

/// Score every model on the scaled test partition
pub fn evaluate(
    models: &TrainedModels,
    test_features: &[Vec<f64>],
    test_labels: &[u8],
) -> Result<EvaluationReports> {
    if test_features.len() != test_labels.len() {
        return Err(SVMError::InvalidArgument(format!(
            "got {} test rows but {} labels",
            test_features.len(),
            test_labels.len()
        )));
    }
    if test_features.is_empty() {
        return Err(SVMError::InvalidArgument("test partition is empty".to_string()));
    }
    validate_binary_labels(test_labels)?;

    let mut reports = EvaluationReports::new();
    for (&kind, model) in models {
        let predicted: Vec<u8> = model
            .predict_batch(test_features)
            .into_iter()
            .map(|p| p.label)
            .collect();
        let report = EvaluationReport::new(kind, test_labels, &predicted);
        info!("{kind} kernel accuracy: {:.4}", report.accuracy);
        reports.insert(kind, report);
    }
    Ok(reports)
}

/// Path of the JSON report for one kernel
pub fn report_path(dir: &Path, kind: KernelKind) -> PathBuf {
    dir.join(format!("{kind}_report.json"))
}

/// Write `<kernel>_report.json` per kernel and `all_results.csv`
pub fn write_reports<P: AsRef<Path>>(reports: &EvaluationReports, dir: P) -> Result<()> {
    let dir = dir.as_ref();
    for (&kind, report) in reports {
        let json = serde_json::to_vec_pretty(report)?;
        write_bytes_atomically(&report_path(dir, kind), &json)?;
    }

    write_atomically(&dir.join(SUMMARY_FILE), |file| {
        let mut writer = csv::Writer::from_writer(file);
        for row in summary_table(reports) {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    })?;

    info!("Wrote {} reports to {}", reports.len(), dir.display());
    Ok(())
}

/// Read the aggregate table written by [`write_reports`]
pub fn read_summary<P: AsRef<Path>>(dir: P) -> Result<Vec<SummaryRow>> {
    let file = std::fs::File::open(dir.as_ref().join(SUMMARY_FILE))?;
    let mut reader = csv::Reader::from_reader(file);
    let rows = reader.deserialize().collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Decision function sampled on a regular grid in scaled feature space
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionGrid {
    pub kernel: KernelKind,
    pub resolution: usize,
    pub points: Vec<GridPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: f64,
    pub y: f64,
    pub decision: f64,
}

/// Sample `model` on a `resolution x resolution` grid covering `features`
///
/// The grid spans the bounding box of the points plus a 5% margin per axis.
pub fn decision_grid<M: SVMModel>(
    kernel: KernelKind,
    model: &M,
    features: &[Vec<f64>],
    resolution: usize,
) -> Result<DecisionGrid> {
    if resolution < 2 {
        return Err(SVMError::InvalidArgument(format!(
            "grid resolution must be at least 2, got {resolution}"
        )));
    }
    if features.is_empty() {
        return Err(SVMError::EmptyDataset);
    }
    if let Some(row) = features.iter().find(|row| row.len() != 2) {
        return Err(SVMError::DimensionMismatch {
            expected: 2,
            actual: row.len(),
        });
    }

    let xs = axis(features.iter().map(|row| row[0]), resolution);
    let ys = axis(features.iter().map(|row| row[1]), resolution);

    let mut points = Vec::with_capacity(resolution * resolution);
    for &x in &xs {
        for &y in &ys {
            points.push(GridPoint {
                x,
                y,
                decision: model.decision_score(&[x, y]),
            });
        }
    }

    Ok(DecisionGrid {
        kernel,
        resolution,
        points,
    })
}

fn axis(values: impl Iterator<Item = f64>, resolution: usize) -> Vec<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let margin = if max > min { (max - min) * GRID_MARGIN } else { 0.5 };
    let (lo, hi) = (min - margin, max + margin);
    let step = (hi - lo) / (resolution - 1) as f64;
    (0..resolution).map(|i| lo + step * i as f64).collect()
}

/// Path of the decision grid for one kernel
pub fn decision_grid_path(dir: &Path, kind: KernelKind) -> PathBuf {
    dir.join(format!("decision_boundary_{kind}.csv"))
}

/// Save a grid as `decision_boundary_<kernel>.csv` with columns x, y, decision
pub fn write_decision_grid<P: AsRef<Path>>(grid: &DecisionGrid, dir: P) -> Result<PathBuf> {
    let path = decision_grid_path(dir.as_ref(), grid.kernel);
    write_atomically(&path, |file| {
        let mut writer = csv::Writer::from_writer(file);
        for point in &grid.points {
            writer.serialize(point)?;
        }
        writer.flush()?;
        Ok(())
    })?;

    if grid.points.iter().all(|p| p.decision >= 0.0) || grid.points.iter().all(|p| p.decision < 0.0)
    {
        warn!("{} decision surface has no boundary inside the grid", grid.kernel);
    }
    Ok(path)
}
