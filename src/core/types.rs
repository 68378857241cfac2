//! Core type definitions for SVM

use serde::{Deserialize, Serialize};

/// Dataset label for a candidate that should be hired
pub const LABEL_HIRED: u8 = 0;
/// Dataset label for a candidate that should be rejected
pub const LABEL_REJECTED: u8 = 1;

/// Map a dataset label {0, 1} to the SVM label {-1, +1}
pub fn to_svm_label(label: u8) -> f64 {
    if label == LABEL_REJECTED {
        1.0
    } else {
        -1.0
    }
}

/// Map a decision value back to a dataset label
pub fn label_from_decision(decision_value: f64) -> u8 {
    if decision_value >= 0.0 {
        LABEL_REJECTED
    } else {
        LABEL_HIRED
    }
}

/// Prediction result containing label and decision value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Predicted dataset label (0 = hired, 1 = rejected)
    pub label: u8,
    /// Raw decision function value
    pub decision_value: f64,
}

impl Prediction {
    /// Create a prediction from a raw decision value
    pub fn from_decision(decision_value: f64) -> Self {
        Self {
            label: label_from_decision(decision_value),
            decision_value,
        }
    }

    /// Get confidence as absolute value of decision value
    pub fn confidence(&self) -> f64 {
        self.decision_value.abs()
    }
}

/// Training sample with dense features and a +1/-1 label
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub features: Vec<f64>,
    pub label: f64,
}

impl Sample {
    /// Create a new sample
    pub fn new(features: Vec<f64>, label: f64) -> Self {
        Self { features, label }
    }
}

/// Result of optimization process
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Lagrange multipliers (alpha values)
    pub alpha: Vec<f64>,
    /// Bias term (b)
    pub b: f64,
    /// Indices of support vectors (where alpha > 0)
    pub support_vectors: Vec<usize>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Final objective value
    pub objective_value: f64,
}

/// Configuration for optimizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Regularization parameter (upper bound for alpha)
    pub c: f64,
    /// Tolerance for KKT conditions
    pub epsilon: f64,
    /// Maximum number of passes over the training set
    pub max_iterations: usize,
    /// Kernel cache size in bytes
    pub cache_size: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            epsilon: 0.001,
            max_iterations: 1000,
            cache_size: 100_000_000, // 100MB
        }
    }
}
