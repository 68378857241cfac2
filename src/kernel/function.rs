//! Kernel selection by name
//!
//! `KernelKind` is the closed set of kernel families the trainer knows about.
//! `KernelFunction` carries one concrete, parameterised kernel so that a
//! trained model can be serialized without generics.

use crate::core::{Result, SVMError};
use crate::kernel::{Kernel, LinearKernel, PolynomialKernel, RBFKernel, SigmoidKernel};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kernel families, in tie-breaking order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KernelKind {
    Linear,
    Rbf,
    Polynomial,
    Sigmoid,
}

impl KernelKind {
    /// Every kernel family in enumeration order
    pub const ALL: [KernelKind; 4] = [
        KernelKind::Linear,
        KernelKind::Rbf,
        KernelKind::Polynomial,
        KernelKind::Sigmoid,
    ];

    /// Stable identifier used in file names and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            KernelKind::Linear => "linear",
            KernelKind::Rbf => "rbf",
            KernelKind::Polynomial => "polynomial",
            KernelKind::Sigmoid => "sigmoid",
        }
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KernelKind {
    type Err = SVMError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(KernelKind::Linear),
            "rbf" => Ok(KernelKind::Rbf),
            "polynomial" | "poly" => Ok(KernelKind::Polynomial),
            "sigmoid" => Ok(KernelKind::Sigmoid),
            other => Err(SVMError::InvalidArgument(format!(
                "Unknown kernel: {other}. Use linear, rbf, polynomial or sigmoid"
            ))),
        }
    }
}

/// A concrete kernel with its hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum KernelFunction {
    Linear,
    Rbf(RBFKernel),
    Polynomial(PolynomialKernel),
    Sigmoid(SigmoidKernel),
}

impl KernelFunction {
    /// Build a kernel with library defaults for the given training features
    ///
    /// Gamma follows the "scale" rule: 1 / (n_features * Var(X)), where the
    /// variance runs over every entry of X. Degree is 3 and coef0 is 0.
    pub fn with_defaults(kind: KernelKind, features: &[Vec<f64>]) -> Self {
        let gamma = scale_gamma(features);
        match kind {
            KernelKind::Linear => KernelFunction::Linear,
            KernelKind::Rbf => KernelFunction::Rbf(RBFKernel::new(gamma)),
            KernelKind::Polynomial => KernelFunction::Polynomial(PolynomialKernel::cubic(gamma)),
            KernelKind::Sigmoid => KernelFunction::Sigmoid(SigmoidKernel::zero_bias(gamma)),
        }
    }

    /// The family this kernel belongs to
    pub fn kind(&self) -> KernelKind {
        match self {
            KernelFunction::Linear => KernelKind::Linear,
            KernelFunction::Rbf(_) => KernelKind::Rbf,
            KernelFunction::Polynomial(_) => KernelKind::Polynomial,
            KernelFunction::Sigmoid(_) => KernelKind::Sigmoid,
        }
    }
}

impl Kernel for KernelFunction {
    fn compute(&self, x: &[f64], y: &[f64]) -> f64 {
        match self {
            KernelFunction::Linear => LinearKernel.compute(x, y),
            KernelFunction::Rbf(k) => k.compute(x, y),
            KernelFunction::Polynomial(k) => k.compute(x, y),
            KernelFunction::Sigmoid(k) => k.compute(x, y),
        }
    }
}

/// Gamma = 1 / (n_features * Var(X)), falling back to 1 / n_features
fn scale_gamma(features: &[Vec<f64>]) -> f64 {
    let n_features = features.first().map(|row| row.len()).unwrap_or(0).max(1);
    let values: Vec<f64> = features.iter().flatten().copied().collect();
    if values.is_empty() {
        return 1.0 / n_features as f64;
    }

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;

    if variance > 0.0 && variance.is_finite() {
        1.0 / (n_features as f64 * variance)
    } else {
        1.0 / n_features as f64
    }
}
