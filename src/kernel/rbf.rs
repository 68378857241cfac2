//! RBF (Radial Basis Function) kernel implementation
//!
//! The RBF kernel is defined as: K(x, y) = exp(-γ * ||x - y||²)
//! where γ (gamma) is a hyperparameter that controls the kernel width.

use crate::kernel::Kernel;
use serde::{Deserialize, Serialize};

/// RBF (Radial Basis Function) kernel: K(x, y) = exp(-γ * ||x - y||²)
///
/// The gamma parameter controls the "reach" of each training example:
/// - High gamma: close points have high influence (potential overfitting)
/// - Low gamma: distant points have influence (potential underfitting)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RBFKernel {
    gamma: f64,
}

impl RBFKernel {
    /// Create a new RBF kernel with specified gamma parameter
    ///
    /// # Panics
    /// Panics if gamma is not positive
    pub fn new(gamma: f64) -> Self {
        assert!(gamma > 0.0, "Gamma must be positive, got: {}", gamma);
        Self { gamma }
    }

    /// Get the gamma parameter
    pub fn gamma(&self) -> f64 {
        self.gamma
    }
}

impl Default for RBFKernel {
    /// Default RBF kernel with gamma = 1.0
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Kernel for RBFKernel {
    fn compute(&self, x: &[f64], y: &[f64]) -> f64 {
        (-self.gamma * squared_euclidean_distance(x, y)).exp()
    }
}

/// Squared Euclidean distance; missing trailing entries count as zero
fn squared_euclidean_distance(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().max(y.len());
    (0..n)
        .map(|i| {
            let diff = x.get(i).copied().unwrap_or(0.0) - y.get(i).copied().unwrap_or(0.0);
            diff * diff
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rbf_identical_vectors() {
        let kernel = RBFKernel::new(0.5);
        let x = [1.0, -2.0];
        assert_relative_eq!(kernel.compute(&x, &x), 1.0);
    }

    #[test]
    fn test_rbf_known_value() {
        let kernel = RBFKernel::new(0.5);
        // ||x - y||² = 1 + 4 = 5
        let value = kernel.compute(&[0.0, 0.0], &[1.0, 2.0]);
        assert_relative_eq!(value, (-2.5f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_rbf_symmetry_and_range() {
        let kernel = RBFKernel::new(0.5);
        let x = [0.3, 1.7];
        let y = [-1.2, 0.4];
        let kxy = kernel.compute(&x, &y);
        assert_eq!(kxy, kernel.compute(&y, &x));
        assert!(kxy > 0.0 && kxy < 1.0);
        assert_eq!(kernel.gamma(), 0.5);
    }

    #[test]
    #[should_panic(expected = "Gamma must be positive")]
    fn test_rbf_rejects_non_positive_gamma() {
        RBFKernel::new(0.0);
    }

    #[test]
    fn test_squared_distance_uneven_lengths() {
        assert_eq!(squared_euclidean_distance(&[3.0], &[0.0, 4.0]), 25.0);
    }
}
