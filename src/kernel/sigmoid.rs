//! Sigmoid (Tanh) Kernel Implementation
//!
//! K(x, y) = tanh(γ * <x, y> + r)
//!
//! The kernel is not positive semi-definite for every parameter choice, so the
//! solver may skip pairs whose curvature is not positive. It tends to be the
//! weakest of the four kernels on the candidate data.

use crate::kernel::linear::dot_product;
use crate::kernel::traits::Kernel;
use serde::{Deserialize, Serialize};

/// Sigmoid (Hyperbolic Tangent) kernel for non-linear classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SigmoidKernel {
    /// Scaling parameter for the dot product (must be positive)
    pub gamma: f64,
    /// Bias/offset parameter (can be positive, negative, or zero)
    pub coef0: f64,
}

impl SigmoidKernel {
    /// Creates a new Sigmoid kernel with specified parameters
    ///
    /// # Panics
    /// Panics if gamma is not positive
    pub fn new(gamma: f64, coef0: f64) -> Self {
        if gamma <= 0.0 {
            panic!("Gamma must be positive, got: {}", gamma);
        }
        Self { gamma, coef0 }
    }

    /// Creates a sigmoid kernel with zero bias
    pub fn zero_bias(gamma: f64) -> Self {
        Self::new(gamma, 0.0)
    }
}

impl Kernel for SigmoidKernel {
    fn compute(&self, x: &[f64], y: &[f64]) -> f64 {
        (self.gamma * dot_product(x, y) + self.coef0).tanh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sigmoid_bounded() {
        let kernel = SigmoidKernel::zero_bias(10.0);
        let value = kernel.compute(&[5.0, 5.0], &[5.0, 5.0]);
        assert!(value <= 1.0 && value > 0.99);
        let value = kernel.compute(&[5.0, 5.0], &[-5.0, -5.0]);
        assert!(value >= -1.0 && value < -0.99);
    }

    #[test]
    fn test_sigmoid_known_value() {
        let kernel = SigmoidKernel::new(0.5, -1.0);
        // tanh(0.5 * 2 - 1) = tanh(0) = 0
        assert_relative_eq!(kernel.compute(&[1.0, 1.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    #[should_panic(expected = "Gamma must be positive")]
    fn test_sigmoid_rejects_negative_gamma() {
        SigmoidKernel::new(-0.1, 0.0);
    }
}
