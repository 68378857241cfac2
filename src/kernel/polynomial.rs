//! Polynomial Kernel Implementation
//!
//! The polynomial kernel is defined as:
//! K(x, y) = (γ * <x, y> + r)^d
//!
//! Where:
//! - γ (gamma): scaling factor for the dot product
//! - r (coef0): independent term in the polynomial
//! - d (degree): degree of the polynomial

use crate::kernel::linear::dot_product;
use crate::kernel::traits::Kernel;
use serde::{Deserialize, Serialize};

/// Polynomial kernel with configurable degree, gamma, and coefficient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolynomialKernel {
    /// Scaling factor for the dot product
    pub gamma: f64,
    /// Independent term in the polynomial (default: 0.0)
    pub coef0: f64,
    /// Degree of the polynomial (default: 3)
    pub degree: u32,
}

impl PolynomialKernel {
    /// Creates a new polynomial kernel with the specified parameters
    ///
    /// # Examples
    /// ```
    /// use hiring_svm::kernel::PolynomialKernel;
    ///
    /// // Cubic kernel: (0.5·x·y + 1)³
    /// let cubic_kernel = PolynomialKernel::new(3, 0.5, 1.0);
    /// assert_eq!(cubic_kernel.degree, 3);
    /// ```
    pub fn new(degree: u32, gamma: f64, coef0: f64) -> Self {
        assert!(degree > 0, "Polynomial degree must be positive");
        assert!(gamma > 0.0, "Gamma must be positive");

        Self {
            gamma,
            coef0,
            degree,
        }
    }

    /// Creates a cubic kernel without independent term: (γ * <x,y>)³
    pub fn cubic(gamma: f64) -> Self {
        Self::new(3, gamma, 0.0)
    }
}

impl Kernel for PolynomialKernel {
    fn compute(&self, x: &[f64], y: &[f64]) -> f64 {
        (self.gamma * dot_product(x, y) + self.coef0).powi(self.degree as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_polynomial_known_value() {
        let kernel = PolynomialKernel::new(2, 1.0, 1.0);
        // (1*2 + 2*3 + 1)^2 = 81
        assert_relative_eq!(kernel.compute(&[1.0, 2.0], &[2.0, 3.0]), 81.0);
    }

    #[test]
    fn test_cubic_keeps_sign() {
        let kernel = PolynomialKernel::cubic(0.5);
        assert_eq!(kernel.coef0, 0.0);
        // (0.5 * -2)^3 = -1
        assert_relative_eq!(kernel.compute(&[1.0, 1.0], &[-1.0, -1.0]), -1.0);
    }

    #[test]
    #[should_panic(expected = "Polynomial degree must be positive")]
    fn test_zero_degree_panics() {
        PolynomialKernel::new(0, 1.0, 0.0);
    }
}
