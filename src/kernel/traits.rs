//! Kernel trait definition

/// Kernel function trait
///
/// A kernel function K(x, y) should satisfy Mercer's condition to be valid for SVM.
/// The sigmoid kernel is the usual exception and is still accepted by the solver.
pub trait Kernel: Send + Sync {
    /// Compute kernel value K(x, y)
    fn compute(&self, x: &[f64], y: &[f64]) -> f64;
}
