//! Optimization algorithms for SVM
//!
//! This module provides high-level optimization interfaces that integrate
//! kernels and solvers to provide complete SVM training functionality.

use crate::core::{OptimizationResult, OptimizerConfig, Result, SVMModel, Sample};
use crate::kernel::Kernel;
use crate::solver::SMOSolver;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// High-level SVM optimizer that integrates kernel functions and solving algorithms
pub struct SVMOptimizer<K: Kernel + Clone> {
    kernel: Arc<K>,
    config: OptimizerConfig,
}

impl<K: Kernel + Clone> SVMOptimizer<K> {
    /// Create a new SVM optimizer with the given kernel and configuration
    pub fn new(kernel: K, config: OptimizerConfig) -> Self {
        Self {
            kernel: Arc::new(kernel),
            config,
        }
    }

    /// Create a new SVM optimizer with default configuration
    pub fn with_kernel(kernel: K) -> Self {
        Self::new(kernel, OptimizerConfig::default())
    }

    /// Train an SVM model on a slice of samples
    pub fn train_samples(&self, samples: &[Sample]) -> Result<TrainedSVM<K>> {
        let solver = SMOSolver::new(Arc::clone(&self.kernel), self.config.clone());
        let result = solver.solve(samples)?;

        Ok(TrainedSVM::new(self.kernel.as_ref().clone(), samples, result))
    }

    /// Get the optimizer configuration
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Get the kernel
    pub fn kernel(&self) -> &K {
        &self.kernel
    }
}

/// A trained SVM model that can make predictions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedSVM<K> {
    kernel: K,
    support_vectors: Vec<Sample>,
    alpha: Vec<f64>,
    bias: f64,
    support_indices: Vec<usize>,
}

impl<K: Kernel> TrainedSVM<K> {
    /// Create a new trained SVM model
    pub(crate) fn new(
        kernel: K,
        training_samples: &[Sample],
        optimization_result: OptimizationResult,
    ) -> Self {
        let mut support_vectors = Vec::with_capacity(optimization_result.support_vectors.len());
        let mut alpha_values = Vec::with_capacity(optimization_result.support_vectors.len());

        for &sv_idx in &optimization_result.support_vectors {
            support_vectors.push(training_samples[sv_idx].clone());
            alpha_values.push(optimization_result.alpha[sv_idx]);
        }

        Self {
            kernel,
            support_vectors,
            alpha: alpha_values,
            bias: optimization_result.b,
            support_indices: optimization_result.support_vectors,
        }
    }

    /// Get the decision function value for a scaled feature vector
    pub fn decision_function(&self, features: &[f64]) -> f64 {
        let mut result = 0.0;

        for (alpha, support_vector) in self.alpha.iter().zip(&self.support_vectors) {
            let kernel_value = self.kernel.compute(features, &support_vector.features);
            result += alpha * support_vector.label * kernel_value;
        }

        result + self.bias
    }

    /// Get the kernel
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Get the support vectors
    pub fn support_vectors(&self) -> &[Sample] {
        &self.support_vectors
    }

    /// Get the alpha values for support vectors
    pub fn alpha_values(&self) -> &[f64] {
        &self.alpha
    }

    /// Get the indices of support vectors in the original training set
    pub fn support_vector_indices(&self) -> &[usize] {
        &self.support_indices
    }
}

impl<K: Kernel> SVMModel for TrainedSVM<K> {
    fn decision_score(&self, features: &[f64]) -> f64 {
        self.decision_function(features)
    }

    fn n_support_vectors(&self) -> usize {
        self.support_vectors.len()
    }

    fn bias(&self) -> f64 {
        self.bias
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::core::{LABEL_HIRED, LABEL_REJECTED};
    use crate::kernel::{KernelFunction, LinearKernel, RBFKernel};

    fn samples() -> Vec<Sample> {
        vec![
            Sample::new(vec![2.0, 0.5], 1.0),
            Sample::new(vec![-2.0, -0.5], -1.0),
            Sample::new(vec![1.5, 0.2], 1.0),
            Sample::new(vec![-1.5, -0.2], -1.0),
        ]
    }

    #[test]
    fn test_svm_optimizer_with_kernel() {
        let optimizer = SVMOptimizer::with_kernel(LinearKernel::new());

        // Should use default config
        assert_eq!(optimizer.config().c, 1.0);
        assert_eq!(optimizer.config().epsilon, 0.001);
    }

    #[test]
    fn test_svm_training_simple_case() {
        let optimizer = SVMOptimizer::with_kernel(LinearKernel::new());
        let samples = samples();

        let model = optimizer
            .train_samples(&samples)
            .expect("Training should succeed");

        assert!(model.n_support_vectors() > 0);
        assert_eq!(model.alpha_values().len(), model.support_vectors().len());
        assert_eq!(
            model.support_vector_indices().len(),
            model.support_vectors().len()
        );

        for sample in &samples {
            let expected = if sample.label > 0.0 {
                LABEL_REJECTED
            } else {
                LABEL_HIRED
            };
            assert_eq!(model.predict(&sample.features).label, expected);
        }
    }

    #[test]
    fn test_decision_function_ordering() {
        let optimizer = SVMOptimizer::with_kernel(LinearKernel::new());
        let model = optimizer
            .train_samples(&samples())
            .expect("Training should succeed");

        let positive = model.decision_function(&[0.5, 0.1]);
        let negative = model.decision_function(&[-0.5, -0.1]);
        assert!(positive > negative);
    }

    #[test]
    fn test_predict_batch_confidence() {
        let optimizer = SVMOptimizer::with_kernel(RBFKernel::new(0.5));
        let model = optimizer
            .train_samples(&samples())
            .expect("Training should succeed");

        let rows = vec![vec![1.0, 0.3], vec![-1.0, -0.3]];
        let predictions = model.predict_batch(&rows);
        assert_eq!(predictions.len(), 2);
        for prediction in predictions {
            assert!(prediction.confidence() >= 0.0);
        }
    }

    #[test]
    fn test_serialized_model_predicts_identically() {
        let features: Vec<Vec<f64>> = samples().into_iter().map(|s| s.features).collect();
        let kernel = KernelFunction::with_defaults(crate::kernel::KernelKind::Rbf, &features);
        let model = SVMOptimizer::with_kernel(kernel)
            .train_samples(&samples())
            .expect("Training should succeed");

        let json = serde_json::to_string(&model).expect("serialize");
        let restored: TrainedSVM<KernelFunction> =
            serde_json::from_str(&json).expect("deserialize");

        for x in [[0.3, 0.1], [-1.2, 0.4], [2.0, -2.0]] {
            assert_relative_eq!(
                model.decision_function(&x),
                restored.decision_function(&x),
                epsilon = 1e-12
            );
        }
        assert_eq!(restored.kernel(), model.kernel());
    }
}
