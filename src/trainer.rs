//! Fit one classifier per kernel
//!
//! ```rust,no_run
//! use hiring_svm::kernel::KernelKind;
//! use hiring_svm::trainer::Trainer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let features = vec![vec![-1.0, -0.5], vec![1.0, 0.5], vec![-0.8, -0.2], vec![0.9, 0.4]];
//! let labels = vec![1, 0, 1, 0];
//!
//! let models = Trainer::new()
//!     .with_c(1.0)
//!     .train(&features, &labels, &KernelKind::ALL)?;
//! for (kind, model) in &models {
//!     println!("{kind}: {} support vectors", model.support_vectors().len());
//! }
//! # Ok(())
//! # }
//! ```

use crate::core::{to_svm_label, OptimizerConfig, Result, SVMError, SVMModel, Sample};
use crate::kernel::{KernelFunction, KernelKind};
use crate::optimizer::{SVMOptimizer, TrainedSVM};
use crate::utils::validation::{require_two_classes, validate_binary_labels};
use log::info;
use serde::Serialize;
use std::collections::BTreeMap;

/// Trained classifier with its concrete kernel
pub type HiringModel = TrainedSVM<KernelFunction>;

/// Trained classifiers keyed (and ordered) by kernel
pub type TrainedModels = BTreeMap<KernelKind, HiringModel>;

/// Training entry point with builder-style solver settings
#[derive(Debug, Clone, Default)]
pub struct Trainer {
    config: OptimizerConfig,
}

impl Trainer {
    /// Trainer with library defaults (C = 1)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set regularization parameter C
    pub fn with_c(mut self, c: f64) -> Self {
        self.config.c = c;
        self
    }

    /// Set convergence tolerance
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.config.epsilon = epsilon;
        self
    }

    /// Set maximum number of iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Set kernel cache size in bytes
    pub fn with_cache_size(mut self, cache_size: usize) -> Self {
        self.config.cache_size = cache_size;
        self
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Fit one model per kernel on scaled features and dataset labels
    pub fn train(
        &self,
        train_features: &[Vec<f64>],
        train_labels: &[u8],
        kernels: &[KernelKind],
    ) -> Result<TrainedModels> {
        if kernels.is_empty() {
            return Err(SVMError::InvalidArgument(
                "at least one kernel must be requested".to_string(),
            ));
        }
        let samples = to_samples(train_features, train_labels)?;

        let mut models = TrainedModels::new();
        for &kind in kernels {
            if models.contains_key(&kind) {
                continue;
            }
            let model = self.fit_samples(kind, train_features, &samples)?;
            models.insert(kind, model);
        }
        Ok(models)
    }

    /// Fit a single kernel
    pub fn fit(
        &self,
        kind: KernelKind,
        train_features: &[Vec<f64>],
        train_labels: &[u8],
    ) -> Result<HiringModel> {
        let samples = to_samples(train_features, train_labels)?;
        self.fit_samples(kind, train_features, &samples)
    }

    fn fit_samples(
        &self,
        kind: KernelKind,
        train_features: &[Vec<f64>],
        samples: &[Sample],
    ) -> Result<HiringModel> {
        let kernel = KernelFunction::with_defaults(kind, train_features);
        let model = SVMOptimizer::new(kernel, self.config.clone()).train_samples(samples)?;
        info!(
            "Trained {kind} kernel: {} support vectors, bias {:.4}",
            model.n_support_vectors(),
            model.bias()
        );
        Ok(model)
    }
}

/// Fit one model per kernel with default solver settings
pub fn train(
    train_features: &[Vec<f64>],
    train_labels: &[u8],
    kernels: &[KernelKind],
) -> Result<TrainedModels> {
    Trainer::new().train(train_features, train_labels, kernels)
}

fn to_samples(features: &[Vec<f64>], labels: &[u8]) -> Result<Vec<Sample>> {
    if features.len() != labels.len() {
        return Err(SVMError::InvalidArgument(format!(
            "got {} feature rows but {} labels",
            features.len(),
            labels.len()
        )));
    }
    validate_binary_labels(labels)?;
    require_two_classes(labels)?;

    Ok(features
        .iter()
        .zip(labels)
        .map(|(row, &label)| Sample::new(row.clone(), to_svm_label(label)))
        .collect())
}

/// Model information
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub kernel: KernelFunction,
    pub n_support_vectors: usize,
    pub bias: f64,
    pub support_vector_indices: Vec<usize>,
}

impl ModelInfo {
    pub fn of(model: &HiringModel) -> Self {
        Self {
            kernel: *model.kernel(),
            n_support_vectors: model.n_support_vectors(),
            bias: model.bias(),
            support_vector_indices: model.support_vector_indices().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{label_from_decision, LABEL_HIRED, LABEL_REJECTED};

    fn toy_data() -> (Vec<Vec<f64>>, Vec<u8>) {
        let features = vec![
            vec![-1.2, -0.9],
            vec![-1.0, -1.1],
            vec![-0.8, -0.7],
            vec![0.9, 1.0],
            vec![1.1, 0.8],
            vec![0.7, 1.2],
        ];
        let labels = vec![
            LABEL_REJECTED,
            LABEL_REJECTED,
            LABEL_REJECTED,
            LABEL_HIRED,
            LABEL_HIRED,
            LABEL_HIRED,
        ];
        (features, labels)
    }

    #[test]
    fn test_trainer_builder_pattern() {
        let trainer = Trainer::new()
            .with_c(2.0)
            .with_epsilon(0.01)
            .with_max_iterations(5000);

        assert_eq!(trainer.config().c, 2.0);
        assert_eq!(trainer.config().epsilon, 0.01);
        assert_eq!(trainer.config().max_iterations, 5000);
    }

    #[test]
    fn test_train_all_kernels() {
        let (features, labels) = toy_data();
        let models = train(&features, &labels, &KernelKind::ALL).unwrap();

        assert_eq!(models.keys().copied().collect::<Vec<_>>(), KernelKind::ALL.to_vec());
        for (kind, model) in &models {
            assert_eq!(model.kernel().kind(), *kind);
            assert!(model.n_support_vectors() > 0);
        }

        let linear = &models[&KernelKind::Linear];
        for (row, &label) in features.iter().zip(&labels) {
            assert_eq!(label_from_decision(linear.decision_score(row)), label);
        }
    }

    #[test]
    fn test_train_is_deterministic() {
        let (features, labels) = toy_data();
        let first = train(&features, &labels, &[KernelKind::Rbf]).unwrap();
        let second = train(&features, &labels, &[KernelKind::Rbf]).unwrap();
        let point = [0.1, -0.3];
        assert_eq!(
            first[&KernelKind::Rbf].decision_score(&point),
            second[&KernelKind::Rbf].decision_score(&point)
        );
    }

    #[test]
    fn test_train_rejects_single_class() {
        let (features, _) = toy_data();
        let labels = vec![LABEL_HIRED; features.len()];
        assert!(matches!(
            train(&features, &labels, &KernelKind::ALL),
            Err(SVMError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_train_rejects_bad_input() {
        let (features, labels) = toy_data();
        assert!(matches!(
            train(&features, &labels, &[]),
            Err(SVMError::InvalidArgument(_))
        ));
        assert!(matches!(
            train(&features, &labels[..3], &KernelKind::ALL),
            Err(SVMError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_model_info() {
        let (features, labels) = toy_data();
        let model = Trainer::new().fit(KernelKind::Linear, &features, &labels).unwrap();
        let info = ModelInfo::of(&model);
        assert_eq!(info.kernel, KernelFunction::Linear);
        assert_eq!(info.n_support_vectors, info.support_vector_indices.len());
    }
}
