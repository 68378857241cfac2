//! Core traits for SVM implementation

use crate::core::Prediction;

/// Trained SVM model
pub trait SVMModel: Send + Sync {
    /// Raw decision value for an already scaled feature vector
    fn decision_score(&self, features: &[f64]) -> f64;

    /// Predict a single scaled feature vector
    fn predict(&self, features: &[f64]) -> Prediction {
        Prediction::from_decision(self.decision_score(features))
    }

    /// Predict multiple feature vectors
    fn predict_batch(&self, rows: &[Vec<f64>]) -> Vec<Prediction> {
        rows.iter().map(|row| self.predict(row)).collect()
    }

    /// Get the number of support vectors
    fn n_support_vectors(&self) -> usize;

    /// Get the bias term
    fn bias(&self) -> f64;
}

/// A feature transform fitted once and then applied unchanged
pub trait FeatureTransform {
    /// Transform a single raw feature vector
    fn transform(&self, features: &[f64]) -> Vec<f64>;

    /// Transform a batch of raw feature vectors
    fn transform_batch(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        rows.iter().map(|row| self.transform(row)).collect()
    }
}
