//! Prediction service
//!
//! Holds the active bundle behind a swappable `Arc`. Readers clone the
//! handle and keep using it even if a retrain replaces it meanwhile.

use crate::core::{Prediction, Result, SVMError, SVMModel, LABEL_REJECTED};
use crate::data::validate_features;
use crate::persistence::{load_bundle, ModelBundle};
use crate::utils::scaling::StandardScaler;
use log::info;
use parking_lot::RwLock;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Human readable outcome for a dataset label
pub fn outcome_text(label: u8) -> &'static str {
    if label == LABEL_REJECTED {
        "Rejected"
    } else {
        "Hired"
    }
}

/// Answer to a single-candidate prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandidatePrediction {
    pub prediction: u8,
    pub result: &'static str,
    /// |decision value| in scaled space, not a probability
    pub confidence: f64,
}

impl From<Prediction> for CandidatePrediction {
    fn from(p: Prediction) -> Self {
        Self {
            prediction: p.label,
            result: outcome_text(p.label),
            confidence: p.confidence(),
        }
    }
}

/// Validate, scale and classify one raw candidate
pub fn predict<M: SVMModel>(
    model: &M,
    scaler: &StandardScaler,
    experience_years: f64,
    technical_score: f64,
) -> Result<CandidatePrediction> {
    validate_features(experience_years, technical_score)?;
    let scaled = scaler.try_transform(&[experience_years, technical_score])?;
    Ok(model.predict(&scaled).into())
}

/// Owner of the in-memory bundle
#[derive(Debug, Default)]
pub struct PredictionService {
    bundle: RwLock<Option<Arc<ModelBundle>>>,
}

impl PredictionService {
    /// Service with no model loaded
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bundle(bundle: ModelBundle) -> Self {
        let service = Self::new();
        service.install(bundle);
        service
    }

    /// Load a bundle from disk and make it active
    ///
    /// On failure the current bundle (if any) stays in place.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Arc<ModelBundle>> {
        let bundle = load_bundle(path.as_ref())?;
        info!("Loaded {} model from {}", bundle.kernel, path.as_ref().display());
        Ok(self.install(bundle))
    }

    /// Make `bundle` the active model, returning the new handle
    pub fn install(&self, bundle: ModelBundle) -> Arc<ModelBundle> {
        let bundle = Arc::new(bundle);
        *self.bundle.write() = Some(Arc::clone(&bundle));
        bundle
    }

    /// Run `retrain` and install its bundle only if it succeeds
    pub fn retrain<F>(&self, retrain: F) -> Result<Arc<ModelBundle>>
    where
        F: FnOnce() -> Result<ModelBundle>,
    {
        let bundle = retrain()?;
        Ok(self.install(bundle))
    }

    /// Currently active bundle
    pub fn current(&self) -> Option<Arc<ModelBundle>> {
        self.bundle.read().clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.bundle.read().is_some()
    }

    /// Predict with the active bundle
    pub fn predict(&self, experience_years: f64, technical_score: f64) -> Result<CandidatePrediction> {
        let bundle = self.current().ok_or(SVMError::ModelNotLoaded)?;
        predict(&bundle.model, &bundle.scaler, experience_years, technical_score)
    }
}
