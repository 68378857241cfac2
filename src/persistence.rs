//! Model selection and bundle persistence
//!
//! The best classifier is stored together with the scaler it was trained
//! behind, so a loaded bundle can answer raw-feature predictions on its own.

use crate::core::{Result, SVMError, SVMModel};
use crate::evaluation::EvaluationReports;
use crate::kernel::KernelKind;
use crate::trainer::{HiringModel, TrainedModels};
use crate::utils::fs::write_bytes_atomically;
use crate::utils::scaling::StandardScaler;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Trained model plus everything needed to use and describe it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelBundle {
    pub kernel: KernelKind,
    /// Held-out accuracy measured when the model was selected
    pub accuracy: f64,
    pub model: HiringModel,
    pub scaler: StandardScaler,
    pub metadata: ModelMetadata,
}

/// Model metadata for tracking and validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Library version used to create the model
    pub library_version: String,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    /// Number of rows the model was trained on
    pub training_samples: usize,
    /// Number of support vectors
    pub n_support_vectors: usize,
}

impl ModelBundle {
    /// Assemble a bundle stamped with the current time
    pub fn new(
        kernel: KernelKind,
        accuracy: f64,
        model: HiringModel,
        scaler: StandardScaler,
    ) -> Self {
        let metadata = ModelMetadata {
            library_version: crate::VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            training_samples: scaler.n_samples_seen(),
            n_support_vectors: model.n_support_vectors(),
        };
        Self {
            kernel,
            accuracy,
            model,
            scaler,
            metadata,
        }
    }

    /// Print bundle summary
    pub fn print_summary(&self) {
        println!("=== Hiring Model Summary ===");
        println!("Kernel: {}", self.kernel);
        println!("Accuracy: {:.4}", self.accuracy);
        println!("Support Vectors: {}", self.metadata.n_support_vectors);
        println!("Bias: {:.6}", self.model.bias());
        println!("Training Samples: {}", self.metadata.training_samples);
        println!("Library Version: {}", self.metadata.library_version);
        println!("Created: {}", self.metadata.created_at);
    }
}

/// Pick the kernel with strictly highest accuracy
///
/// Ties keep the first kernel in enumeration order. Kernels without a
/// report are skipped.
pub fn select_best<'a>(
    models: &'a TrainedModels,
    reports: &EvaluationReports,
) -> Result<(KernelKind, &'a HiringModel, f64)> {
    let mut best: Option<(KernelKind, &HiringModel, f64)> = None;

    for (&kind, model) in models {
        let Some(report) = reports.get(&kind) else {
            continue;
        };
        if best.map_or(true, |(_, _, accuracy)| report.accuracy > accuracy) {
            best = Some((kind, model, report.accuracy));
        }
    }

    let selected = best.ok_or_else(|| {
        SVMError::InvalidArgument("no evaluated model to select from".to_string())
    })?;
    info!("Selected {} kernel (accuracy {:.4})", selected.0, selected.2);
    Ok(selected)
}

/// Save the bundle as JSON, replacing any previous file atomically
pub fn persist<P: AsRef<Path>>(bundle: &ModelBundle, path: P) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_vec_pretty(bundle)?;
    write_bytes_atomically(path, &json)?;
    info!("Saved {} model bundle to {}", bundle.kernel, path.display());
    Ok(())
}

/// Load a bundle written by [`persist`]
pub fn load_bundle<P: AsRef<Path>>(path: P) -> Result<ModelBundle> {
    let file = File::open(path)?;
    let bundle = serde_json::from_reader(BufReader::new(file))?;
    Ok(bundle)
}
