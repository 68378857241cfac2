//! End-to-end training run
//!
//! generate → encode CSV → decode CSV → split/scale → train → evaluate →
//! select, all in memory. Files are written only once every stage has
//! succeeded: the bundle first, then the dataset, then reports and grids.

use crate::config::Settings;
use crate::core::{Result, SVMError};
use crate::data::{read_dataset, write_dataset, CandidateGenerator};
use crate::evaluation::{
    decision_grid, evaluate, write_decision_grid, write_reports, EvaluationReports,
    DEFAULT_GRID_RESOLUTION,
};
use crate::persistence::{load_bundle, persist, select_best, ModelBundle};
use crate::preprocess::{check_split, split_and_scale};
use crate::trainer::Trainer;
use crate::utils::fs::write_bytes_atomically;
use log::{info, warn};

/// Everything a training run produced
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub bundle: ModelBundle,
    pub reports: EvaluationReports,
}

/// Run the full pipeline with `settings`
pub fn run_training(settings: &Settings) -> Result<TrainingOutcome> {
    check_split(settings.dataset_size, settings.test_fraction)?;
    if settings.kernels.is_empty() {
        return Err(SVMError::InvalidArgument(
            "no kernels selected for training".to_string(),
        ));
    }

    info!(
        "Generating {} candidates (seed {})",
        settings.dataset_size, settings.random_seed
    );
    let generated = CandidateGenerator::new(settings.random_seed)
        .with_reference_year(settings.reference_year)
        .generate(settings.dataset_size)?;

    // Train on exactly what the saved file will hold
    let mut csv_bytes = Vec::new();
    write_dataset(&generated, &mut csv_bytes)?;
    let dataset = read_dataset(csv_bytes.as_slice())?;

    let split = split_and_scale(&dataset, settings.test_fraction, settings.random_seed)?;
    let models = Trainer::new().train(&split.train_features, &split.train_labels, &settings.kernels)?;
    let reports = evaluate(&models, &split.test_features, &split.test_labels)?;
    let grids = models
        .iter()
        .map(|(&kind, model)| {
            decision_grid(kind, model, &split.train_features, DEFAULT_GRID_RESOLUTION)
        })
        .collect::<Result<Vec<_>>>()?;

    let (kernel, best, accuracy) = select_best(&models, &reports)?;
    let bundle = ModelBundle::new(kernel, accuracy, best.clone(), split.scaler);

    persist(&bundle, settings.model_path())?;

    let dataset_path = settings.dataset_path();
    write_bytes_atomically(&dataset_path, &csv_bytes)?;
    info!(
        "Saved {} candidates to {}",
        dataset.records().len(),
        dataset_path.display()
    );

    let results_dir = settings.results_dir();
    write_reports(&reports, &results_dir)?;
    for grid in &grids {
        write_decision_grid(grid, &results_dir)?;
    }

    Ok(TrainingOutcome { bundle, reports })
}

/// Load the persisted bundle, training a new one if none is usable
pub fn load_or_train(settings: &Settings) -> Result<ModelBundle> {
    let path = settings.model_path();
    if path.exists() {
        match load_bundle(&path) {
            Ok(bundle) => {
                info!("Loaded existing {} model from {}", bundle.kernel, path.display());
                return Ok(bundle);
            }
            Err(err) => warn!("Could not load {}: {err}; retraining", path.display()),
        }
    }
    run_training(settings).map(|outcome| outcome.bundle)
}
