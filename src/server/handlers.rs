//! Request handlers

use super::error::{ApiError, ApiResult};
use super::AppState;
use crate::data::{load_dataset, DatasetSummary};
use crate::evaluation::{read_summary, SummaryRow};
use crate::kernel::KernelKind;
use crate::pipeline::run_training;
use crate::service::CandidatePrediction;
use crate::trainer::ModelInfo;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Candidate screening API",
        "version": crate::VERSION,
        "endpoints": {
            "GET /": "This description",
            "POST /predict": "Classify a candidate from experience_years (0-10) and technical_score (0-100)",
            "POST /train": "Regenerate data, retrain every kernel and install the best model",
            "GET /health": "Service status",
            "GET /model": "Details of the active model",
            "GET /reports": "Summary table of the last training run",
            "GET /dataset/summary": "Statistics of the current dataset",
        }
    }))
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub experience_years: f64,
    pub technical_score: f64,
}

pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> ApiResult<Json<CandidatePrediction>> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let prediction = state
        .service
        .predict(request.experience_years, request.technical_score)
        .map_err(ApiError::from_client_input)?;
    Ok(Json(prediction))
}

#[derive(Debug, Serialize)]
pub struct TrainResponse {
    pub message: &'static str,
    pub accuracy: f64,
    pub kernel: KernelKind,
}

/// Retrain on a blocking thread; the previous model stays active on failure
pub async fn train(State(state): State<AppState>) -> ApiResult<Json<TrainResponse>> {
    let service = state.service.clone();
    let settings = state.settings.clone();

    let bundle = tokio::task::spawn_blocking(move || {
        service.retrain(|| run_training(&settings).map(|outcome| outcome.bundle))
    })
    .await?
    .map_err(ApiError::internal)?;

    info!("Retrained: {} kernel, accuracy {:.4}", bundle.kernel, bundle.accuracy);
    Ok(Json(TrainResponse {
        message: "Model retrained successfully",
        accuracy: bundle.accuracy,
        kernel: bundle.kernel,
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    model_loaded: bool,
    timestamp: i64,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: crate::VERSION,
        model_loaded: state.service.is_loaded(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}

#[derive(Debug, Serialize)]
pub struct ModelResponse {
    pub kernel: KernelKind,
    pub accuracy: f64,
    pub training_samples: usize,
    pub library_version: String,
    pub created_at: String,
    pub model: ModelInfo,
}

pub async fn model(State(state): State<AppState>) -> ApiResult<Json<ModelResponse>> {
    let bundle = state
        .service
        .current()
        .ok_or(crate::core::SVMError::ModelNotLoaded)?;
    Ok(Json(ModelResponse {
        kernel: bundle.kernel,
        accuracy: bundle.accuracy,
        training_samples: bundle.metadata.training_samples,
        library_version: bundle.metadata.library_version.clone(),
        created_at: bundle.metadata.created_at.clone(),
        model: ModelInfo::of(&bundle.model),
    }))
}

pub async fn reports(State(state): State<AppState>) -> ApiResult<Json<Vec<SummaryRow>>> {
    let dir = state.settings.results_dir();
    let rows = tokio::task::spawn_blocking(move || read_summary(dir)).await??;
    Ok(Json(rows))
}

pub async fn dataset_summary(State(state): State<AppState>) -> ApiResult<Json<DatasetSummary>> {
    let path = state.settings.dataset_path();
    let summary = tokio::task::spawn_blocking(move || {
        load_dataset(path).and_then(|dataset| DatasetSummary::from_dataset(&dataset))
    })
    .await??;
    Ok(Json(summary))
}
