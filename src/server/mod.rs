//! HTTP API
//!
//! | Method | Path               | Purpose                         |
//! |--------|--------------------|---------------------------------|
//! | GET    | `/`                | endpoint listing                |
//! | POST   | `/predict`         | classify one candidate          |
//! | POST   | `/train`           | regenerate data and retrain     |
//! | GET    | `/health`          | liveness and model status       |
//! | GET    | `/model`           | active model details            |
//! | GET    | `/reports`         | last run's summary table        |
//! | GET    | `/dataset/summary` | statistics of the dataset file  |

pub mod error;
pub mod handlers;

pub use self::error::{ApiError, ApiResult};

use crate::config::Settings;
use crate::core::Result;
use crate::pipeline::load_or_train;
use crate::service::PredictionService;
use axum::{
    routing::{get, post},
    Router,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictionService>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(service: PredictionService, settings: Settings) -> Self {
        Self {
            service: Arc::new(service),
            settings: Arc::new(settings),
        }
    }
}

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/predict", post(handlers::predict))
        .route("/train", post(handlers::train))
        .route("/health", get(handlers::health))
        .route("/model", get(handlers::model))
        .route("/reports", get(handlers::reports))
        .route("/dataset/summary", get(handlers::dataset_summary))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Load or train the model, then serve until the process is stopped
pub async fn serve(settings: Settings) -> Result<()> {
    let startup = settings.clone();
    let bundle = tokio::task::spawn_blocking(move || load_or_train(&startup))
        .await
        .map_err(std::io::Error::other)??;
    info!(
        "Serving {} model (accuracy {:.4})",
        bundle.kernel, bundle.accuracy
    );

    let address = settings.bind_address();
    let app = create_router(AppState::new(PredictionService::with_bundle(bundle), settings));

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Listening on http://{address}");
    axum::serve(listener, app).await?;
    Ok(())
}
