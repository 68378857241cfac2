//! HTTP API tests driven through the router without a socket

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use hiring_svm::server::{create_router, AppState};
use hiring_svm::{run_training, PredictionService, Settings};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

fn settings(dir: &TempDir) -> Settings {
    Settings {
        dataset_size: 120,
        ..Settings::default()
    }
    .with_project_root(dir.path())
}

/// Router with a freshly trained model installed
fn trained_app(dir: &TempDir) -> Router {
    let settings = settings(dir);
    let outcome = run_training(&settings).expect("Training should succeed");
    let service = PredictionService::with_bundle(outcome.bundle);
    create_router(AppState::new(service, settings))
}

fn empty_app(dir: &TempDir) -> Router {
    create_router(AppState::new(PredictionService::new(), settings(dir)))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("request failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

#[tokio::test]
async fn test_root_lists_endpoints() {
    let dir = TempDir::new().expect("temp dir");
    let (status, body) = send(empty_app(&dir), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["endpoints"]["POST /predict"].is_string());
    assert!(body["endpoints"]["POST /train"].is_string());
}

#[tokio::test]
async fn test_predict_candidate() {
    let dir = TempDir::new().expect("temp dir");
    let (status, body) = send(
        trained_app(&dir),
        post_json(
            "/predict",
            json!({"experience_years": 3.5, "technical_score": 75.0}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let prediction = body["prediction"].as_u64().expect("prediction");
    assert!(prediction <= 1);
    let expected = if prediction == 1 { "Rejected" } else { "Hired" };
    assert_eq!(body["result"], expected);
    assert!(body["confidence"].as_f64().expect("confidence") >= 0.0);
}

#[tokio::test]
async fn test_predict_out_of_range() {
    let dir = TempDir::new().expect("temp dir");
    let app = trained_app(&dir);

    let (status, body) = send(
        app.clone(),
        post_json(
            "/predict",
            json!({"experience_years": 12.0, "technical_score": 50.0}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
    assert!(body["message"].is_string());

    let (status, _) = send(
        app,
        post_json(
            "/predict",
            json!({"experience_years": 10.0, "technical_score": 100.0}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_predict_malformed_body() {
    let dir = TempDir::new().expect("temp dir");
    let (status, body) = send(
        trained_app(&dir),
        post_json("/predict", json!({"experience_years": "three"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_predict_without_model() {
    let dir = TempDir::new().expect("temp dir");
    let (status, body) = send(
        empty_app(&dir),
        post_json(
            "/predict",
            json!({"experience_years": 3.5, "technical_score": 75.0}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_train_installs_model() {
    let dir = TempDir::new().expect("temp dir");
    let app = empty_app(&dir);

    let request = Request::builder()
        .method("POST")
        .uri("/train")
        .body(Body::empty())
        .expect("request");
    let (status, body) = send(app.clone(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());
    assert!((0.0..=1.0).contains(&body["accuracy"].as_f64().expect("accuracy")));
    assert!(["linear", "rbf", "polynomial", "sigmoid"]
        .contains(&body["kernel"].as_str().expect("kernel")));

    let (status, health) = send(app.clone(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["model_loaded"], true);

    let (status, model) = send(app.clone(), get("/model")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(model["kernel"], body["kernel"]);
    assert_eq!(model["training_samples"], 96);

    let (status, reports) = send(app.clone(), get("/reports")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reports.as_array().expect("rows").len(), 4);

    let (status, summary) = send(app, get("/dataset/summary")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["count"], 120);
    assert!((0.0..=1.0).contains(&summary["rejection_rate"].as_f64().expect("rate")));
}

#[tokio::test]
async fn test_model_details() {
    let dir = TempDir::new().expect("temp dir");
    let (status, model) = send(trained_app(&dir), get("/model")).await;
    assert_eq!(status, StatusCode::OK);

    let details = &model["model"];
    let n_support_vectors = details["n_support_vectors"].as_u64().expect("count");
    assert!(n_support_vectors > 0);
    assert_eq!(
        details["support_vector_indices"].as_array().expect("indices").len() as u64,
        n_support_vectors
    );
    assert!(details["bias"].is_number());
    assert!(details["kernel"]["type"].is_string());
}

#[tokio::test]
async fn test_corrupt_dataset_is_server_error() {
    let dir = TempDir::new().expect("temp dir");
    let settings = settings(&dir);
    let path = settings.dataset_path();
    std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    std::fs::write(&path, "experience_years,technical_score,label\n1,50,7\n").expect("write");

    let (status, body) = send(empty_app(&dir), get("/dataset/summary")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], true);
    assert!(body["message"].as_str().expect("message").contains("label"));
}

#[tokio::test]
async fn test_failed_train_keeps_previous_model() {
    let dir = TempDir::new().expect("temp dir");
    let good = settings(&dir);
    let outcome = run_training(&good).expect("Training should succeed");
    let kernel = outcome.bundle.kernel;

    let bad = Settings {
        dataset_size: 0,
        ..good
    };
    let app = create_router(AppState::new(
        PredictionService::with_bundle(outcome.bundle),
        bad,
    ));

    let request = Request::builder()
        .method("POST")
        .uri("/train")
        .body(Body::empty())
        .expect("request");
    let (status, body) = send(app.clone(), request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], true);

    let (status, model) = send(app, get("/model")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(model["kernel"], kernel.as_str());
}

#[tokio::test]
async fn test_model_and_reports_before_training() {
    let dir = TempDir::new().expect("temp dir");
    let app = empty_app(&dir);

    let (status, _) = send(app.clone(), get("/model")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, body) = send(app.clone(), get("/reports")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], true);

    let (status, health) = send(app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["model_loaded"], false);
}
