//! Error responses

use crate::core::SVMError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde_json::json;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    ServiceUnavailable(String),
    Internal(String),
}

impl ApiError {
    /// Collapse any failure into a 500
    pub fn internal(err: impl std::fmt::Display) -> Self {
        ApiError::Internal(err.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::ServiceUnavailable(msg)
            | ApiError::Internal(msg) => msg,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed ({}): {}", status.as_u16(), self.message());
        }

        let body = Json(json!({
            "error": true,
            "message": self.message(),
        }));

        (status, body).into_response()
    }
}

impl ApiError {
    /// Map a failure while handling client supplied values
    ///
    /// Only here is `InvalidArgument` the caller's fault; elsewhere it comes
    /// from the pipeline and stays a 500.
    pub fn from_client_input(err: SVMError) -> Self {
        match err {
            SVMError::InvalidArgument(_) => ApiError::BadRequest(err.to_string()),
            other => other.into(),
        }
    }
}

impl From<SVMError> for ApiError {
    fn from(err: SVMError) -> Self {
        match err {
            SVMError::ModelNotLoaded => ApiError::ServiceUnavailable(err.to_string()),
            SVMError::IoError(ref io) if io.kind() == std::io::ErrorKind::NotFound => {
                ApiError::NotFound(err.to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("background task failed: {err}"))
    }
}
