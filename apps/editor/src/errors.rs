use std::any::Any;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::binder::BindError;
use crate::store::entries::EntryError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Binding error: {0}")]
    Bind(#[from] BindError),

    #[error("Entry error: {0}")]
    Entry(#[from] EntryError),

    #[error("Rejected request: {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Cloud not configured")]
    CloudNotConfigured,

    #[error("Not implemented")]
    NotImplemented,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Bind(BindError::Path(e)) => {
                (StatusCode::BAD_REQUEST, "INVALID_PATH", e.to_string())
            }
            AppError::Bind(BindError::NotInitialized) => {
                tracing::error!("Field edit received before the binder was initialized");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "NOT_READY",
                    "The editor is not ready yet".to_string(),
                )
            }
            AppError::Entry(e @ EntryError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", e.to_string())
            }
            AppError::Entry(e @ EntryError::DuplicateId { .. }) => {
                (StatusCode::BAD_REQUEST, "DUPLICATE_ID", e.to_string())
            }
            AppError::Entry(e @ EntryError::IdExhausted { .. }) => {
                (StatusCode::CONFLICT, "ID_EXHAUSTED", e.to_string())
            }
            AppError::Rejected { status, message } => {
                (*status, "INVALID_REQUEST", message.clone())
            }
            AppError::CloudNotConfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                "CLOUD_NOT_CONFIGURED",
                "Cloud not configured".to_string(),
            ),
            AppError::NotImplemented => (
                StatusCode::NOT_IMPLEMENTED,
                "NOT_IMPLEMENTED",
                "This endpoint is not yet implemented".to_string(),
            ),
        };

        error_response(status, code, message)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// Last-resort handler for a panic inside a request. The panic is logged and
/// turned into a 500; the service keeps running.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!("App error: request handler panicked: {detail}");

    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn error_response(status: StatusCode, code: &str, message: String) -> Response {
    let body = Json(json!({
        "error": {
            "code": code,
            "message": message
        }
    }));

    (status, body).into_response()
}
