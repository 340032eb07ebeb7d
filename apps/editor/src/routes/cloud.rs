use axum::{extract::State, http::StatusCode};
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/cloud/save
pub async fn handle_cloud_save(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    cloud_stub(&state, "save")
}

/// POST /api/v1/cloud/load
pub async fn handle_cloud_load(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    cloud_stub(&state, "load")
}

// Remote persistence has no request/response contract yet.
fn cloud_stub(state: &AppState, action: &str) -> Result<StatusCode, AppError> {
    match &state.config.cloud_url {
        None => Err(AppError::CloudNotConfigured),
        Some(url) => {
            info!("Cloud {action} requested against {url}");
            Err(AppError::NotImplemented)
        }
    }
}
