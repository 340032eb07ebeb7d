pub mod cloud;
pub mod extract;
pub mod health;
pub mod resume;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::errors::handle_panic;
use crate::models::{EducationEntry, ExperienceEntry};
use crate::state::AppState;

/// The served application: all routes plus the process-wide layers.
pub fn build_app(state: AppState) -> Router {
    with_layers(build_router(state))
}

pub fn with_layers(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(resume::handle_editor_page))
        // Store
        .route(
            "/api/v1/resume",
            get(resume::handle_get_resume).patch(resume::handle_patch_resume),
        )
        .route(
            "/api/v1/resume/experience",
            post(resume::handle_add_entry::<ExperienceEntry>),
        )
        .route(
            "/api/v1/resume/experience/:id",
            put(resume::handle_replace_entry::<ExperienceEntry>)
                .delete(resume::handle_remove_entry::<ExperienceEntry>),
        )
        .route(
            "/api/v1/resume/education",
            post(resume::handle_add_entry::<EducationEntry>),
        )
        .route(
            "/api/v1/resume/education/:id",
            put(resume::handle_replace_entry::<EducationEntry>)
                .delete(resume::handle_remove_entry::<EducationEntry>),
        )
        // Binder
        .route(
            "/api/v1/fields",
            get(resume::handle_get_fields).put(resume::handle_put_field),
        )
        .route("/api/v1/preview", get(resume::handle_get_preview))
        // Remote persistence (stub)
        .route("/api/v1/cloud/save", post(cloud::handle_cloud_save))
        .route("/api/v1/cloud/load", post(cloud::handle_cloud_load))
        .with_state(state)
}
