use axum::{extract::State, http::StatusCode, response::Html, Json};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::warn;

use crate::binder::form::render_editor_page;
use crate::binder::path::FieldPath;
use crate::binder::{BindError, BoundField};
use crate::errors::AppError;
use crate::models::{ResumePatch, ResumeState};
use crate::state::AppState;
use crate::store::entries::{validate_patch, with_added, with_replaced, without, ListEntry};
use crate::store::Persisted;

use super::extract::{AppJson, AppPath};

/// Reports whether the write behind a response reached storage.
pub const PERSISTED_HEADER: &str = "x-persisted";

type PersistedHeader = [(&'static str, &'static str); 1];

fn persisted_header(persisted: Persisted) -> PersistedHeader {
    match persisted {
        Ok(()) => [(PERSISTED_HEADER, "true")],
        Err(e) => {
            warn!("Resume kept in memory only, persistence failed: {e}");
            [(PERSISTED_HEADER, "false")]
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FieldEdit {
    pub path: String,
    pub value: String,
}

/// GET /
pub async fn handle_editor_page(State(state): State<AppState>) -> Html<String> {
    let fields = {
        let editor = state.editor();
        editor.binder.fields(editor.store.state())
    };
    Html(render_editor_page(&fields, &state.preview.current().html))
}

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<ResumeState> {
    Json(state.editor().store.snapshot())
}

/// PATCH /api/v1/resume
pub async fn handle_patch_resume(
    State(state): State<AppState>,
    AppJson(patch): AppJson<ResumePatch>,
) -> Result<(PersistedHeader, Json<ResumeState>), AppError> {
    if patch.is_empty() {
        return Err(AppError::Validation(
            "Patch must set at least one of personal, experience, education, skills".to_string(),
        ));
    }
    validate_patch(&patch)?;
    let mut editor = state.editor();
    let persisted = editor.store.set_state(patch);
    Ok((persisted_header(persisted), Json(editor.store.snapshot())))
}

/// GET /api/v1/fields
pub async fn handle_get_fields(State(state): State<AppState>) -> Json<Vec<BoundField>> {
    let editor = state.editor();
    Json(editor.binder.fields(editor.store.state()))
}

/// PUT /api/v1/fields
pub async fn handle_put_field(
    State(state): State<AppState>,
    AppJson(edit): AppJson<FieldEdit>,
) -> Result<(PersistedHeader, Json<BoundField>), AppError> {
    let path: FieldPath = edit.path.parse().map_err(BindError::from)?;
    let mut guard = state.editor();
    let editor = &mut *guard;
    let persisted = editor
        .binder
        .handle_change(&mut editor.store, path, edit.value)?;
    let field = BoundField::new(editor.store.state(), path);
    Ok((persisted_header(persisted), Json(field)))
}

/// GET /api/v1/preview
pub async fn handle_get_preview(State(state): State<AppState>) -> Html<String> {
    Html(state.preview.current().html)
}

/// POST /api/v1/resume/{experience,education}
pub async fn handle_add_entry<E>(
    State(state): State<AppState>,
    AppJson(entry): AppJson<E>,
) -> Result<(StatusCode, PersistedHeader, Json<E>), AppError>
where
    E: ListEntry + Serialize + DeserializeOwned + Send + 'static,
{
    let mut editor = state.editor();
    let (entries, stored) = with_added(E::entries(editor.store.state()), entry)?;
    let persisted = editor.store.set_state(E::into_patch(entries));
    Ok((StatusCode::CREATED, persisted_header(persisted), Json(stored)))
}

/// PUT /api/v1/resume/{experience,education}/:id
pub async fn handle_replace_entry<E>(
    State(state): State<AppState>,
    AppPath(id): AppPath<u32>,
    AppJson(mut entry): AppJson<E>,
) -> Result<(PersistedHeader, Json<E>), AppError>
where
    E: ListEntry + Serialize + DeserializeOwned + Send + 'static,
{
    entry.set_id(id);
    let mut editor = state.editor();
    let entries = with_replaced(E::entries(editor.store.state()), id, entry.clone())?;
    let persisted = editor.store.set_state(E::into_patch(entries));
    Ok((persisted_header(persisted), Json(entry)))
}

/// DELETE /api/v1/resume/{experience,education}/:id
pub async fn handle_remove_entry<E>(
    State(state): State<AppState>,
    AppPath(id): AppPath<u32>,
) -> Result<(StatusCode, PersistedHeader), AppError>
where
    E: ListEntry + Send + 'static,
{
    let mut editor = state.editor();
    let entries = without(E::entries(editor.store.state()), id)?;
    let persisted = editor.store.set_state(E::into_patch(entries));
    Ok((StatusCode::NO_CONTENT, persisted_header(persisted)))
}
