use crate::error::{Result, ServiceError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use folio::editor::PhotoStore;
use folio::types::Photo;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub saved: bool,
}

/// Workspace names become storage key prefixes, so keep them to a safe alphabet.
fn store_for(state: &AppState, workspace: &str) -> Result<PhotoStore> {
    let valid = !workspace.is_empty()
        && workspace.len() <= 64
        && workspace
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(ServiceError::InvalidRequest(format!(
            "invalid workspace name '{}'",
            workspace
        )));
    }
    Ok(PhotoStore::new(state.storage.clone(), workspace))
}

/// Returns the workspace's photo library, or the seed set on first use.
pub async fn load_photos(
    State(state): State<AppState>,
    Path(workspace): Path<String>,
) -> Result<Json<Vec<Photo>>> {
    let store = store_for(&state, &workspace)?;
    let photos = tokio::task::spawn_blocking(move || store.load())
        .await
        .map_err(|e| ServiceError::Internal(e.to_string()))?;
    Ok(Json(photos))
}

/// Replaces the workspace's photo library. A rejected write answers
/// `{saved: false}` rather than an error status.
pub async fn save_photos(
    State(state): State<AppState>,
    Path(workspace): Path<String>,
    Json(photos): Json<Vec<Photo>>,
) -> Result<Json<SaveResponse>> {
    let store = store_for(&state, &workspace)?;
    let count = photos.len();
    let saved = tokio::task::spawn_blocking(move || store.save(&photos))
        .await
        .map_err(|e| ServiceError::Internal(e.to_string()))?;
    if saved {
        tracing::info!("Saved {} photos for workspace '{}'", count, workspace);
    } else {
        tracing::warn!("Photo save rejected for workspace '{}'", workspace);
    }
    Ok(Json(SaveResponse { saved }))
}
