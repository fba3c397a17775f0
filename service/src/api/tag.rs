use crate::error::{Result, ServiceError};
use crate::state::AppState;
use axum::{extract::State, Json};
use folio::gateway::{TagRequest, TagResponse};
use serde_json::Value;

/// `{imageData, headingContext?, documentType?}` -> `{tags}`.
///
/// Provider failures yield the generic tag set; only a missing image is
/// rejected.
pub async fn tag_image(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<TagResponse>> {
    // Parse by hand so a missing imageData is a 400 with our error body
    let req: TagRequest = serde_json::from_value(body)
        .map_err(|_| ServiceError::InvalidRequest("imageData is required".into()))?;
    let response = state.gateway.tag(&req).await?;
    tracing::info!("Tagged image with {} tags", response.tags.len());
    Ok(Json(response))
}
