use crate::error::{Result, ServiceError};
use crate::state::AppState;
use axum::{extract::State, Json};
use folio::gateway::{EnhanceRequest, EnhanceResponse};
use serde::Serialize;
use serde_json::Value;

/// Single completion: `{systemPrompt, userPrompt, includePhoto, photoData?}` -> `{content}`.
pub async fn enhance(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<EnhanceResponse>> {
    let req: EnhanceRequest = serde_json::from_value(body)
        .map_err(|e| ServiceError::InvalidRequest(e.to_string()))?;
    tracing::info!(
        "Enhance request ({} prompt chars, photo: {})",
        req.user_prompt.len(),
        req.include_photo
    );
    let response = state.gateway.enhance(&req).await?;
    Ok(Json(response))
}

/// One entry per batch request, in request order.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchItem {
    Ok { content: String },
    Err { error: String },
}

/// Runs several completions concurrently. Failures are reported per item
/// and never fail the batch.
pub async fn enhance_batch(
    State(state): State<AppState>,
    Json(requests): Json<Vec<EnhanceRequest>>,
) -> Json<Vec<BatchItem>> {
    let settled = state.gateway.enhance_all(&requests).await;
    tracing::info!(
        "Enhance batch of {}: {} succeeded",
        settled.len(),
        settled.success_count()
    );
    let items = settled
        .into_results()
        .into_iter()
        .map(|result| match result {
            Ok(response) => BatchItem::Ok {
                content: response.content,
            },
            Err(e) => BatchItem::Err {
                error: e.to_string(),
            },
        })
        .collect();
    Json(items)
}
