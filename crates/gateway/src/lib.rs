//! AI enhancement gateway.
//!
//! Browsers never talk to a model provider directly. Requests pass through
//! [`Gateway`], which validates them, shrinks attached photos under an
//! [`ImageBudget`] and forwards them to an [`AiProvider`] that holds the
//! server-side API key.

mod error;
mod gateway;
pub mod image_prep;
pub mod prompts;
mod provider;
mod request;
mod tagging;

pub use error::GatewayError;
pub use gateway::Gateway;
pub use image_prep::{ImageBudget, PreparedImage, parse_data_url, prepare_data_url, prepare_image};
pub use provider::{AiConfig, AiProvider, OpenAiCompatibleProvider, extract_content};
pub use request::{EnhanceRequest, EnhanceResponse, ErrorBody, TagRequest, TagResponse};
pub use tagging::{GENERIC_TAGS, generic_tags, parse_tags};

pub use folio_executor::{SettleExecutor, Settled};

use std::sync::Arc;

/// Enhances every request concurrently with default settings.
pub async fn enhance_all(
    provider: Arc<dyn AiProvider>,
    requests: &[EnhanceRequest],
) -> Settled<EnhanceResponse, GatewayError> {
    Gateway::new(provider).enhance_all(requests).await
}
