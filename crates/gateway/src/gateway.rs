use crate::error::GatewayError;
use crate::image_prep::{ImageBudget, prepare_data_url};
use crate::prompts::tagging_prompt;
use crate::provider::AiProvider;
use crate::request::{EnhanceRequest, EnhanceResponse, TagRequest, TagResponse};
use crate::tagging::{generic_tags, parse_tags};
use folio_executor::{SettleExecutor, Settled};
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;

/// Validates requests, shrinks attached photos and forwards them to a provider.
#[derive(Clone)]
pub struct Gateway {
    provider: Arc<dyn AiProvider>,
    budget: ImageBudget,
    executor: SettleExecutor,
}

impl Gateway {
    pub fn new(provider: Arc<dyn AiProvider>) -> Self {
        Self {
            provider,
            budget: ImageBudget::default(),
            executor: SettleExecutor::default(),
        }
    }

    pub fn with_budget(mut self, budget: ImageBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_executor(mut self, executor: SettleExecutor) -> Self {
        self.executor = executor;
        self
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub async fn enhance(&self, request: &EnhanceRequest) -> Result<EnhanceResponse, GatewayError> {
        request.validate()?;
        let prepared = self.prepare(request).await?;
        self.provider.complete(&prepared).await
    }

    /// Data-URL photos are re-encoded under the budget; remote URLs pass through.
    ///
    /// Decoding and re-encoding run on the blocking pool.
    async fn prepare(&self, request: &EnhanceRequest) -> Result<EnhanceRequest, GatewayError> {
        let Some(photo) = request.photo() else {
            return Ok(request.clone());
        };
        if !photo.trim_start().starts_with("data:") {
            return Ok(request.clone());
        }
        let photo = photo.to_string();
        let budget = self.budget.clone();
        let photo_data = tokio::task::spawn_blocking(move || prepare_data_url(&photo, &budget))
            .await
            .map_err(|e| GatewayError::Internal(format!("image preparation task failed: {e}")))??;
        Ok(EnhanceRequest {
            photo_data: Some(photo_data),
            ..request.clone()
        })
    }

    /// Tags an image. Only a missing image is an error; every provider or
    /// parse failure yields the generic tags.
    pub async fn tag(&self, request: &TagRequest) -> Result<TagResponse, GatewayError> {
        if request.image_data.trim().is_empty() {
            return Err(GatewayError::InvalidRequest("imageData is required".into()));
        }
        let prompt = tagging_prompt(
            &request.image_data,
            request.heading_context.as_deref(),
            request.document_type.as_deref(),
        );
        let tags = match self.enhance(&prompt).await {
            Ok(response) => parse_tags(&response.content).unwrap_or_else(|| {
                log::warn!("Unparseable tag output, using generic tags");
                generic_tags()
            }),
            Err(e) => {
                log::warn!("Tagging failed, using generic tags: {}", e);
                generic_tags()
            }
        };
        Ok(TagResponse { tags })
    }

    /// Runs every request concurrently and keeps each outcome in input order.
    pub async fn enhance_all(
        &self,
        requests: &[EnhanceRequest],
    ) -> Settled<EnhanceResponse, GatewayError> {
        let futures: Vec<BoxFuture<'static, Result<EnhanceResponse, GatewayError>>> = requests
            .iter()
            .map(|request| {
                let gateway = self.clone();
                let request = request.clone();
                async move { gateway.enhance(&request).await }.boxed()
            })
            .collect();
        self.executor.settle_all(futures).await
    }
}
