use crate::error::GatewayError;
use crate::request::{EnhanceRequest, EnhanceResponse};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;

/// A hosted text/vision completion API.
#[async_trait]
pub trait AiProvider: Send + Sync {
    async fn complete(&self, request: &EnhanceRequest) -> Result<EnhanceResponse, GatewayError>;

    /// Returns a human-readable name for this provider (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// Settings for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub endpoint: String,
    /// Bearer key. Read server-side only.
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".into(),
            api_key: None,
            model: "gpt-4o-mini".into(),
            max_tokens: 1024,
            timeout_secs: 60,
        }
    }
}

/// Calls any endpoint speaking the chat-completions protocol.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleProvider {
    client: reqwest::Client,
    config: AiConfig,
}

impl OpenAiCompatibleProvider {
    pub fn new(config: AiConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::NotConfigured(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Builds the chat-completions request body.
    pub fn request_body(&self, request: &EnhanceRequest) -> Value {
        let mut messages = Vec::new();
        if !request.system_prompt.trim().is_empty() {
            messages.push(json!({ "role": "system", "content": request.system_prompt }));
        }
        let user = match request.photo() {
            Some(url) => json!({
                "role": "user",
                "content": [
                    { "type": "text", "text": request.user_prompt },
                    { "type": "image_url", "image_url": { "url": url } },
                ],
            }),
            None => json!({ "role": "user", "content": request.user_prompt }),
        };
        messages.push(user);

        json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "messages": messages,
        })
    }
}

#[async_trait]
impl AiProvider for OpenAiCompatibleProvider {
    async fn complete(&self, request: &EnhanceRequest) -> Result<EnhanceResponse, GatewayError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| GatewayError::NotConfigured("no AI API key".into()))?;

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&self.request_body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Provider {
                status: status.as_u16(),
                message: provider_error_message(&body),
            });
        }

        let body: Value = response.json().await?;
        let content = extract_content(&body)?;
        Ok(EnhanceResponse { content })
    }

    fn name(&self) -> &'static str {
        "OpenAiCompatibleProvider"
    }
}

/// Pulls `choices[0].message.content` out of a completion response.
pub fn extract_content(body: &Value) -> Result<String, GatewayError> {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .ok_or_else(|| GatewayError::MalformedResponse("missing choices[0].message.content".into()))
}

/// Providers report errors as `{"error": {"message": ...}}`; fall back to the raw body.
fn provider_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.chars().take(500).collect())
}
