use crate::error::ExportError;
use crate::request::ExportRequest;
use crate::traits::PdfConverter;
use async_trait::async_trait;
use reqwest::multipart::Form;
use serde::Deserialize;
use std::time::Duration;

/// Settings for the remote HTML->PDF conversion service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConverterConfig {
    /// Conversion endpoint. Empty means "not configured".
    pub endpoint: String,
    /// Sent as a bearer token. Never forwarded to browsers.
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for HttpConverterConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// Converts HTML by POSTing a multipart form to a conversion service.
///
/// The form carries `html`, `filename` and `isMultiPage` (`"true"`/`"false"`).
#[derive(Debug, Clone)]
pub struct HttpPdfConverter {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpPdfConverter {
    pub fn new(config: &HttpConverterConfig) -> Result<Self, ExportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ExportError::NotConfigured(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PdfConverter for HttpPdfConverter {
    async fn convert(&self, request: &ExportRequest) -> Result<Vec<u8>, ExportError> {
        if self.endpoint.trim().is_empty() {
            return Err(ExportError::NotConfigured("no conversion endpoint".into()));
        }

        let form = Form::new()
            .text("html", request.html.clone())
            .text("filename", request.filename.clone())
            .text("isMultiPage", request.is_multi_page.to_string());

        let mut builder = self.client.post(&self.endpoint).multipart(form);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExportError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        log::debug!(
            "Converted '{}' ({} bytes of HTML) into {} bytes of PDF",
            request.filename,
            request.html.len(),
            bytes.len()
        );
        Ok(bytes.to_vec())
    }

    fn name(&self) -> &'static str {
        "HttpPdfConverter"
    }
}
