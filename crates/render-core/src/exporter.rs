use crate::error::ExportError;
use crate::request::ExportRequest;
use crate::traits::{FallbackRenderer, PdfConverter};
use std::sync::Arc;

/// The result of an export. `degraded` is set when the bytes are the
/// fallback document rather than a real conversion.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub degraded: bool,
    pub reason: Option<String>,
}

/// Runs a conversion and degrades to a fallback PDF on recoverable failure.
#[derive(Clone)]
pub struct Exporter {
    converter: Arc<dyn PdfConverter>,
    fallback: Arc<dyn FallbackRenderer>,
}

impl Exporter {
    pub const FALLBACK_TITLE: &'static str = "PDF generation unavailable";

    pub fn new(converter: Arc<dyn PdfConverter>, fallback: Arc<dyn FallbackRenderer>) -> Self {
        Self {
            converter,
            fallback,
        }
    }

    pub async fn export(&self, request: &ExportRequest) -> Result<ExportOutcome, ExportError> {
        if request.html.trim().is_empty() {
            return Err(ExportError::MissingHtml);
        }

        match self.converter.convert(request).await {
            Ok(bytes) => Ok(ExportOutcome {
                bytes,
                filename: request.filename.clone(),
                degraded: false,
                reason: None,
            }),
            Err(err) if err.is_recoverable() => {
                log::warn!(
                    "{} failed for '{}', serving fallback PDF: {}",
                    self.converter.name(),
                    request.filename,
                    err
                );
                let message = format!(
                    "The PDF conversion service could not process this report ({err}). \
                     Please try again later."
                );
                let bytes = self.fallback.fallback_pdf(Self::FALLBACK_TITLE, &message)?;
                Ok(ExportOutcome {
                    bytes,
                    filename: request.filename.clone(),
                    degraded: true,
                    reason: Some(err.to_string()),
                })
            }
            Err(err) => Err(err),
        }
    }
}

impl std::fmt::Debug for Exporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exporter")
            .field("converter", &self.converter.name())
            .finish()
    }
}
