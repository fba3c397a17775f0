use crate::error::{ExportError, RenderError};
use crate::request::ExportRequest;
use async_trait::async_trait;

/// Converts an HTML payload into PDF bytes, usually by calling out to a
/// conversion service.
#[async_trait]
pub trait PdfConverter: Send + Sync {
    async fn convert(&self, request: &ExportRequest) -> Result<Vec<u8>, ExportError>;

    /// Returns a human-readable name for this converter (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// Produces a minimal local PDF when conversion is unavailable.
pub trait FallbackRenderer: Send + Sync {
    fn fallback_pdf(&self, title: &str, message: &str) -> Result<Vec<u8>, RenderError>;
}
