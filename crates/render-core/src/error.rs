use thiserror::Error;

/// Failure while producing PDF bytes locally.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("Invalid raster page {index}: {reason}")]
    InvalidRaster { index: usize, reason: String },
    #[error("Other rendering error: {0}")]
    Other(String),
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}

impl From<&str> for RenderError {
    fn from(s: &str) -> Self {
        RenderError::Other(s.to_string())
    }
}

/// Failure of the export pipeline.
///
/// Everything except `MissingHtml` and `Render` is recoverable: the exporter
/// degrades to a fallback document instead of surfacing it.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No HTML content was provided for export")]
    MissingHtml,
    #[error("Conversion service returned {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("Conversion service unreachable: {0}")]
    Unreachable(String),
    #[error("Conversion service timed out")]
    Timeout,
    #[error("Conversion service is not configured: {0}")]
    NotConfigured(String),
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl ExportError {
    /// Whether the exporter should fall back rather than fail.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ExportError::MissingHtml | ExportError::Render(_))
    }
}

impl From<reqwest::Error> for ExportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ExportError::Timeout
        } else if let Some(status) = err.status() {
            ExportError::Upstream {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            ExportError::Unreachable(err.to_string())
        }
    }
}
