use crate::error::{Result, ServiceError};
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
};
use folio::pdf::{assemble_raster_pdf, RasterPage};
use folio::render_core::{pdf_filename, ExportRequest};

/// Set on responses carrying the fallback document instead of a conversion.
pub const DEGRADED_HEADER: &str = "x-folio-degraded";

/// Multipart `html`, `filename`, `isMultiPage` -> `application/pdf`.
///
/// Conversion failures still answer 200 with the fallback PDF; only a
/// missing `html` field is rejected.
pub async fn generate_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut html = None;
    let mut filename = String::new();
    let mut is_multi_page = false;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("html") => html = Some(field.text().await?),
            Some("filename") => filename = field.text().await?,
            Some("isMultiPage") => is_multi_page = field.text().await?.trim() == "true",
            _ => {}
        }
    }

    let request = ExportRequest::new(html.unwrap_or_default(), &filename, is_multi_page)?;
    tracing::info!(
        "PDF export '{}' ({} bytes of HTML, multi-page: {})",
        request.filename,
        request.html.len(),
        request.is_multi_page
    );

    let outcome = state.exporter.export(&request).await?;
    if outcome.degraded {
        tracing::warn!(
            "Served fallback PDF for '{}': {}",
            outcome.filename,
            outcome.reason.as_deref().unwrap_or("unknown")
        );
    }

    Ok(pdf_response(&outcome.filename, outcome.bytes, outcome.degraded))
}

/// Multipart with one `page` part per JPEG, in order, plus an optional
/// `filename`. Assembles them into a single PDF.
pub async fn assemble_pdf(mut multipart: Multipart) -> Result<impl IntoResponse> {
    let mut pages = Vec::new();
    let mut filename = String::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("page") => {
                let bytes = field.bytes().await?;
                let page = RasterPage::from_jpeg(bytes.to_vec()).map_err(|e| {
                    ServiceError::InvalidRequest(format!("page {}: {}", pages.len() + 1, e))
                })?;
                pages.push(page);
            }
            Some("filename") => filename = field.text().await?,
            _ => {}
        }
    }

    if pages.is_empty() {
        return Err(ServiceError::InvalidRequest("at least one page is required".into()));
    }

    let bytes = tokio::task::spawn_blocking(move || assemble_raster_pdf(&pages))
        .await
        .map_err(|e| ServiceError::Internal(e.to_string()))??;
    tracing::info!("Assembled raster PDF ({} bytes)", bytes.len());

    Ok(pdf_response(&pdf_filename(&filename), bytes, false))
}

fn pdf_response(filename: &str, bytes: Vec<u8>, degraded: bool) -> impl IntoResponse {
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment; filename=\"report.pdf\""));
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
            (
                HeaderName::from_static(DEGRADED_HEADER),
                HeaderValue::from_static(if degraded { "true" } else { "false" }),
            ),
        ],
        bytes,
    )
}
