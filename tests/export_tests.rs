mod common;

use async_trait::async_trait;
use common::{GeneratedPdf, TestResult, init_logging, jpeg_stub, sample_header, two_page_report};
use folio::pdf::{LopdfFallback, RasterPage, assemble_raster_pdf};
use folio::render_core::html::count_page_sections;
use folio::render_core::{ExportError, ExportRequest, Exporter, HtmlOptions, PdfConverter};
use std::sync::Arc;

/// Fails every conversion with the configured error.
struct DownConverter(fn() -> ExportError);

#[async_trait]
impl PdfConverter for DownConverter {
    async fn convert(&self, _request: &ExportRequest) -> Result<Vec<u8>, ExportError> {
        Err((self.0)())
    }

    fn name(&self) -> &'static str {
        "DownConverter"
    }
}

fn report_request() -> Result<ExportRequest, ExportError> {
    ExportRequest::for_report(&sample_header(), &two_page_report(), &HtmlOptions::default())
}

#[test]
fn test_report_html_has_one_section_per_page() -> TestResult {
    let request = report_request()?;
    assert_eq!(count_page_sections(&request.html), 2);
    assert_eq!(request.filename, "roof-survey-p-204.pdf");
    assert!(request.is_multi_page);
    assert!(request.html.contains("https://img.example/boiler.jpg"));
    assert!(request.html.contains("Roof Coverings"));
    Ok(())
}

#[tokio::test]
async fn test_unreachable_converter_serves_fallback_pdf() -> TestResult {
    init_logging();
    let exporter = Exporter::new(
        Arc::new(DownConverter(|| ExportError::Unreachable("connection refused".into()))),
        Arc::new(LopdfFallback),
    );

    let outcome = exporter.export(&report_request()?).await?;
    assert!(outcome.degraded);
    assert_eq!(outcome.filename, "roof-survey-p-204.pdf");

    let pdf = GeneratedPdf::from_bytes(outcome.bytes)?;
    assert_eq!(pdf.page_count(), 1);
    assert!(pdf.text().contains(Exporter::FALLBACK_TITLE));
    Ok(())
}

#[tokio::test]
async fn test_missing_html_is_not_degraded() {
    let exporter = Exporter::new(
        Arc::new(DownConverter(|| ExportError::Timeout)),
        Arc::new(LopdfFallback),
    );
    let request = ExportRequest {
        html: "   ".into(),
        filename: "report.pdf".into(),
        is_multi_page: false,
    };
    assert!(matches!(
        exporter.export(&request).await,
        Err(ExportError::MissingHtml)
    ));
}

#[test]
fn test_raster_pages_assemble_in_order() -> TestResult {
    let pages = vec![
        RasterPage::from_jpeg(jpeg_stub(816, 1056))?,
        RasterPage::from_jpeg(jpeg_stub(1056, 816))?,
        RasterPage::from_jpeg(jpeg_stub(816, 1056))?,
    ];
    assert_eq!((pages[1].width, pages[1].height), (1056, 816));

    let pdf = GeneratedPdf::from_bytes(assemble_raster_pdf(&pages)?)?;
    assert_eq!(pdf.page_count(), 3);
    assert!(pdf.bytes.starts_with(b"%PDF-"));
    Ok(())
}
