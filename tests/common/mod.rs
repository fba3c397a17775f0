use folio::idf::from_markdown;
use folio::types::{EmbeddedImage, PageType, ReportHeader, ReportPage};
use lopdf::Document as LopdfDocument;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Concatenated text of every page
    pub fn text(&self) -> String {
        let pages: Vec<u32> = self.doc.get_pages().keys().copied().collect();
        self.doc.extract_text(&pages).unwrap_or_default()
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn sample_header() -> ReportHeader {
    ReportHeader {
        company_name: "Acme Surveying".into(),
        document_title: "Roof Survey".into(),
        project_number: "P-204".into(),
        ..Default::default()
    }
}

/// A standard page with two images followed by an empty photo appendix.
pub fn two_page_report() -> Vec<ReportPage> {
    let mut first = ReportPage::new(PageType::Standard).with_content(from_markdown(
        "# Roof Coverings\nSlates are sound.\n# HVAC System\nBoiler serviced in 2023.",
    ));
    first.images = vec![
        EmbeddedImage::new("https://img.example/roof.jpg", 400, 300),
        EmbeddedImage::new("https://img.example/boiler.jpg", 400, 300),
    ];
    vec![first, ReportPage::new(PageType::PhotoAppendix)]
}

/// Minimal baseline JPEG header: SOI, SOF0 with the given size, EOI.
pub fn jpeg_stub(width: u16, height: u16) -> Vec<u8> {
    let [h1, h0] = height.to_be_bytes();
    let [w1, w0] = width.to_be_bytes();
    vec![
        0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x11, 0x08, h1, h0, w1, w0, 0x03, 0xFF, 0xD9,
    ]
}
