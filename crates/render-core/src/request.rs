use crate::error::ExportError;
use crate::html::{HtmlOptions, render_document_html};
use folio_types::{ReportHeader, ReportPage};

const DEFAULT_STEM: &str = "report";

/// The payload handed to a PDF converter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub html: String,
    /// Slugified, always ending in `.pdf`.
    pub filename: String,
    pub is_multi_page: bool,
}

impl ExportRequest {
    /// Validates the payload and normalizes `filename`.
    pub fn new(
        html: impl Into<String>,
        filename: &str,
        is_multi_page: bool,
    ) -> Result<Self, ExportError> {
        let html = html.into();
        if html.trim().is_empty() {
            return Err(ExportError::MissingHtml);
        }
        Ok(Self {
            html,
            filename: pdf_filename(filename),
            is_multi_page,
        })
    }

    /// Builds the request for a whole report, named after its title and project.
    pub fn for_report(
        header: &ReportHeader,
        pages: &[ReportPage],
        options: &HtmlOptions,
    ) -> Result<Self, ExportError> {
        let html = render_document_html(header, pages, options);
        let name = [header.document_title.as_str(), header.project_number.as_str()]
            .iter()
            .filter(|s| !s.trim().is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        Self::new(html, &name, pages.len() > 1)
    }
}

/// Turns a free-form name into a safe `.pdf` filename.
///
/// `"Roof Survey: Block A.pdf"` becomes `"roof-survey-block-a.pdf"`.
/// Names with nothing sluggable fall back to `report.pdf`.
pub fn pdf_filename(name: &str) -> String {
    let trimmed = name.trim();
    let stem = trimmed
        .strip_suffix(".pdf")
        .or_else(|| trimmed.strip_suffix(".PDF"))
        .unwrap_or(trimmed);
    let slug = slug::slugify(stem);
    if slug.is_empty() {
        format!("{DEFAULT_STEM}.pdf")
    } else {
        format!("{slug}.pdf")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_types::PageType;

    #[test]
    fn test_pdf_filename() {
        assert_eq!(pdf_filename("Roof Survey: Block A.pdf"), "roof-survey-block-a.pdf");
        assert_eq!(pdf_filename("report"), "report.pdf");
        assert_eq!(pdf_filename("  "), "report.pdf");
        assert_eq!(pdf_filename("../../etc/passwd"), "etc-passwd.pdf");
        assert_eq!(pdf_filename("Final.PDF"), "final.pdf");
    }

    #[test]
    fn test_blank_html_rejected() {
        assert!(matches!(
            ExportRequest::new("   ", "x", false),
            Err(ExportError::MissingHtml)
        ));
    }

    #[test]
    fn test_for_report() {
        let header = ReportHeader {
            document_title: "Condition Report".into(),
            project_number: "P-17".into(),
            ..Default::default()
        };
        let pages = vec![
            ReportPage::new(PageType::Standard),
            ReportPage::new(PageType::PhotoAppendix),
        ];
        let req = ExportRequest::for_report(&header, &pages, &HtmlOptions::default()).unwrap();
        assert_eq!(req.filename, "condition-report-p-17.pdf");
        assert!(req.is_multi_page);

        let single =
            ExportRequest::for_report(&ReportHeader::default(), &pages[..1], &HtmlOptions::default())
                .unwrap();
        assert_eq!(single.filename, "report.pdf");
        assert!(!single.is_multi_page);
    }
}
