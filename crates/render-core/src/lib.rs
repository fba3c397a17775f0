//! Core export abstractions for PDF generation.
//!
//! This crate provides the pieces shared by every export backend:
//! - HTML serialization of a report, one section per page
//! - `ExportRequest` validation and filename normalization
//! - `PdfConverter` / `FallbackRenderer` traits and the HTTP converter
//! - `Exporter`, which degrades to a fallback PDF when conversion fails

mod error;
mod exporter;
pub mod html;
mod http;
mod request;
mod traits;
pub mod utils;

pub use error::{ExportError, RenderError};
pub use exporter::{ExportOutcome, Exporter};
pub use html::{HtmlOptions, render_document_html};
pub use http::{HttpConverterConfig, HttpPdfConverter};
pub use request::{ExportRequest, pdf_filename};
pub use traits::{FallbackRenderer, PdfConverter};
