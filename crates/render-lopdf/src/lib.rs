//! Local PDF generation using lopdf.
//!
//! This crate covers the two exports that never leave the process: the
//! fallback page served when the conversion service fails, and assembly of
//! client-rasterized page images into a multi-page PDF.

mod fallback;
mod raster;
mod writer;

pub use fallback::{LopdfFallback, fallback_pdf};
pub use raster::{RasterOptions, RasterPage, assemble_raster_pdf, assemble_raster_pdf_with};
pub use writer::PdfBuilder;
