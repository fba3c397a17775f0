use crate::writer::PdfBuilder;
use folio_render_core::{RenderError, utils};
use folio_types::PhysicalPageSize;
use lopdf::content::{Content, Operation};

/// One page captured as a JPEG, e.g. by a client-side canvas rasterizer.
#[derive(Debug, Clone)]
pub struct RasterPage {
    pub jpeg: Vec<u8>,
    /// Pixel dimensions of the encoded image.
    pub width: u32,
    pub height: u32,
}

impl RasterPage {
    /// Reads the pixel dimensions from the JPEG frame header.
    pub fn from_jpeg(jpeg: Vec<u8>) -> Result<Self, RenderError> {
        let (width, height) = jpeg_dimensions(&jpeg).ok_or_else(|| {
            RenderError::Other("JPEG has no readable frame header".into())
        })?;
        Ok(Self {
            jpeg,
            width,
            height,
        })
    }
}

/// Walks JPEG segments up to the first start-of-frame marker.
fn jpeg_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    if !bytes.starts_with(&[0xFF, 0xD8]) {
        return None;
    }
    let mut pos = 2;
    while pos + 4 <= bytes.len() {
        if bytes[pos] != 0xFF {
            return None;
        }
        let marker = bytes[pos + 1];
        // Fill bytes
        if marker == 0xFF {
            pos += 1;
            continue;
        }
        let len = u16::from_be_bytes([bytes[pos + 2], bytes[pos + 3]]) as usize;
        // SOF0..SOF15 except DHT, JPG and DAC
        if (0xC0..=0xCF).contains(&marker) && !matches!(marker, 0xC4 | 0xC8 | 0xCC) {
            let frame = bytes.get(pos + 5..pos + 9)?;
            let height = u16::from_be_bytes([frame[0], frame[1]]) as u32;
            let width = u16::from_be_bytes([frame[2], frame[3]]) as u32;
            return Some((width, height));
        }
        if marker == 0xDA || len < 2 {
            return None;
        }
        pos += 2 + len;
    }
    None
}

#[derive(Debug, Clone, Copy)]
pub struct RasterOptions {
    pub page_size: PhysicalPageSize,
    pub margin_pt: f32,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            page_size: PhysicalPageSize::LETTER,
            margin_pt: 0.0,
        }
    }
}

/// Assembles one PDF page per raster, in order, each image scaled to fit.
pub fn assemble_raster_pdf(pages: &[RasterPage]) -> Result<Vec<u8>, RenderError> {
    assemble_raster_pdf_with(pages, &RasterOptions::default())
}

pub fn assemble_raster_pdf_with(
    pages: &[RasterPage],
    options: &RasterOptions,
) -> Result<Vec<u8>, RenderError> {
    if pages.is_empty() {
        return Err(RenderError::Other("no raster pages to assemble".into()));
    }
    let (page_w, page_h) = utils::page_size_pt(options.page_size);
    let mut builder = PdfBuilder::new(page_w, page_h);

    for (index, page) in pages.iter().enumerate() {
        validate(index, page)?;
        let image_id = builder.add_jpeg(page.jpeg.clone(), page.width, page.height);

        let box_w = (page_w - 2.0 * options.margin_pt).max(1.0);
        let box_h = (page_h - 2.0 * options.margin_pt).max(1.0);
        let (w, h) = utils::fit_within(page.width as f32, page.height as f32, box_w, box_h);
        let x = (page_w - w) / 2.0;
        // Anchor to the top of the page
        let y = utils::flip_y(options.margin_pt + h, page_h);

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![w.into(), 0.into(), 0.into(), h.into(), x.into(), y.into()],
                ),
                Operation::new("Do", vec!["Im1".into()]),
                Operation::new("Q", vec![]),
            ],
        };
        builder.add_page(content, &[("Im1", image_id)])?;
    }

    log::debug!("Assembled {} raster pages", pages.len());
    builder.finish()
}

fn validate(index: usize, page: &RasterPage) -> Result<(), RenderError> {
    if page.width == 0 || page.height == 0 {
        return Err(RenderError::InvalidRaster {
            index,
            reason: format!("zero dimension {}x{}", page.width, page.height),
        });
    }
    if !page.jpeg.starts_with(&[0xFF, 0xD8]) {
        return Err(RenderError::InvalidRaster {
            index,
            reason: "not a JPEG stream".into(),
        });
    }
    Ok(())
}
