//! Per-page-type layout rules.

use crate::config::PageGeometry;
use folio_types::PageType;
use serde::Deserialize;

/// Vertical space reserved on a page before content can flow.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LayoutPolicy {
    /// Height of the report header block at the top of the page.
    pub header_offset: f64,
    /// Padding above and below the content area.
    pub content_margin: f64,
}

impl LayoutPolicy {
    /// Height left for flowing content on a page of `geometry`. Never negative.
    pub fn usable_height(&self, geometry: &PageGeometry) -> f64 {
        (geometry.page_height - self.header_offset - 2.0 * self.content_margin).max(0.0)
    }
}

/// The layout policy table, keyed by page type.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageLayoutPolicies {
    pub standard: LayoutPolicy,
    pub photo_appendix: LayoutPolicy,
}

impl Default for PageLayoutPolicies {
    fn default() -> Self {
        Self {
            standard: LayoutPolicy {
                header_offset: 96.0,
                content_margin: 48.0,
            },
            photo_appendix: LayoutPolicy {
                header_offset: 64.0,
                content_margin: 24.0,
            },
        }
    }
}

impl PageLayoutPolicies {
    pub fn for_page(&self, page_type: PageType) -> &LayoutPolicy {
        match page_type {
            PageType::Standard => &self.standard,
            PageType::PhotoAppendix => &self.photo_appendix,
        }
    }

    pub fn usable_height(&self, geometry: &PageGeometry, page_type: PageType) -> f64 {
        self.for_page(page_type).usable_height(geometry)
    }
}

/// Where one image lands in a photo grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSlot {
    pub image_index: usize,
    /// 0-based printed page within the grid.
    pub page: usize,
    pub row: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoGrid {
    pub columns: usize,
    pub rows_per_page: usize,
    pub page_count: usize,
    pub slots: Vec<GridSlot>,
}

impl PhotoGrid {
    pub const APPENDIX_COLUMNS: usize = 2;
    pub const APPENDIX_ROWS: usize = 3;

    pub fn per_page(&self) -> usize {
        self.columns * self.rows_per_page
    }
}

/// Arranges `image_count` images for a page of `page_type`.
///
/// Photo-appendix pages use a 2x3 grid and spill onto as many printed pages
/// as needed. Standard pages stack images in a single column.
pub fn photo_grid(page_type: PageType, image_count: usize) -> PhotoGrid {
    let (columns, rows_per_page) = match page_type {
        PageType::PhotoAppendix => (PhotoGrid::APPENDIX_COLUMNS, PhotoGrid::APPENDIX_ROWS),
        PageType::Standard => (1, image_count.max(1)),
    };
    let per_page = columns * rows_per_page;
    let page_count = image_count.div_ceil(per_page).max(1);

    let slots = (0..image_count)
        .map(|i| {
            let within = i % per_page;
            GridSlot {
                image_index: i,
                page: i / per_page,
                row: within / columns,
                column: within % columns,
            }
        })
        .collect();

    PhotoGrid {
        columns,
        rows_per_page,
        page_count,
        slots,
    }
}
