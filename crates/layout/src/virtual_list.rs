use crate::LayoutError;
use crate::config::PageGeometry;
use folio_types::Viewport;
use std::ops::Range;

/// A virtualized list of pages.
///
/// Only pages inside the viewport (plus an overscan margin) need to be
/// mounted. Unmeasured pages are assumed to be one geometry page tall;
/// measured heights replace the estimate until invalidated by a reflow.
#[derive(Debug, Clone)]
pub struct VirtualPageList {
    geometry: PageGeometry,
    heights: Vec<Option<f64>>,
    overscan: usize,
}

impl VirtualPageList {
    pub const DEFAULT_OVERSCAN: usize = 1;

    pub fn new(geometry: PageGeometry, page_count: usize) -> Self {
        Self {
            geometry,
            heights: vec![None; page_count],
            overscan: Self::DEFAULT_OVERSCAN,
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Grows or shrinks the list. New pages start unmeasured.
    pub fn set_page_count(&mut self, page_count: usize) {
        self.heights.resize(page_count, None);
    }

    /// Records the rendered height of page `index`.
    pub fn measure(&mut self, index: usize, height: f64) -> Result<(), LayoutError> {
        let len = self.heights.len();
        let slot = self
            .heights
            .get_mut(index)
            .ok_or(LayoutError::PageOutOfRange(index, len))?;
        *slot = Some(height.max(0.0));
        Ok(())
    }

    /// Drops the measurement of page `index` after its content reflowed.
    pub fn invalidate(&mut self, index: usize) {
        if let Some(slot) = self.heights.get_mut(index) {
            *slot = None;
        }
    }

    pub fn invalidate_all(&mut self) {
        self.heights.iter_mut().for_each(|h| *h = None);
    }

    pub fn is_measured(&self, index: usize) -> bool {
        matches!(self.heights.get(index), Some(Some(_)))
    }

    /// Measured height of page `index`, or the estimate if unmeasured.
    pub fn height_of(&self, index: usize) -> f64 {
        self.heights
            .get(index)
            .copied()
            .flatten()
            .unwrap_or(self.geometry.page_height)
    }

    /// Scroll offset of the top of page `index`.
    pub fn offset_of(&self, index: usize) -> f64 {
        (0..index.min(self.len()))
            .map(|i| self.height_of(i) + self.geometry.page_margin)
            .sum()
    }

    /// Full scrollable height of all pages and the gaps between them.
    pub fn total_height(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.offset_of(self.len()) - self.geometry.page_margin
    }

    /// Indices of pages that intersect the viewport, widened by the overscan.
    pub fn visible_range(&self, viewport: Viewport) -> Range<usize> {
        if self.is_empty() {
            return 0..0;
        }
        let top = viewport.scroll_top.max(0.0);
        let bottom = viewport.bottom().max(top);

        let mut first = None;
        let mut last = 0;
        let mut below = None;
        let mut offset = 0.0;
        for i in 0..self.len() {
            let height = self.height_of(i);
            let page_bottom = offset + height;
            if page_bottom > top && offset <= bottom {
                first.get_or_insert(i);
                last = i;
            }
            if offset > bottom {
                below = Some(i);
                break;
            }
            offset = page_bottom + self.geometry.page_margin;
        }

        // A viewport inside an inter-page gap mounts the page below it;
        // one scrolled past the end keeps the last page mounted.
        let first = first.or(below).unwrap_or(self.len() - 1);
        let last = last.max(first);
        let start = first.saturating_sub(self.overscan);
        let end = (last + 1 + self.overscan).min(self.len());
        start..end
    }
}
