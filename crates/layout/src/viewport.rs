//! Scroll-position math for the paginated editor.
//!
//! Pages are stacked vertically at a fixed stride. The "current" page is the
//! one whose band contains the midpoint of the viewport.

use crate::config::PageGeometry;
use folio_types::Viewport;

/// Returns the 1-based page whose band contains the viewport midpoint.
///
/// Never returns less than 1.
pub fn current_page_from_scroll(geometry: &PageGeometry, scroll_top: f64, client_height: f64) -> u32 {
    let stride = geometry.stride();
    if stride.is_nan() || stride <= 0.0 {
        return 1;
    }
    let midpoint = scroll_top + client_height / 2.0;
    let page = (midpoint / stride).ceil();
    if page.is_nan() || page < 1.0 {
        return 1;
    }
    // Float-to-int casts saturate.
    page as u32
}

/// Returns the scroll offset that puts the top of page `page` at the top of
/// the viewport. Page numbers below 1 are treated as 1.
pub fn scroll_offset_for_page(geometry: &PageGeometry, page: u32) -> f64 {
    f64::from(page.max(1) - 1) * geometry.stride()
}

/// Number of pages needed for `total_height` of content. Never zero.
///
/// A non-positive usable height yields a single page.
pub fn page_count_from_content_height(total_height: f64, usable_height: f64) -> u32 {
    if usable_height.is_nan() || usable_height <= 0.0 || total_height.is_nan() || total_height <= 0.0 {
        return 1;
    }
    let pages = (total_height / usable_height).ceil();
    (pages as u32).max(1)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    #[default]
    Smooth,
}

/// A navigation instruction for the page viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub offset: f64,
    pub behavior: ScrollBehavior,
}

impl ScrollRequest {
    /// Smooth scroll to the top of `page`.
    pub fn to_page(geometry: &PageGeometry, page: u32) -> Self {
        Self {
            offset: scroll_offset_for_page(geometry, page),
            behavior: ScrollBehavior::Smooth,
        }
    }
}

/// Follows viewport scroll events and reports page changes.
#[derive(Debug, Clone)]
pub struct ActivePageTracker {
    geometry: PageGeometry,
    current: u32,
    page_count: Option<u32>,
}

impl ActivePageTracker {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            current: 1,
            page_count: None,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    /// Caps reported pages at `count`. Overscrolling past the last page
    /// still reports the last page.
    pub fn set_page_count(&mut self, count: u32) -> Option<u32> {
        self.page_count = Some(count.max(1));
        let clamped = self.clamp(self.current);
        self.replace(clamped)
    }

    /// Feeds new viewport metrics. Returns the new page only when it changed.
    pub fn on_scroll(&mut self, viewport: Viewport) -> Option<u32> {
        let page = current_page_from_scroll(&self.geometry, viewport.scroll_top, viewport.client_height);
        let page = self.clamp(page);
        self.replace(page)
    }

    fn clamp(&self, page: u32) -> u32 {
        match self.page_count {
            Some(count) => page.min(count),
            None => page,
        }
    }

    fn replace(&mut self, page: u32) -> Option<u32> {
        if page == self.current {
            return None;
        }
        log::debug!("Active page {} -> {}", self.current, page);
        self.current = page;
        Some(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> PageGeometry {
        PageGeometry::default()
    }

    #[test]
    fn test_scroll_zero_is_page_one() {
        assert_eq!(current_page_from_scroll(&geometry(), 0.0, 0.0), 1);
        assert_eq!(current_page_from_scroll(&geometry(), 0.0, 800.0), 1);
    }

    #[test]
    fn test_midpoint_selects_page() {
        let g = geometry();
        // midpoint at 1076 + 400 falls in page 2's band
        assert_eq!(current_page_from_scroll(&g, 1076.0, 800.0), 2);
        // midpoint just past the first stride
        assert_eq!(current_page_from_scroll(&g, 700.0, 800.0), 2);
        assert_eq!(current_page_from_scroll(&g, 600.0, 800.0), 1);
    }

    #[test]
    fn test_degenerate_inputs() {
        let g = geometry();
        assert_eq!(current_page_from_scroll(&g, -500.0, 100.0), 1);
        assert_eq!(current_page_from_scroll(&g, f64::NAN, 100.0), 1);
        let zero = PageGeometry {
            page_width: 0.0,
            page_height: 0.0,
            page_margin: 0.0,
        };
        assert_eq!(current_page_from_scroll(&zero, 100.0, 100.0), 1);
    }

    #[test]
    fn test_scroll_offset_for_page() {
        let g = geometry();
        assert_eq!(scroll_offset_for_page(&g, 1), 0.0);
        assert_eq!(scroll_offset_for_page(&g, 0), 0.0);
        assert_eq!(scroll_offset_for_page(&g, 3), 2152.0);
    }

    #[test]
    fn test_round_trip() {
        let g = geometry();
        let client_height = 900.0;
        for n in 1..=50 {
            let offset = scroll_offset_for_page(&g, n);
            let page = current_page_from_scroll(&g, offset, client_height);
            assert_eq!(page, n);
            assert_eq!(scroll_offset_for_page(&g, page), offset);
        }
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count_from_content_height(0.0, 900.0), 1);
        assert_eq!(page_count_from_content_height(900.0, 900.0), 1);
        assert_eq!(page_count_from_content_height(900.5, 900.0), 2);
        assert_eq!(page_count_from_content_height(2700.0, 900.0), 3);
        assert_eq!(page_count_from_content_height(5000.0, 0.0), 1);
        assert_eq!(page_count_from_content_height(5000.0, -10.0), 1);
    }

    #[test]
    fn test_scroll_request_is_smooth() {
        let req = ScrollRequest::to_page(&geometry(), 2);
        assert_eq!(req.offset, 1076.0);
        assert_eq!(req.behavior, ScrollBehavior::Smooth);
    }

    #[test]
    fn test_tracker_emits_only_on_change() {
        let mut tracker = ActivePageTracker::new(geometry());
        assert_eq!(tracker.on_scroll(Viewport::new(0.0, 800.0)), None);
        assert_eq!(tracker.on_scroll(Viewport::new(100.0, 800.0)), None);
        assert_eq!(tracker.on_scroll(Viewport::new(1076.0, 800.0)), Some(2));
        assert_eq!(tracker.on_scroll(Viewport::new(1100.0, 800.0)), None);
        assert_eq!(tracker.on_scroll(Viewport::new(0.0, 800.0)), Some(1));
        assert_eq!(tracker.current(), 1);
    }

    #[test]
    fn test_tracker_clamps_to_page_count() {
        let mut tracker = ActivePageTracker::new(geometry());
        tracker.set_page_count(2);
        assert_eq!(tracker.on_scroll(Viewport::new(10_000.0, 800.0)), Some(2));
        assert_eq!(tracker.set_page_count(1), Some(1));
    }
}
