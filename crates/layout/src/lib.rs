use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),
    #[error("Page index {0} is out of range for {1} pages.")]
    PageOutOfRange(usize, usize),
}

pub mod algorithms;
pub mod config;
pub mod policy;
pub mod viewport;
pub mod virtual_list;

pub use self::algorithms::pagination::{BreakAnalysis, PageSpan, check_child_fit, paginate_blocks};
pub use self::config::PageGeometry;
pub use self::policy::{GridSlot, LayoutPolicy, PageLayoutPolicies, PhotoGrid, photo_grid};
pub use self::viewport::{
    ActivePageTracker, ScrollBehavior, ScrollRequest, current_page_from_scroll,
    page_count_from_content_height, scroll_offset_for_page,
};
pub use self::virtual_list::VirtualPageList;

// Re-export geometry types from the data model to prevent type mismatches
pub use folio_types::{PhysicalPageSize, Size, Viewport};
