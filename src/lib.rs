//! # folio
//!
//! Back end of a paginated inspection-report editor.
//!
//! - **ranking**: scores the photo library against the heading at the caret
//! - **layout**: page geometry, active-page tracking, virtualization and block pagination
//! - **editor**: document model, heading tracker, photo store and editing session
//! - **render_core** / **pdf**: HTML export, PDF conversion with fallback, raster assembly
//! - **gateway**: AI enhancement and tagging behind a provider trait
//!
//! ## Example
//!
//! ```
//! use folio::editor::{ReportDocument, RichTextView, heading_at};
//! use folio::idf::from_markdown;
//! use folio::types::{PageType, Photo};
//!
//! let content = from_markdown("# HVAC System\nThe boiler was serviced in 2023.");
//! let caret = content.plain_text().chars().count();
//! let heading = heading_at(&RichTextView::new(&content, caret), caret).unwrap();
//! assert_eq!(heading, "HVAC System");
//!
//! let library = vec![
//!     Photo::new("a", "a.jpg", "HVAC unit"),
//!     Photo::new("b", "b.jpg", "Boiler").with_tags(["hvac"]),
//! ];
//! let ranked = folio::ranking::rank_and_filter(&library, "", &heading);
//! assert_eq!(ranked[0].id.as_str(), "b");
//!
//! let mut document = ReportDocument::new();
//! let appendix = document.add_page(PageType::PhotoAppendix);
//! document.insert_photo(&appendix, &ranked[0], 400, 300).unwrap();
//! ```

// Re-export foundation crates
pub use folio_idf as idf;
pub use folio_traits as traits;
pub use folio_types as types;

// Re-export algorithm crates
pub use folio_layout as layout;
pub use folio_ranking as ranking;

// Re-export render crates
pub use folio_render_core as render_core;
pub use folio_render_lopdf as pdf;

// Re-export platform crates
pub use folio_executor as executor;
pub use folio_gateway as gateway;
pub use folio_resource as resource;

// Re-export the integration layer
pub use folio_core as editor;

// Commonly used types
pub use editor::{DocumentError, EditingSession, HeadingTracker, PhotoStore, ReportDocument};
pub use gateway::{EnhanceRequest, EnhanceResponse, Gateway, GatewayError};
pub use layout::{PageGeometry, VirtualPageList};
pub use ranking::{RankedView, Ranker, RelevanceWeights};
pub use render_core::{ExportError, ExportRequest, Exporter};
pub use types::{EmbeddedImage, PageType, Photo, ReportHeader, ReportPage};
