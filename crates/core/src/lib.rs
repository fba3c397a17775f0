//! # folio-core
//!
//! The editing core of a report: the page model, the heading-context
//! tracker, persistence of the photo library and report, and the editing
//! session that ties them together.
//!
//! ## Design Principle
//!
//! Editor integration goes through the [`DocumentView`] capability trait.
//! Nothing here depends on a concrete rich-text editor, and cross-panel
//! state such as the selected photo is held explicitly by the
//! [`EditingSession`].

// Re-export foundation crates
pub use folio_idf as idf;
pub use folio_traits as traits;
pub use folio_types as types;

// Re-export algorithm crates
pub use folio_layout as layout;
pub use folio_ranking as ranking;

pub mod debounce;
pub mod document;
pub mod document_store;
pub mod error;
pub mod heading;
pub mod photo_store;
pub mod session;
pub mod view;

pub use debounce::Debouncer;
pub use document::ReportDocument;
pub use document_store::{DocumentStore, WorkspaceDocument};
pub use error::DocumentError;
pub use heading::{HeadingTracker, heading_at};
pub use photo_store::{PhotoStore, seed_photos};
pub use session::{EditingSession, SaveStatus};
pub use view::RichTextView;

pub use traits::{Capability, DocumentView, InMemoryStorage, StorageBackend, StorageError};
