//! Relevance ranking of library photos.
//!
//! Photos are scored against the "heading context", the text of the section
//! heading nearest the caret, so the most relevant images surface first in
//! the library panel.
//!
//! ```
//! use folio_ranking::rank_and_filter;
//! use folio_types::Photo;
//!
//! let photos = vec![
//!     Photo::new("p1", "a.jpg", "Front door"),
//!     Photo::new("p2", "b.jpg", "Boiler").with_tags(["hvac"]),
//! ];
//! let ranked = rank_and_filter(&photos, "", "HVAC System");
//! assert_eq!(ranked[0].id.as_str(), "p2");
//! ```

mod ranker;
mod view;
mod weights;

pub use ranker::Ranker;
pub use view::RankedView;
pub use weights::{DEFAULT_STOP_WORDS, RelevanceWeights};

use folio_types::Photo;

/// Scores `photo` with the default weights.
pub fn score(photo: &Photo, heading_context: &str) -> u32 {
    Ranker::default().score(photo, heading_context)
}

/// Filters and ranks `photos` with the default weights.
pub fn rank_and_filter(photos: &[Photo], query: &str, heading_context: &str) -> Vec<Photo> {
    Ranker::default().rank_and_filter(photos, query, heading_context)
}
