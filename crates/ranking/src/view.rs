use crate::ranker::Ranker;
use folio_types::Photo;
use std::sync::Arc;

/// Memoizes the last ranking so repeated renders with the same query and
/// heading over the same collection do not re-rank.
///
/// The collection is compared by pointer: a session replaces its `Arc<[Photo]>`
/// whole on every mutation, so a new allocation means new contents.
#[derive(Debug, Default)]
pub struct RankedView {
    ranker: Ranker,
    last: Option<CacheEntry>,
}

#[derive(Debug)]
struct CacheEntry {
    photos: Arc<[Photo]>,
    query: String,
    heading: String,
    ranked: Arc<[Photo]>,
}

impl RankedView {
    pub fn new(ranker: Ranker) -> Self {
        Self { ranker, last: None }
    }

    /// Returns the filtered, ranked view, reusing the cached result when the
    /// inputs are unchanged.
    pub fn get(&mut self, photos: &Arc<[Photo]>, query: &str, heading: &str) -> Arc<[Photo]> {
        if let Some(entry) = &self.last
            && Arc::ptr_eq(&entry.photos, photos)
            && entry.query == query
            && entry.heading == heading
        {
            return Arc::clone(&entry.ranked);
        }

        let ranked: Arc<[Photo]> = self.ranker.rank_and_filter(photos, query, heading).into();
        self.last = Some(CacheEntry {
            photos: Arc::clone(photos),
            query: query.to_string(),
            heading: heading.to_string(),
            ranked: Arc::clone(&ranked),
        });
        ranked
    }

    pub fn invalidate(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photos() -> Arc<[Photo]> {
        vec![
            Photo::new("a", "a.jpg", "Roof").with_tags(["roof"]),
            Photo::new("b", "b.jpg", "Gutter").with_tags(["drainage"]),
        ]
        .into()
    }

    #[test]
    fn test_unchanged_inputs_reuse_result() {
        let mut view = RankedView::default();
        let lib = photos();
        let first = view.get(&lib, "", "Drainage");
        let second = view.get(&lib, "", "Drainage");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first[0].id.as_str(), "b");
    }

    #[test]
    fn test_heading_change_reranks() {
        let mut view = RankedView::default();
        let lib = photos();
        let drainage = view.get(&lib, "", "Drainage");
        let roof = view.get(&lib, "", "Roof");
        assert!(!Arc::ptr_eq(&drainage, &roof));
        assert_eq!(roof[0].id.as_str(), "a");
    }

    #[test]
    fn test_new_collection_reranks() {
        let mut view = RankedView::default();
        let first = view.get(&photos(), "", "Roof");
        let second = view.get(&photos(), "", "Roof");
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalidate() {
        let mut view = RankedView::default();
        let lib = photos();
        let first = view.get(&lib, "", "Roof");
        view.invalidate();
        let second = view.get(&lib, "", "Roof");
        assert!(!Arc::ptr_eq(&first, &second));
    }
}
