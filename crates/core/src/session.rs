//! The editing session: the single owner of mutable editor state.
//!
//! Photos and pages are replaced whole on every mutation. Each mutation
//! arms the autosave debouncer with a snapshot of the new state, so a burst
//! of edits results in one write once the window elapses.
//!
//! Inside a tokio runtime the write runs on the blocking pool. Without a
//! runtime there is no timer to wait on and every mutation saves at once.

use crate::debounce::Debouncer;
use crate::document::ReportDocument;
use crate::document_store::{DocumentStore, WorkspaceDocument};
use crate::error::DocumentError;
use crate::heading::HeadingTracker;
use crate::photo_store::PhotoStore;
use folio_idf::RichText;
use folio_layout::{ActivePageTracker, PageGeometry, ScrollRequest};
use folio_ranking::RankedView;
use folio_traits::DocumentView;
use folio_types::{
    EmbeddedImage, HeaderDraft, ImageId, PageId, PageType, Photo, PhotoId, ReportHeader, Viewport,
};
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use tokio::sync::watch;

/// Outcome of the most recent autosave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Idle,
    Saved,
    /// The backend rejected the write; the in-memory state is intact.
    Failed,
}

pub struct EditingSession {
    photos: Arc<[Photo]>,
    document: Arc<WorkspaceDocument>,
    photo_store: Arc<PhotoStore>,
    document_store: Arc<DocumentStore>,
    selected_photo: Option<PhotoId>,
    query: String,
    heading: HeadingTracker,
    ranked: RankedView,
    active_page: ActivePageTracker,
    autosave: Debouncer,
    /// Snapshot counter, bumped for every scheduled or flushed save.
    generation: u64,
    /// Last generation written. Holding the lock serializes writers.
    written: Arc<Mutex<u64>>,
    status: watch::Sender<SaveStatus>,
}

impl EditingSession {
    /// Loads the workspace from both stores.
    pub fn open(photo_store: PhotoStore, document_store: DocumentStore, geometry: PageGeometry) -> Self {
        let photos: Arc<[Photo]> = photo_store.load().into();
        let document = document_store.load();
        let mut active_page = ActivePageTracker::new(geometry);
        active_page.set_page_count(document.pages.len() as u32);
        log::debug!(
            "Opened session with {} photos and {} pages",
            photos.len(),
            document.pages.len()
        );
        let (status, _) = watch::channel(SaveStatus::Idle);
        Self {
            photos,
            document: Arc::new(document),
            photo_store: Arc::new(photo_store),
            document_store: Arc::new(document_store),
            selected_photo: None,
            query: String::new(),
            heading: HeadingTracker::new(),
            ranked: RankedView::default(),
            active_page,
            autosave: Debouncer::default(),
            generation: 0,
            written: Arc::new(Mutex::new(0)),
            status,
        }
    }

    pub fn with_autosave_window(mut self, window: std::time::Duration) -> Self {
        self.autosave = Debouncer::new(window);
        self
    }

    // --- Photos ---

    pub fn photos(&self) -> &Arc<[Photo]> {
        &self.photos
    }

    pub fn photo(&self, id: &PhotoId) -> Option<&Photo> {
        self.photos.iter().find(|p| &p.id == id)
    }

    pub fn add_photo(&mut self, photo: Photo) -> Result<(), DocumentError> {
        photo.validate()?;
        let mut next = self.photos.to_vec();
        next.push(photo);
        self.replace_photos(next);
        Ok(())
    }

    /// Replaces a photo's tags and/or description. Returns `false` if the
    /// photo does not exist.
    pub fn update_photo(
        &mut self,
        id: &PhotoId,
        tags: Option<Vec<String>>,
        description: Option<String>,
    ) -> bool {
        let Some(index) = self.photos.iter().position(|p| &p.id == id) else {
            return false;
        };
        let mut next = self.photos.to_vec();
        if let Some(tags) = tags {
            next[index].tags = tags;
        }
        if let Some(description) = description {
            next[index].description = Some(description).filter(|d| !d.trim().is_empty());
        }
        self.replace_photos(next);
        true
    }

    /// Removes a photo from the library. Images already embedded from it
    /// stay on their pages.
    pub fn delete_photo(&mut self, id: &PhotoId) -> Option<Photo> {
        let index = self.photos.iter().position(|p| &p.id == id)?;
        let mut next = self.photos.to_vec();
        let removed = next.remove(index);
        if self.selected_photo.as_ref() == Some(id) {
            self.selected_photo = None;
        }
        self.replace_photos(next);
        Some(removed)
    }

    fn replace_photos(&mut self, photos: Vec<Photo>) {
        self.photos = photos.into();
        self.schedule_save();
    }

    // --- Selection and ranking ---

    /// Selects a library photo. Returns `false` for unknown ids.
    pub fn select_photo(&mut self, id: &PhotoId) -> bool {
        if self.photo(id).is_none() {
            return false;
        }
        self.selected_photo = Some(id.clone());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected_photo = None;
    }

    pub fn selected_photo(&self) -> Option<&Photo> {
        self.selected_photo.as_ref().and_then(|id| self.photo(id))
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The library filtered by the query and ranked against the heading context.
    pub fn visible_photos(&mut self) -> Arc<[Photo]> {
        self.ranked
            .get(&self.photos, &self.query, self.heading.current())
    }

    // --- Heading context ---

    pub fn heading_context(&self) -> &str {
        self.heading.current()
    }

    /// Call after every edit or caret move.
    pub fn on_selection_change(&mut self, view: &dyn DocumentView) -> Option<String> {
        self.heading.update(view)
    }

    pub fn on_focus(&mut self, view: &dyn DocumentView) -> Option<String> {
        self.heading.on_focus(view)
    }

    // --- Scrolling ---

    pub fn active_page(&self) -> u32 {
        self.active_page.current()
    }

    pub fn on_scroll(&mut self, viewport: Viewport) -> Option<u32> {
        self.active_page.on_scroll(viewport)
    }

    pub fn scroll_to_page(&self, geometry: &PageGeometry, page: u32) -> ScrollRequest {
        let page = page.clamp(1, self.document.pages.len() as u32);
        ScrollRequest::to_page(geometry, page)
    }

    // --- Document ---

    pub fn document(&self) -> &ReportDocument {
        &self.document.pages
    }

    pub fn header(&self) -> &ReportHeader {
        &self.document.header
    }

    pub fn edit_header(&self) -> HeaderDraft {
        self.document.header.edit()
    }

    pub fn save_header(&mut self, draft: HeaderDraft) {
        draft.save(&mut Arc::make_mut(&mut self.document).header);
        self.schedule_save();
    }

    pub fn add_page(&mut self, page_type: PageType) -> PageId {
        let id = Arc::make_mut(&mut self.document).pages.add_page(page_type);
        self.pages_changed();
        id
    }

    pub fn delete_page(&mut self, id: &PageId) -> Result<(), DocumentError> {
        self.edit_document(|doc| doc.delete_page(id).map(|_| ()))?;
        self.pages_changed();
        Ok(())
    }

    pub fn set_page_content(&mut self, id: &PageId, content: RichText) -> Result<(), DocumentError> {
        self.edit_document(|doc| doc.set_content(id, content))
    }

    /// Embeds the selected photo on `page`.
    pub fn insert_selected_photo(
        &mut self,
        page: &PageId,
        width: u32,
        height: u32,
    ) -> Result<ImageId, DocumentError> {
        let photo = self
            .selected_photo()
            .cloned()
            .ok_or(DocumentError::NoPhotoSelected)?;
        self.edit_document(|doc| doc.insert_photo(page, &photo, width, height))
    }

    pub fn insert_image(&mut self, page: &PageId, image: EmbeddedImage) -> Result<ImageId, DocumentError> {
        self.edit_document(|doc| doc.insert_image(page, image))
    }

    pub fn remove_image(&mut self, page: &PageId, image: &ImageId) -> Result<EmbeddedImage, DocumentError> {
        self.edit_document(|doc| doc.remove_image(page, image))
    }

    /// Applies `edit` to a copy of the pages; the session keeps the old
    /// pages untouched if it fails.
    fn edit_document<T>(
        &mut self,
        edit: impl FnOnce(&mut ReportDocument) -> Result<T, DocumentError>,
    ) -> Result<T, DocumentError> {
        let mut pages = self.document.pages.clone();
        let out = edit(&mut pages)?;
        Arc::make_mut(&mut self.document).pages = pages;
        self.schedule_save();
        Ok(out)
    }

    fn pages_changed(&mut self) {
        self.active_page
            .set_page_count(self.document.pages.len() as u32);
        self.schedule_save();
    }

    // --- Persistence ---

    pub fn save_status(&self) -> watch::Receiver<SaveStatus> {
        self.status.subscribe()
    }

    pub fn has_pending_save(&self) -> bool {
        self.autosave.is_pending()
    }

    fn schedule_save(&mut self) {
        self.generation += 1;
        let snapshot = self.snapshot();
        let status = self.status.clone();
        self.autosave.arm(move || {
            let save = move || {
                if let Some(ok) = snapshot.write() {
                    status.send_replace(if ok { SaveStatus::Saved } else { SaveStatus::Failed });
                }
            };
            // File-backed stores block
            match Handle::try_current() {
                Ok(runtime) => {
                    runtime.spawn_blocking(save);
                }
                Err(_) => save(),
            }
        });
    }

    /// Cancels any pending autosave and writes now.
    pub fn flush(&mut self) -> bool {
        self.autosave.cancel();
        self.generation += 1;
        let ok = self.snapshot().write().unwrap_or(false);
        self.status
            .send_replace(if ok { SaveStatus::Saved } else { SaveStatus::Failed });
        ok
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            generation: self.generation,
            written: Arc::clone(&self.written),
            photos: Arc::clone(&self.photos),
            document: Arc::clone(&self.document),
            photo_store: Arc::clone(&self.photo_store),
            document_store: Arc::clone(&self.document_store),
        }
    }
}

/// Session state captured for one save.
struct Snapshot {
    generation: u64,
    written: Arc<Mutex<u64>>,
    photos: Arc<[Photo]>,
    document: Arc<WorkspaceDocument>,
    photo_store: Arc<PhotoStore>,
    document_store: Arc<DocumentStore>,
}

impl Snapshot {
    /// Writes unless a newer snapshot already landed. Returns `None` when skipped.
    fn write(&self) -> Option<bool> {
        let mut written = self.written.lock().unwrap_or_else(|e| e.into_inner());
        if *written > self.generation {
            log::debug!(
                "Skipping stale autosave {} (already wrote {})",
                self.generation,
                *written
            );
            return None;
        }
        let ok = persist(&self.photo_store, &self.document_store, &self.photos, &self.document);
        *written = self.generation;
        Some(ok)
    }
}

fn persist(
    photo_store: &PhotoStore,
    document_store: &DocumentStore,
    photos: &[Photo],
    document: &WorkspaceDocument,
) -> bool {
    let photos_ok = photo_store.save(photos);
    let document_ok = document_store.save(document);
    photos_ok && document_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photo_store::seed_photos;
    use crate::view::RichTextView;
    use folio_idf::from_markdown;
    use folio_traits::{InMemoryStorage, StorageBackend};
    use std::time::Duration;

    fn open(backend: Arc<InMemoryStorage>) -> EditingSession {
        EditingSession::open(
            PhotoStore::new(backend.clone(), "ws"),
            DocumentStore::new(backend, "ws"),
            PageGeometry::default(),
        )
    }

    /// Waits out the autosave window and returns the first reported outcome.
    async fn settle(status: &mut watch::Receiver<SaveStatus>) -> SaveStatus {
        tokio::time::sleep(Duration::from_millis(1600)).await;
        *status.wait_for(|s| *s != SaveStatus::Idle).await.unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_run_uses_seed_photos() {
        let session = open(Arc::new(InMemoryStorage::new()));
        assert_eq!(session.photos().len(), seed_photos().len());
        assert_eq!(session.document().len(), 1);
        assert_eq!(session.active_page(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_of_edits_saves_once() {
        let backend = Arc::new(InMemoryStorage::new());
        let mut session = open(backend.clone());
        let mut status = session.save_status();

        session.add_photo(Photo::new("p1", "a.jpg", "Attic")).unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        session
            .update_photo(&PhotoId::new("p1"), Some(vec!["loft".into()]), None);
        assert!(backend.read("ws:photos").unwrap().is_none());
        assert!(session.has_pending_save());

        assert_eq!(settle(&mut status).await, SaveStatus::Saved);
        let reopened = open(backend);
        let attic = reopened.photo(&PhotoId::new("p1")).unwrap();
        assert_eq!(attic.tags, vec!["loft"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_save_is_reported() {
        let backend = Arc::new(InMemoryStorage::with_quota(16));
        let mut session = open(backend);
        let mut status = session.save_status();
        session.add_photo(Photo::new("p1", "a.jpg", "Attic")).unwrap();
        assert_eq!(settle(&mut status).await, SaveStatus::Failed);
        // In-memory state is unaffected
        assert!(session.photo(&PhotoId::new("p1")).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_selection_is_explicit_state() {
        let mut session = open(Arc::new(InMemoryStorage::new()));
        let page = session.document().pages()[0].id.clone();

        assert_eq!(
            session.insert_selected_photo(&page, 10, 10),
            Err(DocumentError::NoPhotoSelected)
        );
        assert!(!session.select_photo(&PhotoId::new("missing")));

        let boiler = PhotoId::new("seed-boiler");
        assert!(session.select_photo(&boiler));
        session.insert_selected_photo(&page, 400, 300).unwrap();

        // Deleting the photo clears the selection and leaves the image dangling
        session.delete_photo(&boiler).unwrap();
        assert!(session.selected_photo().is_none());
        assert_eq!(session.document().dangling_images(session.photos()).len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_heading_drives_ranking() {
        let mut session = open(Arc::new(InMemoryStorage::new()));
        let content = from_markdown("# HVAC System\nThe boiler");
        let view = RichTextView::new(&content, content.plain_text().chars().count());

        assert_eq!(session.on_selection_change(&view), Some("HVAC System".into()));
        let visible = session.visible_photos();
        assert_eq!(visible[0].id.as_str(), "seed-boiler");
        assert!(visible[0].computed_relevance.unwrap() >= 5);

        session.set_query("window");
        let visible = session.visible_photos();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id.as_str(), "seed-window");
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_edits_track_active_page() {
        let mut session = open(Arc::new(InMemoryStorage::new()));
        let geometry = PageGeometry::default();
        let second = session.add_page(PageType::Standard);

        let viewport = Viewport::new(geometry.stride() * 1.5, 600.0);
        assert_eq!(session.on_scroll(viewport), Some(2));

        session.delete_page(&second).unwrap();
        assert_eq!(session.active_page(), 1);
        let only = session.document().pages()[0].id.clone();
        assert_eq!(session.delete_page(&only), Err(DocumentError::LastPage));
        assert_eq!(session.scroll_to_page(&geometry, 5).offset, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_edit_leaves_document_unchanged() {
        let mut session = open(Arc::new(InMemoryStorage::new()));
        let before = session.document().clone();
        let err = session
            .remove_image(&before.pages()[0].id, &ImageId::new("nope"))
            .unwrap_err();
        assert!(matches!(err, DocumentError::ImageNotFound { .. }));
        assert_eq!(session.document(), &before);
        assert!(!session.has_pending_save());
    }

    #[tokio::test(start_paused = true)]
    async fn test_header_edit_and_flush() {
        let backend = Arc::new(InMemoryStorage::new());
        let mut session = open(backend.clone());
        let mut draft = session.edit_header();
        draft.fields.document_title = "Condition Survey".into();
        session.save_header(draft);

        assert!(session.flush());
        assert!(!session.has_pending_save());
        let reopened = open(backend);
        assert_eq!(reopened.header().document_title, "Condition Survey");
    }

    #[test]
    fn test_edits_without_runtime_save_immediately() {
        let backend = Arc::new(InMemoryStorage::new());
        let mut session = open(backend.clone());
        let status = session.save_status();

        session.add_photo(Photo::new("p1", "a.jpg", "Attic")).unwrap();
        session.add_page(PageType::PhotoAppendix);
        assert!(!session.has_pending_save());
        assert_eq!(*status.borrow(), SaveStatus::Saved);

        let reopened = open(backend);
        assert!(reopened.photo(&PhotoId::new("p1")).is_some());
        assert_eq!(reopened.document().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_wins_over_older_autosave() {
        let backend = Arc::new(InMemoryStorage::new());
        let mut session = open(backend.clone());
        session.add_photo(Photo::new("p1", "a.jpg", "Attic")).unwrap();
        let stale = session.snapshot();

        session.add_photo(Photo::new("p2", "b.jpg", "Cellar")).unwrap();
        assert!(session.flush());
        assert_eq!(stale.write(), None);

        let reopened = open(backend);
        assert!(reopened.photo(&PhotoId::new("p2")).is_some());
    }
}
