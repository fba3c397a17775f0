use crate::document::ReportDocument;
use folio_traits::StorageBackend;
use folio_types::ReportHeader;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Everything persisted for a report besides the photo library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceDocument {
    #[serde(default)]
    pub header: ReportHeader,
    #[serde(default)]
    pub pages: ReportDocument,
}

/// Persists the header and pages under `<workspace>:document`, with the
/// same fallback rules as the photo store: unreadable data loads as a blank
/// one-page report and failed writes return `false`.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    backend: Arc<dyn StorageBackend>,
    key: String,
}

impl DocumentStore {
    pub fn new(backend: Arc<dyn StorageBackend>, workspace: &str) -> Self {
        Self {
            backend,
            key: format!("{workspace}:document"),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn load(&self) -> WorkspaceDocument {
        match self.backend.read(&self.key) {
            Ok(Some(blob)) if !blob.trim().is_empty() => serde_json::from_str(&blob)
                .unwrap_or_else(|e| {
                    log::warn!("Stored document under '{}' is corrupt: {}", self.key, e);
                    WorkspaceDocument::default()
                }),
            Ok(_) => WorkspaceDocument::default(),
            Err(e) => {
                log::warn!("Failed to read '{}' from {}: {}", self.key, self.backend.name(), e);
                WorkspaceDocument::default()
            }
        }
    }

    pub fn save(&self, document: &WorkspaceDocument) -> bool {
        let blob = match serde_json::to_string(document) {
            Ok(blob) => blob,
            Err(e) => {
                log::warn!("Failed to serialize document: {}", e);
                return false;
            }
        };
        match self.backend.write(&self.key, &blob) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to save document to {}: {}", self.backend.name(), e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_idf::RichText;
    use folio_traits::InMemoryStorage;
    use folio_types::PageType;

    #[test]
    fn test_blank_when_missing_or_corrupt() {
        let backend = Arc::new(InMemoryStorage::new());
        let store = DocumentStore::new(backend.clone(), "ws");
        assert_eq!(store.load().pages.len(), 1);

        // An empty page list violates the one-page minimum
        backend.write("ws:document", r#"{"pages": []}"#).unwrap();
        assert_eq!(store.load().pages.len(), 1);
    }

    #[test]
    fn test_round_trip() {
        let store = DocumentStore::new(Arc::new(InMemoryStorage::new()), "ws");
        let mut doc = WorkspaceDocument::default();
        doc.header.company_name = "Acme Surveys".into();
        let first = doc.pages.pages()[0].id.clone();
        doc.pages
            .set_content(&first, RichText::new().with_heading(1, "Summary"))
            .unwrap();
        doc.pages.add_page(PageType::PhotoAppendix);

        assert!(store.save(&doc));
        assert_eq!(store.load(), doc);
    }
}
