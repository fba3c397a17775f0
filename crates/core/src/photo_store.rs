//! Persists the photo library as a single JSON blob per workspace.
//!
//! Loading never fails: a missing, empty or corrupt blob yields the seed
//! collection. Saving reports failure as `false` so callers can show a
//! non-fatal warning.

use folio_traits::StorageBackend;
use folio_types::Photo;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct PhotoStore {
    backend: Arc<dyn StorageBackend>,
    key: String,
}

impl PhotoStore {
    pub fn new(backend: Arc<dyn StorageBackend>, workspace: &str) -> Self {
        Self {
            backend,
            key: format!("{workspace}:photos"),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn load(&self) -> Vec<Photo> {
        let blob = match self.backend.read(&self.key) {
            Ok(Some(blob)) if !blob.trim().is_empty() => blob,
            Ok(_) => {
                log::debug!("No photos stored under '{}', using seed set", self.key);
                return seed_photos();
            }
            Err(e) => {
                log::warn!("Failed to read '{}' from {}: {}", self.key, self.backend.name(), e);
                return seed_photos();
            }
        };

        match serde_json::from_str::<Vec<Photo>>(&blob) {
            Ok(photos) => {
                let total = photos.len();
                let valid: Vec<Photo> = photos.into_iter().filter(|p| p.validate().is_ok()).collect();
                if valid.len() < total {
                    log::warn!(
                        "Dropped {} invalid photo records from '{}'",
                        total - valid.len(),
                        self.key
                    );
                }
                valid
            }
            Err(e) => {
                log::warn!("Stored photos under '{}' are corrupt, using seed set: {}", self.key, e);
                seed_photos()
            }
        }
    }

    /// Writes the whole collection. Returns `false` on any failure.
    pub fn save(&self, photos: &[Photo]) -> bool {
        if let Some(err) = photos.iter().find_map(|p| p.validate().err()) {
            log::warn!("Refusing to save photos: {}", err);
            return false;
        }
        let blob = match serde_json::to_string(photos) {
            Ok(blob) => blob,
            Err(e) => {
                log::warn!("Failed to serialize photos: {}", e);
                return false;
            }
        };
        match self.backend.write(&self.key, &blob) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to save photos to {}: {}", self.backend.name(), e);
                false
            }
        }
    }
}

/// The built-in library shown on first run.
pub fn seed_photos() -> Vec<Photo> {
    vec![
        Photo::new("seed-roof", "/seed/roof-slates.jpg", "Roof slates")
            .with_tags(["roof", "slates", "exterior"])
            .with_description("Pitched roof with natural slate covering and lead flashing at the chimney."),
        Photo::new("seed-gutter", "/seed/gutter.jpg", "Blocked gutter")
            .with_tags(["gutters", "drainage", "exterior"])
            .with_description("Cast-iron gutter with vegetation growth at the rear elevation."),
        Photo::new("seed-boiler", "/seed/boiler.jpg", "Boiler")
            .with_tags(["hvac", "heating", "boiler"])
            .with_description("Wall-mounted gas combi boiler in the kitchen."),
        Photo::new("seed-consumer-unit", "/seed/consumer-unit.jpg", "Consumer unit")
            .with_tags(["electrical", "wiring", "consumer unit"])
            .with_description("Split-load consumer unit with RCD protection."),
        Photo::new("seed-damp", "/seed/damp-wall.jpg", "Damp staining")
            .with_tags(["damp", "walls", "interior"])
            .with_description("Rising damp tide mark to the ground floor party wall."),
        Photo::new("seed-window", "/seed/window.jpg", "Sash window")
            .with_tags(["windows", "joinery", "exterior"])
            .with_description("Timber sash window with flaking paint to the sill."),
    ]
}
