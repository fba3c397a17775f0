use crate::ids::PhotoId;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhotoError {
    #[error("Photo id must not be empty")]
    EmptyId,

    #[error("Photo '{0}' has no image reference")]
    EmptyImageRef(String),
}

/// A photo in the library panel.
///
/// `image_ref` is either a remote URL or an inline `data:` URL. The
/// `computed_relevance` field is filled in by a ranking pass and is never
/// persisted; it is also ignored by equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: PhotoId,
    pub image_ref: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip)]
    pub computed_relevance: Option<u32>,
}

impl Photo {
    pub fn new(
        id: impl Into<PhotoId>,
        image_ref: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            image_ref: image_ref.into(),
            display_name: display_name.into(),
            tags: Vec::new(),
            description: None,
            computed_relevance: None,
        }
    }

    /// Creates a photo for a fresh upload, generating its id.
    pub fn new_upload(image_ref: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::new(PhotoId::generate(), image_ref, display_name)
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Checks the persistence invariant: non-empty id and image reference.
    pub fn validate(&self) -> Result<(), PhotoError> {
        if self.id.is_blank() {
            return Err(PhotoError::EmptyId);
        }
        if self.image_ref.trim().is_empty() {
            return Err(PhotoError::EmptyImageRef(self.id.to_string()));
        }
        Ok(())
    }

    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

impl PartialEq for Photo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.image_ref == other.image_ref
            && self.display_name == other.display_name
            && self.tags == other.tags
            && self.description == other.description
    }
}

impl Eq for Photo {}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
