use crate::ids::{ImageId, PageId, PhotoId};
use crate::photo::Photo;
use folio_idf::RichText;
use serde::{Deserialize, Serialize};

/// Governs which layout rules apply to a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageType {
    #[default]
    Standard,
    /// A grid of captioned photographs with tighter margins.
    PhotoAppendix,
}

/// An image placed on a report page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedImage {
    pub id: ImageId,
    pub image_ref: String,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Weak back-reference to the library photo. It is not kept in sync and
    /// may dangle once the photo is deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_photo_id: Option<PhotoId>,
}

impl EmbeddedImage {
    pub fn new(image_ref: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: ImageId::generate(),
            image_ref: image_ref.into(),
            width,
            height,
            description: None,
            source_photo_id: None,
        }
    }

    /// Embeds a library photo, carrying its description as the caption.
    pub fn from_photo(photo: &Photo, width: u32, height: u32) -> Self {
        Self {
            id: ImageId::generate(),
            image_ref: photo.image_ref.clone(),
            width,
            height,
            description: photo.description.clone(),
            source_photo_id: Some(photo.id.clone()),
        }
    }
}

/// One page of the report, in print order within its document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPage {
    pub id: PageId,
    #[serde(default)]
    pub content: RichText,
    #[serde(default)]
    pub images: Vec<EmbeddedImage>,
    #[serde(default)]
    pub page_type: PageType,
}

impl ReportPage {
    /// Creates an empty page of the given type.
    pub fn new(page_type: PageType) -> Self {
        Self {
            id: PageId::generate(),
            content: RichText::new(),
            images: Vec::new(),
            page_type,
        }
    }

    pub fn with_content(mut self, content: RichText) -> Self {
        self.content = content;
        self
    }

    pub fn is_photo_appendix(&self) -> bool {
        self.page_type == PageType::PhotoAppendix
    }
}
