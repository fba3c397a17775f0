use crate::error::DocumentError;
use folio_idf::RichText;
use folio_types::{EmbeddedImage, ImageId, PageId, PageType, Photo, ReportPage};
use serde::{Deserialize, Serialize};

/// The ordered pages of a report. Never empty.
///
/// Page order is print order. Embedded images keep a weak reference to the
/// library photo they came from; deleting the photo leaves that reference
/// dangling and the image in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ReportPage>", into = "Vec<ReportPage>")]
pub struct ReportDocument {
    pages: Vec<ReportPage>,
}

impl Default for ReportDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<ReportPage>> for ReportDocument {
    type Error = DocumentError;

    fn try_from(pages: Vec<ReportPage>) -> Result<Self, Self::Error> {
        Self::from_pages(pages)
    }
}

impl From<ReportDocument> for Vec<ReportPage> {
    fn from(document: ReportDocument) -> Self {
        document.pages
    }
}

impl ReportDocument {
    /// A document with a single blank standard page.
    pub fn new() -> Self {
        Self {
            pages: vec![ReportPage::new(PageType::Standard)],
        }
    }

    pub fn from_pages(pages: Vec<ReportPage>) -> Result<Self, DocumentError> {
        if pages.is_empty() {
            return Err(DocumentError::EmptyDocument);
        }
        Ok(Self { pages })
    }

    pub fn pages(&self) -> &[ReportPage] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn page(&self, id: &PageId) -> Option<&ReportPage> {
        self.pages.iter().find(|p| &p.id == id)
    }

    pub fn page_index(&self, id: &PageId) -> Option<usize> {
        self.pages.iter().position(|p| &p.id == id)
    }

    fn page_mut(&mut self, id: &PageId) -> Result<&mut ReportPage, DocumentError> {
        self.pages
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| DocumentError::PageNotFound(id.clone()))
    }

    /// Appends a blank page and returns its id.
    pub fn add_page(&mut self, page_type: PageType) -> PageId {
        let page = ReportPage::new(page_type);
        let id = page.id.clone();
        self.pages.push(page);
        id
    }

    /// Inserts a blank page directly after `after`.
    pub fn insert_page_after(
        &mut self,
        after: &PageId,
        page_type: PageType,
    ) -> Result<PageId, DocumentError> {
        let index = self
            .page_index(after)
            .ok_or_else(|| DocumentError::PageNotFound(after.clone()))?;
        let page = ReportPage::new(page_type);
        let id = page.id.clone();
        self.pages.insert(index + 1, page);
        Ok(id)
    }

    /// Removes a page. The last remaining page cannot be deleted.
    pub fn delete_page(&mut self, id: &PageId) -> Result<ReportPage, DocumentError> {
        let index = self
            .page_index(id)
            .ok_or_else(|| DocumentError::PageNotFound(id.clone()))?;
        if self.pages.len() == 1 {
            return Err(DocumentError::LastPage);
        }
        Ok(self.pages.remove(index))
    }

    /// Moves a page to `to_index`, shifting the pages in between.
    pub fn move_page(&mut self, id: &PageId, to_index: usize) -> Result<(), DocumentError> {
        let len = self.pages.len();
        if to_index >= len {
            return Err(DocumentError::IndexOutOfRange {
                index: to_index,
                len,
            });
        }
        let from = self
            .page_index(id)
            .ok_or_else(|| DocumentError::PageNotFound(id.clone()))?;
        let page = self.pages.remove(from);
        self.pages.insert(to_index, page);
        Ok(())
    }

    pub fn set_content(&mut self, id: &PageId, content: RichText) -> Result<(), DocumentError> {
        self.page_mut(id)?.content = content;
        Ok(())
    }

    pub fn set_page_type(&mut self, id: &PageId, page_type: PageType) -> Result<(), DocumentError> {
        self.page_mut(id)?.page_type = page_type;
        Ok(())
    }

    /// Appends an image to the target page only.
    pub fn insert_image(
        &mut self,
        page: &PageId,
        image: EmbeddedImage,
    ) -> Result<ImageId, DocumentError> {
        let target = self.page_mut(page)?;
        let id = image.id.clone();
        log::debug!("Embedding image '{}' on page '{}'", id, page);
        target.images.push(image);
        Ok(id)
    }

    /// Embeds a library photo on the target page.
    pub fn insert_photo(
        &mut self,
        page: &PageId,
        photo: &Photo,
        width: u32,
        height: u32,
    ) -> Result<ImageId, DocumentError> {
        photo.validate()?;
        self.insert_image(page, EmbeddedImage::from_photo(photo, width, height))
    }

    pub fn remove_image(
        &mut self,
        page: &PageId,
        image: &ImageId,
    ) -> Result<EmbeddedImage, DocumentError> {
        let target = self.page_mut(page)?;
        let index = target
            .images
            .iter()
            .position(|i| &i.id == image)
            .ok_or_else(|| DocumentError::ImageNotFound {
                page: page.clone(),
                image: image.clone(),
            })?;
        Ok(target.images.remove(index))
    }

    pub fn set_image_description(
        &mut self,
        page: &PageId,
        image: &ImageId,
        description: Option<String>,
    ) -> Result<(), DocumentError> {
        let target = self.page_mut(page)?;
        let embedded = target
            .images
            .iter_mut()
            .find(|i| &i.id == image)
            .ok_or_else(|| DocumentError::ImageNotFound {
                page: page.clone(),
                image: image.clone(),
            })?;
        embedded.description = description;
        Ok(())
    }

    /// Images whose source photo is no longer in `library`.
    pub fn dangling_images<'a>(&'a self, library: &[Photo]) -> Vec<&'a EmbeddedImage> {
        self.pages
            .iter()
            .flat_map(|p| p.images.iter())
            .filter(|img| {
                img.source_photo_id
                    .as_ref()
                    .is_some_and(|src| !library.iter().any(|p| &p.id == src))
            })
            .collect()
    }

    pub fn image_count(&self) -> usize {
        self.pages.iter().map(|p| p.images.len()).sum()
    }
}
