//! Error types for document edits.

use folio_types::{ImageId, PageId, PhotoError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("A report must contain at least one page")]
    EmptyDocument,

    #[error("Cannot delete the last remaining page")]
    LastPage,

    #[error("Page '{0}' not found")]
    PageNotFound(PageId),

    #[error("Image '{image}' not found on page '{page}'")]
    ImageNotFound { page: PageId, image: ImageId },

    #[error("Page index {index} is out of range for {len} pages")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No photo is selected")]
    NoPhotoSelected,

    #[error("Invalid photo: {0}")]
    Photo(#[from] PhotoError),
}
