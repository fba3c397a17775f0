pub mod geometry;
pub mod header;
pub mod ids;
pub mod photo;
pub mod report;

pub use geometry::{PhysicalPageSize, Size, Viewport};
pub use header::{HeaderDraft, ReportHeader};
pub use ids::{ImageId, PageId, PhotoId};
pub use photo::{Photo, PhotoError};
pub use report::{EmbeddedImage, PageType, ReportPage};

pub use folio_idf::RichText;
