pub mod enhance;
pub mod health;
pub mod pdf;
pub mod photos;
pub mod tag;

pub use enhance::{enhance, enhance_batch};
pub use health::health_check;
pub use pdf::{assemble_pdf, generate_pdf};
pub use photos::{load_photos, save_photos};
pub use tag::tag_image;
