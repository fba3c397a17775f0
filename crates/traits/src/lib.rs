pub mod storage;
pub mod view;

pub use storage::{InMemoryStorage, StorageBackend, StorageError};
pub use view::{Capability, DocumentView, SpanKind, TextSpan, ViewError};
