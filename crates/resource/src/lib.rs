//! Storage backends for Folio workspaces.
//!
//! This crate provides platform-specific implementations of the
//! `StorageBackend` trait from folio-traits.
//!
//! ## Available Backends
//!
//! - [`FileStorage`]: One JSON file per key under a base directory
//!
//! ## Re-exports
//!
//! For convenience, we also re-export the in-memory backend from folio-traits:
//! - [`InMemoryStorage`]: Process-local storage with an optional quota

mod filesystem;

pub use filesystem::FileStorage;

// Re-export the in-memory backend from folio-traits for convenience
pub use folio_traits::InMemoryStorage;
