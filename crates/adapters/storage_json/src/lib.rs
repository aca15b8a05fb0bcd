//! # places-adapter-storage-json
//!
//! Flat-file persistence adapter: all places live in one JSON array on disk.
//!
//! ## Responsibilities
//! - Implement the `PlaceRepository` port defined in `places-app::ports::storage`
//! - Optionally create the document as `[]` on startup
//! - Replace the document atomically (temporary file + rename) on every save
//!
//! ## Dependency rule
//! Depends on `places-app` (for port traits) and `places-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod file;
pub mod place_repo;

pub use error::StorageError;
pub use file::{Config, JsonFile};
pub use place_repo::JsonFilePlaceRepository;
