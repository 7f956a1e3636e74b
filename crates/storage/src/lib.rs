//! Storage backends for the record cache.
//!
//! Everything above this crate talks to a [`StorageBackend`] through a
//! [`BackendHandle`]; which concrete backend sits behind it (local disk, a
//! read-only view, or the in-memory mock in tests) is decided once at
//! startup.

pub mod backend;
pub mod error;
mod file;
mod path;

pub use crate::backend::StorageBackend;
pub use crate::file::FileInfo;
pub use crate::path::validate as validate_path;
use std::sync::Arc;

pub type BackendHandle = Arc<dyn StorageBackend + Send + Sync>;
