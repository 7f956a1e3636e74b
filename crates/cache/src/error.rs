//! Cache Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A cache error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for cache operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
/// A missing or corrupt record is not an error: it reads as a miss.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The cache root could not be opened.
    #[display("cache root unavailable")]
    Unavailable,
    /// The storage backend failed for a reason other than a missing file.
    #[display("cache storage error")]
    Storage,
    /// A record could not be serialized for writing.
    #[display("cannot serialize {_0} record")]
    Serialize(#[error(not(source))] &'static str),
}
