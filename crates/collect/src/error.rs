//! Collection Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A collection error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for collection operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// None of these abort a run. They are raised for a single tournament or
/// record and logged by whoever drives the collection.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A remote source could not provide what was asked for.
    #[display("remote source unavailable")]
    Source,
    /// A tournament worker stopped before returning a result.
    #[display("worker failed: {_0}")]
    Worker(#[error(not(source))] String),
}
