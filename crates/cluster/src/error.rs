//! Clustering Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A clustering error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for clustering operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// Degenerate input (no decks, too few decks) is not an error; only
/// parameters that make the algorithm meaningless are.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("eps must be a positive finite number, got {_0}")]
    InvalidEps(#[error(not(source))] String),
    #[display("min_samples must be at least 1")]
    InvalidMinSamples,
}
