//! Application Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A top-level error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for command execution.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// Anything reaching this level ends the run.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("configuration error")]
    Config,
    #[display("cannot open cache")]
    Cache,
    #[display("cannot set up remote sources")]
    Source,
    #[display("cannot write report to {}", _0.display())]
    Output(#[error(not(source))] PathBuf),
}
