//! Source Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A remote source error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for remote source operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The HTTP client could not be built.
    #[display("invalid client configuration")]
    Client,
    /// Connection failed, timed out, or the response body was cut short.
    #[display("network error: {_0}")]
    Network(#[error(not(source))] String),
    /// The service answered with a non-success status.
    #[display("unexpected HTTP status {_0}")]
    Status(#[error(not(source))] u16),
    /// The service answered, but not with what was asked for.
    #[display("invalid payload: {_0}")]
    InvalidPayload(#[error(not(source))] String),
    /// The requested record does not exist remotely.
    #[display("not found: {_0}")]
    NotFound(#[error(not(source))] String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ErrorKind::Network("reset".into()), "network error: reset")]
    #[case(ErrorKind::Status(503), "unexpected HTTP status 503")]
    #[case(ErrorKind::NotFound("decklist 1".into()), "not found: decklist 1")]
    #[case(ErrorKind::InvalidPayload("empty".into()), "invalid payload: empty")]
    fn test_display(#[case] kind: ErrorKind, #[case] expected: &str) {
        assert_eq!(kind.to_string(), expected);
    }
}
