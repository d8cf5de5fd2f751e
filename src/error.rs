//! Error types for pmwiki2md library.
//!
//! The conversion pipeline itself never fails; errors only arise at the
//! boundaries (reading records, writing pages, serializing metadata).

use std::io;
use thiserror::Error;

/// Result type alias for pmwiki2md operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while migrating page records.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not recognized as a PmWiki page record.
    #[error("Unknown file format: not a PmWiki page record")]
    UnknownFormat,

    /// The record has no page body.
    #[error("No content found in page record: {0}")]
    NoContent(String),

    /// A record field could not be interpreted.
    #[error("Invalid page record: {0}")]
    InvalidRecord(String),

    /// A `ctime`/`time` field is not a Unix timestamp.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Error during rendering (front matter, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
