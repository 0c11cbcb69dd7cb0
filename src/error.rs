//! Error types for the library engine.

use thiserror::Error;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Errors that can occur while building or mutating a library.
///
/// Queries never fail: an unknown segment id is a `None` lookup result and
/// malformed text degrades to empty tag and sentence sets.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LibraryError {
    /// Window/overlap combination that cannot tile a document.
    #[error("invalid chunk config: window size {window_size}, overlap {overlap}")]
    InvalidChunkConfig { window_size: usize, overlap: usize },

    /// A document with this id is already in the library and the duplicate
    /// policy rejects re-ingestion.
    #[error("document already ingested: {0}")]
    DuplicateDocument(String),
}
