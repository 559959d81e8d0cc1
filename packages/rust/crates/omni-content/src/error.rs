//! Error types for document stores.
//!
//! The parsing and ranking core is total; only the store can fail, and the
//! pipeline absorbs those failures.

use thiserror::Error;

/// Failure modes of a [`crate::store::DocumentStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// Identifier or folder does not exist.
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Store cannot serve requests right now.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Document exceeds the size limit.
    #[error("Document too large: {0} bytes (limit: {1})")]
    TooLarge(u64, u64),

    /// Document contains binary content (NULL bytes detected).
    #[error("Binary document detected: {0}")]
    BinaryContent(String),

    /// Low-level I/O error from std::io.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
