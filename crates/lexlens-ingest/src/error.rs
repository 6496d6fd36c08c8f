//! Error types for ingest

use thiserror::Error;

/// Errors that can occur while staging or extracting an upload
#[derive(Error, Debug)]
pub enum IngestError {
    /// The byte stream is not a readable PDF
    #[error("Unreadable PDF: {0}")]
    UnreadablePdf(String),

    /// Failed to write the raw upload to the staging area
    #[error("Failed to stage upload '{filename}': {source}")]
    Staging {
        /// Original upload filename
        filename: String,
        /// Underlying I/O error
        source: std::io::Error,
    },
}
