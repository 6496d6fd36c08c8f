//! Error types for the analysis pipeline

use lexlens_ingest::IngestError;
use thiserror::Error;

/// Errors that abort an analysis request
///
/// Persistence failures do not appear here: the orchestrator recovers them
/// locally and returns the computed result with a sentinel identifier.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The upload is not an acceptable document (wrong file type)
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Staging or text extraction failed
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// The summarization service failed
    #[error("Summarization failed: {0}")]
    Summarization(String),

    /// The entity recognition service failed
    #[error("Entity extraction failed: {0}")]
    EntityExtraction(String),

    /// A model stage exceeded its time budget
    #[error("Stage timed out: {0}")]
    StageTimeout(&'static str),

    /// Task scheduling failure
    #[error("Internal error: {0}")]
    Internal(String),
}
