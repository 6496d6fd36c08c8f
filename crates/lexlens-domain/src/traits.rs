//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.
//!
//! The two model seams return `impl Future + Send` so that async providers
//! (HTTP inference clients) implement them directly and generic consumers can
//! still be driven from multi-threaded executors.

use crate::analysis::{AnalysisId, AnalysisRecord, Entity};
use core::future::Future;

/// Trait for producing a bounded abstractive summary
///
/// Implemented by the infrastructure layer (lexlens-models). Callers are
/// responsible for truncating the input to the summarization window; the
/// summarizer itself sees only what it is given. Generation must be
/// deterministic: identical inputs yield identical summaries.
pub trait Summarizer {
    /// Error type for summarization operations
    type Error;

    /// Summarize the given text window
    fn summarize(&self, text: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Trait for extracting named entities from text
///
/// Implemented by the infrastructure layer (lexlens-models). Entities are
/// returned in the order they were found in the scanned text; callers apply
/// any presentation cap.
pub trait EntityRecognizer {
    /// Error type for recognition operations
    type Error;

    /// Recognize entities in the given text window, in document order
    fn recognize(&self, text: &str)
        -> impl Future<Output = Result<Vec<Entity>, Self::Error>> + Send;
}

/// Trait for persisting completed analyses
///
/// Implemented by the infrastructure layer (lexlens-store). The store is
/// insert-only from the pipeline's perspective: one record per successful
/// analysis, no updates.
pub trait AnalysisStore {
    /// Error type for store operations
    type Error;

    /// Insert one analysis record, returning the store-assigned identifier
    fn insert_analysis(&mut self, record: &AnalysisRecord) -> Result<AnalysisId, Self::Error>;

    /// Fetch a stored analysis by identifier
    fn get_analysis(&self, id: AnalysisId) -> Result<Option<AnalysisRecord>, Self::Error>;
}
