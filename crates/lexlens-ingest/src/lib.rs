//! LexLens Ingest Layer
//!
//! Turns an uploaded PDF byte stream into plain text, and durably stages the
//! raw upload before extraction is attempted.
//!
//! # Architecture
//!
//! - `PdfExtractor`: per-page text extraction over `lopdf`, concatenating
//!   pages in order with no inserted separators
//! - `StagingArea`: writes raw uploads to disk keyed by original filename
//!   (crash-recovery / audit trail)
//!
//! Extraction failures abort the whole ingest; a single page that yields no
//! text is a known limitation, not a failure.

#![warn(missing_docs)]

pub mod error;
pub mod extract;
pub mod staging;

pub use error::IngestError;
pub use extract::PdfExtractor;
pub use staging::StagingArea;
