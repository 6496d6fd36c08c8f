//! LexLens Analysis Pipeline
//!
//! The orchestrator for one document analysis: stage the raw upload, extract
//! text, run summarization, entity recognition, and risk scoring over their
//! respective text windows, assemble one immutable result, and hand it to
//! the persistence layer.
//!
//! # Failure policy
//!
//! Every stage failure aborts the whole request with nothing persisted,
//! except persistence itself, which degrades to a sentinel identifier so a
//! storage outage never discards a computed result. No stage is retried.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod pipeline;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use pipeline::{AnalysisOutcome, AnalysisPipeline};
