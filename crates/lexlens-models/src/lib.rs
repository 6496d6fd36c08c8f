//! LexLens Model Service Layer
//!
//! Clients for the two inference services the pipeline depends on, plus
//! deterministic mocks for testing.
//!
//! # Architecture
//!
//! This crate provides implementations of the `Summarizer` and
//! `EntityRecognizer` traits from `lexlens-domain`. The real services are
//! opaque HTTP sidecars holding the model weights; each process loads its
//! model once at startup and serves many requests. This crate never loads
//! weights itself.
//!
//! # Providers
//!
//! - `SummarizerClient` / `NerClient`: HTTP inference clients
//! - `MockSummarizer` / `MockRecognizer`: deterministic mocks for testing
//!
//! # Examples
//!
//! ```
//! use lexlens_models::MockSummarizer;
//! use lexlens_domain::traits::Summarizer;
//!
//! # tokio_test::block_on(async {
//! let summarizer = MockSummarizer::new("A short summary.");
//! let result = summarizer.summarize("full text").await.unwrap();
//! assert_eq!(result, "A short summary.");
//! # });
//! ```

#![warn(missing_docs)]

pub mod ner;
pub mod summarizer;

use lexlens_domain::traits::{EntityRecognizer, Summarizer};
use lexlens_domain::Entity;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use ner::NerClient;
pub use summarizer::SummarizerClient;

/// Errors that can occur during model service operations
#[derive(Error, Debug)]
pub enum ModelError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the service
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available on the service
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("Model error: {0}")]
    Other(String),
}

/// Mock summarizer for deterministic testing
///
/// Returns a pre-configured summary without making any network calls, and
/// records every input it was asked to summarize so tests can assert on the
/// exact text window a caller passed in.
///
/// # Examples
///
/// ```
/// use lexlens_models::MockSummarizer;
/// use lexlens_domain::traits::Summarizer;
///
/// # tokio_test::block_on(async {
/// let summarizer = MockSummarizer::new("Fixed summary");
/// summarizer.summarize("some text").await.unwrap();
/// assert_eq!(summarizer.inputs(), vec!["some text".to_string()]);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockSummarizer {
    response: String,
    fail: bool,
    inputs: Arc<Mutex<Vec<String>>>,
}

impl MockSummarizer {
    /// Create a mock returning `response` for every input
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            fail: false,
            inputs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that fails every call
    pub fn failing() -> Self {
        Self {
            response: String::new(),
            fail: true,
            inputs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Inputs seen so far, in call order
    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }

    /// Number of times summarize was called
    pub fn call_count(&self) -> usize {
        self.inputs.lock().unwrap().len()
    }
}

impl Summarizer for MockSummarizer {
    type Error = ModelError;

    async fn summarize(&self, text: &str) -> Result<String, ModelError> {
        self.inputs.lock().unwrap().push(text.to_string());
        if self.fail {
            return Err(ModelError::Other("Mock summarizer error".to_string()));
        }
        Ok(self.response.clone())
    }
}

/// Mock entity recognizer for deterministic testing
///
/// Returns a pre-configured entity list in order, recording inputs the same
/// way as [`MockSummarizer`].
#[derive(Debug, Clone)]
pub struct MockRecognizer {
    entities: Vec<Entity>,
    fail: bool,
    inputs: Arc<Mutex<Vec<String>>>,
}

impl MockRecognizer {
    /// Create a mock returning `entities` for every input
    pub fn new(entities: Vec<Entity>) -> Self {
        Self {
            entities,
            fail: false,
            inputs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that fails every call
    pub fn failing() -> Self {
        Self {
            entities: Vec::new(),
            fail: true,
            inputs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Inputs seen so far, in call order
    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }

    /// Number of times recognize was called
    pub fn call_count(&self) -> usize {
        self.inputs.lock().unwrap().len()
    }
}

impl EntityRecognizer for MockRecognizer {
    type Error = ModelError;

    async fn recognize(&self, text: &str) -> Result<Vec<Entity>, ModelError> {
        self.inputs.lock().unwrap().push(text.to_string());
        if self.fail {
            return Err(ModelError::Other("Mock recognizer error".to_string()));
        }
        Ok(self.entities.clone())
    }
}
