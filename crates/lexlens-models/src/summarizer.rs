//! Summarization service client
//!
//! Talks to the abstractive summarization sidecar over HTTP. The service
//! holds the model weights (loaded once at its own startup); this client
//! only ships text windows and reads summaries back.
//!
//! Generation is requested with sampling disabled so that identical inputs
//! always yield identical summaries. A failed call surfaces immediately:
//! there are no retries and no placeholder summaries.

use crate::ModelError;
use lexlens_domain::traits::Summarizer;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default summarization service endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8601";

/// Default summarization model
pub const DEFAULT_MODEL: &str = "bart-large-cnn";

/// Minimum summary length budget (model tokens)
pub const DEFAULT_MIN_LENGTH: u32 = 40;

/// Maximum summary length budget (model tokens)
pub const DEFAULT_MAX_LENGTH: u32 = 150;

/// Default timeout for summarization requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the summarization service
pub struct SummarizerClient {
    endpoint: String,
    model: String,
    min_length: u32,
    max_length: u32,
    client: reqwest::Client,
}

/// Request body for the summarize API
#[derive(Serialize)]
struct SummarizeRequest {
    model: String,
    text: String,
    min_length: u32,
    max_length: u32,
    /// Always false: greedy decoding for reproducible output
    sample: bool,
}

/// Response from the summarize API
#[derive(Deserialize)]
struct SummarizeResponse {
    summary: String,
}

impl SummarizerClient {
    /// Create a new client for the service at `endpoint` using `model`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use lexlens_models::SummarizerClient;
    ///
    /// let client = SummarizerClient::new("http://localhost:8601", "bart-large-cnn");
    /// ```
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
            client,
        }
    }

    /// Create a client with the default endpoint and model
    pub fn default_endpoint() -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_MODEL)
    }

    /// Override the summary length budget (model tokens)
    pub fn with_length_budget(mut self, min_length: u32, max_length: u32) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap();
        self
    }
}

impl Summarizer for SummarizerClient {
    type Error = ModelError;

    /// Summarize one text window.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The service is not running
    /// - The model is not available on the service
    /// - Network communication fails
    /// - The response body is not the expected shape
    async fn summarize(&self, text: &str) -> Result<String, ModelError> {
        let url = format!("{}/summarize", self.endpoint);

        let request_body = SummarizeRequest {
            model: self.model.clone(),
            text: text.to_string(),
            min_length: self.min_length,
            max_length: self.max_length,
            sample: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ModelError::Communication(format!("Request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ModelError::ModelNotAvailable(self.model.clone()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ModelError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let parsed = response
            .json::<SummarizeResponse>()
            .await
            .map_err(|e| ModelError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        Ok(parsed.summary)
    }
}
