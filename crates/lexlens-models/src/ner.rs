//! Named entity recognition service client
//!
//! Talks to the NER sidecar over HTTP. The service returns spans in the
//! order they occur in the scanned text; this client preserves that order
//! and applies no cap of its own; truncation is the caller's concern.

use crate::ModelError;
use lexlens_domain::traits::EntityRecognizer;
use lexlens_domain::Entity;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default NER service endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8602";

/// Default NER model
pub const DEFAULT_MODEL: &str = "bert-base-ner";

/// Default timeout for recognition requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the entity recognition service
pub struct NerClient {
    endpoint: String,
    model: String,
    client: reqwest::Client,
}

/// Request body for the NER API
#[derive(Serialize)]
struct NerRequest {
    model: String,
    text: String,
}

/// One span on the wire
#[derive(Deserialize)]
struct WireEntity {
    text: String,
    label: String,
}

/// Response from the NER API
#[derive(Deserialize)]
struct NerResponse {
    entities: Vec<WireEntity>,
}

impl NerClient {
    /// Create a new client for the service at `endpoint` using `model`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use lexlens_models::NerClient;
    ///
    /// let client = NerClient::new("http://localhost:8602", "bert-base-ner");
    /// ```
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            client,
        }
    }

    /// Create a client with the default endpoint and model
    pub fn default_endpoint() -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_MODEL)
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

impl EntityRecognizer for NerClient {
    type Error = ModelError;

    /// Recognize entities in one text window, in document order.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The service is not running
    /// - The model is not available on the service
    /// - Network communication fails
    /// - The response body is not the expected shape
    async fn recognize(&self, text: &str) -> Result<Vec<Entity>, ModelError> {
        let url = format!("{}/ner", self.endpoint);

        let request_body = NerRequest {
            model: self.model.clone(),
            text: text.to_string(),
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
            .json::<NerResponse>()
            .await
            .map_err(|e| ModelError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        Ok(parsed
            .entities
            .into_iter()
            .map(|e| Entity::new(e.text, e.label))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = NerClient::new("http://localhost:8602", "bert-base-ner");
        assert_eq!(client.endpoint, "http://localhost:8602");
        assert_eq!(client.model, "bert-base-ner");
    }

    #[test]
    fn test_default_endpoint() {
        let client = NerClient::default_endpoint();
        assert_eq!(client.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(client.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_wire_entity_parsing() {
        let body = r#"{"entities":[{"text":"Acme Corp","label":"ORG"},{"text":"Jane Doe","label":"PERSON"}]}"#;
        let parsed: NerResponse = serde_json::from_str(body).unwrap();

        assert_eq!(parsed.entities.len(), 2);
        assert_eq!(parsed.entities[0].text, "Acme Corp");
        assert_eq!(parsed.entities[0].label, "ORG");
        assert_eq!(parsed.entities[1].text, "Jane Doe");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_communication_error() {
        let client = NerClient::new("http://127.0.0.1:9", "bert-base-ner");

        let result = client.recognize("test").await;
        assert!(matches!(result, Err(ModelError::Communication(_))));
    }

    // Integration test (requires a running NER service)
    #[tokio::test]
    #[ignore] // Only run when the service is available
    async fn test_recognize_integration() {
        let client = NerClient::default_endpoint();
        let result = client
            .recognize("Jane Doe of Acme Corp signed the lease in New York.")
            .await;

        if let Ok(entities) = result {
            assert!(!entities.is_empty());
        }
    }
}
