//! Configuration for the analysis pipeline

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the analysis pipeline
///
/// The window sizes and the entity cap are hand-tuned constants inherited
/// from observed behavior, exposed here as tuning knobs. Nothing else in the
/// system may depend on their exact values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Characters of document text fed to the summarizer (hard window,
    /// not token-aware)
    pub summary_window_chars: usize,

    /// Characters of document text scanned for entities
    pub entity_window_chars: usize,

    /// Maximum entities kept in the final result (presentation cap,
    /// applied after recognition)
    pub max_entities: usize,

    /// Maximum time for a single model stage (seconds)
    pub stage_timeout_secs: u64,
}

impl PipelineConfig {
    /// Get the stage timeout as a Duration
    pub fn stage_timeout(&self) -> Duration {
        Duration::from_secs(self.stage_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.summary_window_chars == 0 {
            return Err("summary_window_chars must be greater than 0".to_string());
        }
        if self.entity_window_chars == 0 {
            return Err("entity_window_chars must be greater than 0".to_string());
        }
        if self.max_entities == 0 {
            return Err("max_entities must be greater than 0".to_string());
        }
        if self.stage_timeout_secs == 0 {
            return Err("stage_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for PipelineConfig {
    /// Defaults matching the observed system: 1024-char summarization
    /// window, 5000-char entity window, 10 entities kept
    fn default() -> Self {
        Self {
            summary_window_chars: 1024,
            entity_window_chars: 5000,
            max_entities: 10,
            stage_timeout_secs: 120,
        }
    }
}
