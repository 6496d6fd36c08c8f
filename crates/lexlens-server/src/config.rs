//! Configuration file parsing for the server.
//!
//! Loads settings from TOML files: bind address, staging directory,
//! database path, inference service endpoints, and the pipeline tuning
//! knobs under a `[pipeline]` table.

use lexlens_pipeline::PipelineConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 8000)
    pub bind_port: u16,

    /// Directory raw uploads are staged into before extraction
    #[serde(default = "default_staging_dir")]
    pub staging_dir: PathBuf,

    /// SQLite database path
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Summarization service endpoint
    #[serde(default = "default_summarizer_endpoint")]
    pub summarizer_endpoint: String,

    /// Summarization model name
    #[serde(default = "default_summarizer_model")]
    pub summarizer_model: String,

    /// NER service endpoint
    #[serde(default = "default_ner_endpoint")]
    pub ner_endpoint: String,

    /// NER model name
    #[serde(default = "default_ner_model")]
    pub ner_model: String,

    /// Maximum accepted upload size in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Pipeline tuning knobs (windows, entity cap, stage timeout)
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

fn default_staging_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_database_path() -> PathBuf {
    PathBuf::from("lexlens.db")
}

fn default_summarizer_endpoint() -> String {
    lexlens_models::summarizer::DEFAULT_ENDPOINT.to_string()
}

fn default_summarizer_model() -> String {
    lexlens_models::summarizer::DEFAULT_MODEL.to_string()
}

fn default_ner_endpoint() -> String {
    lexlens_models::ner::DEFAULT_ENDPOINT.to_string()
}

fn default_ner_model() -> String {
    lexlens_models::ner::DEFAULT_MODEL.to_string()
}

/// Default upload limit: 25 MiB
fn default_max_upload_bytes() -> usize {
    25 * 1024 * 1024
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&contents)?;

        config.pipeline.validate().map_err(ConfigError::Invalid)?;
        if config.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_upload_bytes must be greater than 0".to_string(),
            ));
        }

        Ok(config)
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8000,
            staging_dir: default_staging_dir(),
            database_path: default_database_path(),
            summarizer_endpoint: default_summarizer_endpoint(),
            summarizer_model: default_summarizer_model(),
            ner_endpoint: default_ner_endpoint(),
            ner_model: default_ner_model(),
            max_upload_bytes: default_max_upload_bytes(),
            pipeline: PipelineConfig::default(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default_test_config();
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.bind_port, 8000);
        assert_eq!(config.staging_dir, PathBuf::from("uploads"));
        assert_eq!(config.pipeline.summary_window_chars, 1024);
    }

    #[test]
    fn test_bind_addr() {
        let config = ServerConfig::default_test_config();
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 9000
            staging_dir = "/var/lexlens/uploads"
            database_path = "/var/lexlens/lexlens.db"
            summarizer_endpoint = "http://models:8601"
            ner_endpoint = "http://models:8602"

            [pipeline]
            summary_window_chars = 2048
            entity_window_chars = 5000
            max_entities = 10
            stage_timeout_secs = 60
        "#;

        let config: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.bind_port, 9000);
        assert_eq!(config.summarizer_endpoint, "http://models:8601");
        assert_eq!(config.pipeline.summary_window_chars, 2048);
        assert_eq!(config.pipeline.stage_timeout_secs, 60);
        // Unspecified keys fall back to defaults
        assert_eq!(config.summarizer_model, "bart-large-cnn");
        assert_eq!(config.max_upload_bytes, 25 * 1024 * 1024);
    }

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let toml = r#"
            bind_address = "127.0.0.1"
            bind_port = 8000
        "#;

        let config: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.pipeline.summary_window_chars, 1024);
        assert_eq!(config.pipeline.entity_window_chars, 5000);
        assert_eq!(config.ner_model, "bert-base-ner");
    }
}
