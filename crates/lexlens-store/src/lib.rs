//! LexLens Storage Layer
//!
//! Implements the `AnalysisStore` trait over SQLite.
//!
//! # Architecture
//!
//! - One `analyses` table, insert-only from the pipeline's perspective
//! - Identifiers are UUIDv7 (`AnalysisId`), assigned at insert time
//! - Entities serialize into a JSON text column at this boundary; domain
//!   types themselves carry no serialization concerns
//!
//! # Examples
//!
//! ```no_run
//! use lexlens_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for analysis inserts
//! ```

#![warn(missing_docs)]

use lexlens_domain::traits::AnalysisStore;
use lexlens_domain::{AnalysisId, AnalysisRecord, Entity, RiskLevel};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-based implementation of `AnalysisStore`
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Callers share a store across
/// tasks by wrapping it in a `Mutex`, which the append-only access pattern
/// keeps uncontended in practice.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use lexlens_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("lexlens.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Convert AnalysisId to bytes for storage
    fn analysis_id_to_bytes(id: AnalysisId) -> Vec<u8> {
        id.value().to_be_bytes().to_vec()
    }

    /// Convert bytes to AnalysisId
    fn bytes_to_analysis_id(bytes: &[u8]) -> Result<AnalysisId, StoreError> {
        if bytes.len() != 16 {
            return Err(StoreError::InvalidData(format!(
                "Expected 16 bytes for AnalysisId, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 16];
        arr.copy_from_slice(bytes);
        Ok(AnalysisId::from_value(u128::from_be_bytes(arr)))
    }

    /// Serialize entities into the JSON column format
    fn entities_to_json(entities: &[Entity]) -> String {
        let values: Vec<serde_json::Value> = entities
            .iter()
            .map(|e| serde_json::json!({ "text": e.text, "label": e.label }))
            .collect();
        serde_json::Value::Array(values).to_string()
    }

    /// Deserialize entities from the JSON column format
    fn entities_from_json(raw: &str) -> Result<Vec<Entity>, StoreError> {
        let value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| StoreError::InvalidData(format!("Malformed entities JSON: {}", e)))?;

        let array = value.as_array().ok_or_else(|| {
            StoreError::InvalidData("Entities column is not a JSON array".to_string())
        })?;

        array
            .iter()
            .map(|item| {
                let text = item.get("text").and_then(|v| v.as_str()).ok_or_else(|| {
                    StoreError::InvalidData("Entity record missing 'text'".to_string())
                })?;
                let label = item.get("label").and_then(|v| v.as_str()).ok_or_else(|| {
                    StoreError::InvalidData("Entity record missing 'label'".to_string())
                })?;
                Ok(Entity::new(text, label))
            })
            .collect()
    }
}

impl AnalysisStore for SqliteStore {
    type Error = StoreError;

    fn insert_analysis(&mut self, record: &AnalysisRecord) -> Result<AnalysisId, Self::Error> {
        let id = AnalysisId::new();
        let id_bytes = Self::analysis_id_to_bytes(id);
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;

        self.conn.execute(
            "INSERT INTO analyses (id, filename, summary, risk_level, entities, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                &id_bytes,
                &record.filename,
                &record.summary,
                record.risk_level.as_str(),
                Self::entities_to_json(&record.entities),
                created_at,
            ],
        )?;

        Ok(id)
    }

    fn get_analysis(&self, id: AnalysisId) -> Result<Option<AnalysisRecord>, Self::Error> {
        let id_bytes = Self::analysis_id_to_bytes(id);

        let row = self
            .conn
            .query_row(
                "SELECT filename, summary, risk_level, entities
                 FROM analyses WHERE id = ?1",
                params![&id_bytes],
                |row| {
                    let filename: String = row.get(0)?;
                    let summary: String = row.get(1)?;
                    let risk_level: String = row.get(2)?;
                    let entities: String = row.get(3)?;
                    Ok((filename, summary, risk_level, entities))
                },
            )
            .optional()?;

        match row {
            Some((filename, summary, risk_raw, entities_raw)) => {
                let risk_level = RiskLevel::from_string(&risk_raw).map_err(StoreError::InvalidData)?;
                let entities = Self::entities_from_json(&entities_raw)?;
                Ok(Some(AnalysisRecord::new(
                    filename, summary, risk_level, entities,
                )))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_bytes_round_trip() {
        let id = AnalysisId::new();
        let bytes = SqliteStore::analysis_id_to_bytes(id);
        assert_eq!(bytes.len(), 16);
        assert_eq!(SqliteStore::bytes_to_analysis_id(&bytes).unwrap(), id);
    }

    #[test]
    fn test_id_bytes_wrong_length() {
        assert!(SqliteStore::bytes_to_analysis_id(&[0u8; 8]).is_err());
        assert!(SqliteStore::bytes_to_analysis_id(&[]).is_err());
    }

    #[test]
    fn test_entities_json_round_trip() {
        let entities = vec![
            Entity::new("Acme Corp", "ORG"),
            Entity::new("Jane Doe", "PERSON"),
        ];
        let json = SqliteStore::entities_to_json(&entities);
        let parsed = SqliteStore::entities_from_json(&json).unwrap();
        assert_eq!(parsed, entities);
    }

    #[test]
    fn test_entities_json_empty() {
        let json = SqliteStore::entities_to_json(&[]);
        assert_eq!(SqliteStore::entities_from_json(&json).unwrap(), vec![]);
    }

    #[test]
    fn test_entities_json_malformed() {
        assert!(SqliteStore::entities_from_json("not json").is_err());
        assert!(SqliteStore::entities_from_json("{}").is_err());
        assert!(SqliteStore::entities_from_json(r#"[{"text":"x"}]"#).is_err());
    }

    #[test]
    fn test_inserts_get_distinct_ids() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        let record = AnalysisRecord::new(
            "a.pdf".to_string(),
            "summary".to_string(),
            RiskLevel::Low,
            vec![],
        );

        let id1 = store.insert_analysis(&record).unwrap();
        let id2 = store.insert_analysis(&record).unwrap();
        assert_ne!(id1, id2);
    }
}
