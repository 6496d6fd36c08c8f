//! Analysis results - the output of one pipeline run

use std::fmt;

/// Sentinel identifier returned when the store could not persist a result.
///
/// A storage outage never discards a computed analysis; the caller receives
/// this placeholder instead of a store-assigned identifier.
pub const UNSTORED_ANALYSIS_ID: &str = "temp_id";

/// Unique identifier for a stored analysis, based on UUIDv7
///
/// UUIDv7 provides:
/// - Chronological sortability for temporal queries
/// - 128-bit uniqueness
/// - RFC 9562-standard format with broad ecosystem support
/// - No coordination required for distributed generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnalysisId(u128);

impl AnalysisId {
    /// Generate a new UUIDv7-based AnalysisId
    ///
    /// # Examples
    ///
    /// ```
    /// use lexlens_domain::AnalysisId;
    ///
    /// let id = AnalysisId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create an AnalysisId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse an AnalysisId from a UUIDv7 string
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid UUIDv7 string: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for AnalysisId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// A named span found in the document, with its category tag.
///
/// Entities keep the order in which the recognizer found them
/// (left-to-right document order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// The span of text
    pub text: String,

    /// Category tag (e.g. "PERSON", "ORG", "GPE")
    pub label: String,
}

impl Entity {
    /// Create a new entity record
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// Discrete risk classification for a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    /// At most 2 distinct risk keywords present
    Low,

    /// Between 3 and 5 distinct risk keywords present
    Medium,

    /// More than 5 distinct risk keywords present
    High,
}

impl RiskLevel {
    /// Stable string form used for storage and the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Parse from the stable string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s {
            "Low" => Ok(RiskLevel::Low),
            "Medium" => Ok(RiskLevel::Medium),
            "High" => Ok(RiskLevel::High),
            _ => Err(format!("Unknown risk level: {}", s)),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The assembled output of one analysis run.
///
/// Built once by the orchestrator after every stage has completed, then
/// handed to the persistence layer exactly once. Immutable after creation;
/// nothing updates a stored analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRecord {
    /// Original upload filename
    pub filename: String,

    /// Abstractive summary of the document's opening window
    pub summary: String,

    /// Keyword-driven risk classification over the full text
    pub risk_level: RiskLevel,

    /// Recognized entities in document order, capped by the orchestrator
    pub entities: Vec<Entity>,
}

impl AnalysisRecord {
    /// Create a new analysis record
    pub fn new(
        filename: String,
        summary: String,
        risk_level: RiskLevel,
        entities: Vec<Entity>,
    ) -> Self {
        Self {
            filename,
            summary,
            risk_level,
            entities,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: UUIDv7 ordering matches u128 ordering
        #[test]
        fn test_id_ordering_property(a: u128, b: u128) {
            let id_a = AnalysisId::from_value(a);
            let id_b = AnalysisId::from_value(b);

            prop_assert_eq!(id_a < id_b, a < b);
            prop_assert_eq!(id_a == id_b, a == b);
        }

        /// Property: Round-trip through string representation preserves ID
        #[test]
        fn test_id_string_roundtrip(value: u128) {
            let id = AnalysisId::from_value(value);
            let id_str = id.to_string();

            match AnalysisId::from_string(&id_str) {
                Ok(parsed) => prop_assert_eq!(id, parsed),
                Err(e) => return Err(TestCaseError::fail(e)),
            }
        }
    }
}
