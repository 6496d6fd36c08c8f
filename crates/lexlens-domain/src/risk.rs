//! Risk scoring - keyword-presence heuristic over the full document text

use crate::analysis::RiskLevel;

/// Default risk-indicative keywords for legal documents.
///
/// Counting is by distinct keyword present, not occurrence frequency, and
/// uses substring containment: a keyword embedded inside a longer word
/// ("terminationclause") still counts. That is deliberate behavior, kept
/// as-is; whole-word matching would change classifications.
pub const DEFAULT_RISK_VOCABULARY: [&str; 5] =
    ["termination", "liability", "breach", "indemnity", "penalty"];

/// Scores a document's risk from the presence of vocabulary keywords.
///
/// The vocabulary is a tuning knob (alternative keyword sets can be
/// injected), but the thresholds are fixed: more than 5 distinct keywords
/// is High, more than 2 is Medium, anything else is Low.
///
/// Scoring is a pure string scan and never fails; a text containing no
/// keywords is simply Low.
#[derive(Debug, Clone)]
pub struct RiskScorer {
    vocabulary: Vec<String>,
}

impl RiskScorer {
    /// Create a scorer with a custom keyword vocabulary.
    ///
    /// Keywords are matched case-insensitively; they are lowercased here
    /// once so the per-document scan only lowercases the text.
    pub fn new<I, S>(vocabulary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            vocabulary: vocabulary
                .into_iter()
                .map(|k| k.into().to_lowercase())
                .collect(),
        }
    }

    /// Number of keywords in the vocabulary
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Classify the full document text.
    ///
    /// Each keyword contributes at most 1 to the count regardless of how
    /// many times it occurs.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexlens_domain::{RiskLevel, RiskScorer};
    ///
    /// let scorer = RiskScorer::default();
    /// assert_eq!(scorer.score("a plain receipt"), RiskLevel::Low);
    /// assert_eq!(
    ///     scorer.score("termination, liability and breach clauses"),
    ///     RiskLevel::Medium,
    /// );
    /// ```
    pub fn score(&self, text: &str) -> RiskLevel {
        let haystack = text.to_lowercase();
        let count = self
            .vocabulary
            .iter()
            .filter(|keyword| haystack.contains(keyword.as_str()))
            .count();

        if count > 5 {
            RiskLevel::High
        } else if count > 2 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new(DEFAULT_RISK_VOCABULARY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A wider vocabulary so the High threshold (count > 5) is reachable.
    fn wide_scorer() -> RiskScorer {
        RiskScorer::new([
            "termination",
            "liability",
            "breach",
            "indemnity",
            "penalty",
            "damages",
            "default",
        ])
    }

    #[test]
    fn test_no_keywords_is_low() {
        let scorer = RiskScorer::default();
        assert_eq!(scorer.score("a perfectly harmless shopping list"), RiskLevel::Low);
        assert_eq!(scorer.score(""), RiskLevel::Low);
    }

    #[test]
    fn test_two_keywords_is_low() {
        let scorer = RiskScorer::default();
        assert_eq!(
            scorer.score("termination and liability are discussed"),
            RiskLevel::Low
        );
    }

    #[test]
    fn test_three_keywords_is_medium() {
        let scorer = RiskScorer::default();
        assert_eq!(
            scorer.score("termination, liability and breach"),
            RiskLevel::Medium
        );
    }

    #[test]
    fn test_five_keywords_is_medium() {
        let scorer = RiskScorer::default();
        assert_eq!(
            scorer.score("termination liability breach indemnity penalty"),
            RiskLevel::Medium
        );
    }

    #[test]
    fn test_six_keywords_is_high() {
        let scorer = wide_scorer();
        assert_eq!(
            scorer.score("termination liability breach indemnity penalty damages"),
            RiskLevel::High
        );
    }

    #[test]
    fn test_repeats_count_once() {
        let scorer = RiskScorer::default();
        // One distinct keyword, many occurrences: still Low
        assert_eq!(
            scorer.score("breach breach breach breach breach breach breach"),
            RiskLevel::Low
        );
    }

    #[test]
    fn test_case_insensitive() {
        let scorer = RiskScorer::default();
        assert_eq!(
            scorer.score("TERMINATION, Liability and BrEaCh"),
            RiskLevel::Medium
        );
    }

    #[test]
    fn test_substring_containment_counts() {
        let scorer = RiskScorer::default();
        // Keyword embedded in a longer token still counts
        assert_eq!(scorer.score("the terminationX clause"), RiskLevel::Low);
        assert_eq!(
            scorer.score("terminationclause liabilitycap breachremedy"),
            RiskLevel::Medium
        );
    }

    #[test]
    fn test_custom_vocabulary() {
        let scorer = RiskScorer::new(["FORCE MAJEURE", "arbitration", "waiver"]);
        assert_eq!(scorer.vocabulary_len(), 3);
        // Custom keywords are lowercased at construction, so matching stays
        // case-insensitive in both directions
        assert_eq!(
            scorer.score("force majeure, Arbitration, and waiver terms"),
            RiskLevel::Medium
        );
    }
}
