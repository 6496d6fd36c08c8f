//! Core pipeline implementation

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use lexlens_domain::traits::{AnalysisStore, EntityRecognizer, Summarizer};
use lexlens_domain::{
    char_prefix, AnalysisRecord, RiskScorer, UploadedDocument, UNSTORED_ANALYSIS_ID,
};
use lexlens_ingest::{PdfExtractor, StagingArea};
use std::sync::{Arc, Mutex};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// The result of one analysis request.
///
/// `id` is the store-assigned identifier, or the sentinel when the store
/// was unavailable. In the sentinel case `stored` is false and the record
/// itself is still complete and correct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOutcome {
    /// Store-assigned identifier, or the sentinel placeholder
    pub id: String,

    /// The assembled analysis
    pub record: AnalysisRecord,

    /// Whether the record was durably persisted
    pub stored: bool,
}

/// Orchestrates one analysis: stage, extract, analyze, assemble, persist.
///
/// Holds immutable handles to the model services and the store, injected at
/// construction (initialize-once, serve-many, no reload). One instance is
/// shared across requests; each call to [`analyze`](AnalysisPipeline::analyze)
/// is an independent single-flow execution.
pub struct AnalysisPipeline<Sm, Nr, St> {
    summarizer: Arc<Sm>,
    recognizer: Arc<Nr>,
    store: Arc<Mutex<St>>,
    extractor: PdfExtractor,
    staging: StagingArea,
    scorer: RiskScorer,
    config: PipelineConfig,
}

impl<Sm, Nr, St> AnalysisPipeline<Sm, Nr, St>
where
    Sm: Summarizer + Send + Sync,
    Nr: EntityRecognizer + Send + Sync,
    St: AnalysisStore + Send,
    Sm::Error: std::fmt::Display,
    Nr::Error: std::fmt::Display,
    St::Error: std::fmt::Display,
{
    /// Create a new pipeline
    pub fn new(
        summarizer: Sm,
        recognizer: Nr,
        store: St,
        staging: StagingArea,
        config: PipelineConfig,
    ) -> Self {
        Self {
            summarizer: Arc::new(summarizer),
            recognizer: Arc::new(recognizer),
            store: Arc::new(Mutex::new(store)),
            extractor: PdfExtractor::new(),
            staging,
            scorer: RiskScorer::default(),
            config,
        }
    }

    /// Replace the default risk scorer (alternative keyword vocabulary)
    pub fn with_risk_scorer(mut self, scorer: RiskScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Run the full analysis for one upload.
    ///
    /// Validation happens before anything else: a non-`.pdf` filename fails
    /// here with no staging write, no extraction, and no model calls. After
    /// extraction, the three analysis stages run concurrently over fixed
    /// input windows; the first failure aborts the request. A persistence
    /// failure alone does not abort: the outcome then carries the sentinel
    /// identifier.
    pub async fn analyze(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<AnalysisOutcome, PipelineError> {
        let document =
            UploadedDocument::new(filename, bytes).map_err(PipelineError::InvalidDocument)?;

        info!(
            "Starting analysis for '{}' ({} bytes)",
            document.filename,
            document.bytes.len()
        );

        // The raw upload goes to disk before extraction is attempted
        self.staging
            .stage(&document.filename, &document.bytes)
            .await?;

        // PDF parsing is CPU-bound; keep it off the async executor
        let extractor = self.extractor;
        let UploadedDocument { filename, bytes } = document;
        let text = tokio::task::spawn_blocking(move || extractor.extract(&bytes))
            .await
            .map_err(|e| PipelineError::Internal(format!("Extraction task failed: {}", e)))??;

        debug!(
            "Extracted {} chars from '{}' (summary window {}, entity window {})",
            text.chars().count(),
            filename,
            self.config.summary_window_chars,
            self.config.entity_window_chars
        );

        // Each stage's input window is fixed before any stage runs
        let summary_input = char_prefix(&text, self.config.summary_window_chars);
        let entity_input = char_prefix(&text, self.config.entity_window_chars);
        let stage_timeout = self.config.stage_timeout();

        let summary_fut = async {
            timeout(stage_timeout, self.summarizer.summarize(summary_input))
                .await
                .map_err(|_| PipelineError::StageTimeout("summarization"))?
                .map_err(|e| PipelineError::Summarization(e.to_string()))
        };
        let entities_fut = async {
            timeout(stage_timeout, self.recognizer.recognize(entity_input))
                .await
                .map_err(|_| PipelineError::StageTimeout("entity extraction"))?
                .map_err(|e| PipelineError::EntityExtraction(e.to_string()))
        };
        // Risk scoring sees the full text and cannot fail
        let risk_fut = async { Ok::<_, PipelineError>(self.scorer.score(&text)) };

        // Independent stages, jointly awaited: the first failure aborts
        // the others and the request
        let (summary, mut entities, risk_level) =
            tokio::try_join!(summary_fut, entities_fut, risk_fut)?;

        let detected = entities.len();
        entities.truncate(self.config.max_entities);
        if detected > entities.len() {
            debug!(
                "Keeping {} of {} detected entities",
                entities.len(),
                detected
            );
        }

        let record = AnalysisRecord::new(filename, summary, risk_level, entities);

        // Persistence is best-effort relative to the response: a store
        // failure degrades to the sentinel identifier instead of failing
        // the request
        let insert_result = self
            .store
            .lock()
            .map_err(|e| e.to_string())
            .and_then(|mut store| {
                store
                    .insert_analysis(&record)
                    .map_err(|e| e.to_string())
            });

        let outcome = match insert_result {
            Ok(id) => {
                info!(
                    "Analysis of '{}' stored as {} (risk {})",
                    record.filename, id, record.risk_level
                );
                AnalysisOutcome {
                    id: id.to_string(),
                    record,
                    stored: true,
                }
            }
            Err(e) => {
                warn!(
                    "Failed to persist analysis of '{}': {}",
                    record.filename, e
                );
                AnalysisOutcome {
                    id: UNSTORED_ANALYSIS_ID.to_string(),
                    record,
                    stored: false,
                }
            }
        };

        Ok(outcome)
    }
}
