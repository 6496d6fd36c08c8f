//! HTTP request handlers for the analysis service.
//!
//! Implements the upload endpoint and health check using axum. The handlers
//! are generic over the pipeline's model and store seams so tests can drive
//! them with deterministic fakes.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use lexlens_domain::traits::{AnalysisStore, EntityRecognizer, Summarizer};
use lexlens_pipeline::{AnalysisOutcome, AnalysisPipeline, PipelineError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;

/// Shared application state
pub struct AppState<Sm, Nr, St> {
    /// The one pipeline instance serving every request
    pub pipeline: Arc<AnalysisPipeline<Sm, Nr, St>>,
}

impl<Sm, Nr, St> Clone for AppState<Sm, Nr, St> {
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
        }
    }
}

/// One entity on the wire
#[derive(Debug, Serialize, Deserialize)]
pub struct EntityResponse {
    /// The span of text
    pub text: String,
    /// Category tag
    pub label: String,
}

/// Successful analysis response
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Store-assigned identifier, or the sentinel when storage failed
    pub id: String,
    /// Original upload filename
    pub filename: String,
    /// Condensed summary
    pub summary: String,
    /// "Low" | "Medium" | "High"
    pub risk_level: String,
    /// Recognized entities in document order, at most 10
    pub entities: Vec<EntityResponse>,
}

impl AnalysisResponse {
    fn from_outcome(outcome: AnalysisOutcome) -> Self {
        Self {
            id: outcome.id,
            filename: outcome.record.filename,
            summary: outcome.record.summary,
            risk_level: outcome.record.risk_level.as_str().to_string(),
            entities: outcome
                .record
                .entities
                .into_iter()
                .map(|e| EntityResponse {
                    text: e.text,
                    label: e.label,
                })
                .collect(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Malformed request (bad multipart body, missing file part)
    BadRequest(String),
    /// Pipeline failure
    Pipeline(PipelineError),
}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        AppError::Pipeline(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Pipeline(e) => {
                let status = match &e {
                    PipelineError::InvalidDocument(_) => StatusCode::BAD_REQUEST,
                    PipelineError::Ingest(_) => StatusCode::INTERNAL_SERVER_ERROR,
                    PipelineError::Summarization(_) | PipelineError::EntityExtraction(_) => {
                        StatusCode::BAD_GATEWAY
                    }
                    PipelineError::StageTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
                    PipelineError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.to_string())
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

/// POST /upload - Analyze one uploaded PDF
///
/// Accepts a multipart form with a single `file` part. The filename is
/// validated before any pipeline stage runs.
async fn upload_document<Sm, Nr, St>(
    State(state): State<AppState<Sm, Nr, St>>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError>
where
    Sm: Summarizer + Send + Sync + 'static,
    Nr: EntityRecognizer + Send + Sync + 'static,
    St: AnalysisStore + Send + 'static,
    Sm::Error: std::fmt::Display,
    Nr::Error: std::fmt::Display,
    St::Error: std::fmt::Display,
{
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            let filename = field
                .file_name()
                .map(|s| s.to_string())
                .ok_or_else(|| AppError::BadRequest("File part has no filename".to_string()))?;
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;
            upload = Some((filename, bytes.to_vec()));
            break;
        }
    }

    let (filename, bytes) =
        upload.ok_or_else(|| AppError::BadRequest("Missing 'file' part".to_string()))?;

    let outcome = state.pipeline.analyze(&filename, bytes).await?;

    Ok(Json(AnalysisResponse::from_outcome(outcome)))
}

/// GET /health - Liveness probe
async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
    })
}

/// Create the axum router with all routes
///
/// CORS is permissive: the browser frontend is served from another origin.
/// The upload route enforces the configured body size limit.
pub fn create_router<Sm, Nr, St>(
    state: AppState<Sm, Nr, St>,
    max_upload_bytes: usize,
) -> Router
where
    Sm: Summarizer + Send + Sync + 'static,
    Nr: EntityRecognizer + Send + Sync + 'static,
    St: AnalysisStore + Send + 'static,
    Sm::Error: std::fmt::Display,
    Nr::Error: std::fmt::Display,
    St::Error: std::fmt::Display,
{
    Router::new()
        .route("/upload", post(upload_document::<Sm, Nr, St>))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
