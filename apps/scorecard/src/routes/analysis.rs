//! Submission handlers: validate input, run the analysis, persist the result.

use axum::{
    extract::{Multipart, State},
    http::{HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::{AnalysisResult, ResumeFile, ValidationError};
use crate::session::{SessionId, SESSION_HEADER};
use crate::state::AppState;

/// Multipart part carrying the uploaded document.
const FILE_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub session_id: String,
    pub result: AnalysisResult,
}

/// POST /api/v1/analyze
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<AnalyzeTextRequest>,
) -> Result<Response, AppError> {
    let session = SessionId::from_headers(&headers).unwrap_or_else(SessionId::mint);
    let result = state.gateway.submit_text(&req.text).await?;
    store_result(&state, session, "text", result).await
}

/// POST /api/v1/analyze/file
pub async fn handle_analyze_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!("Rejected upload: {e}");
        ValidationError::UnreadableUpload
    })? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| {
            warn!("Rejected upload: {e}");
            ValidationError::UnreadableUpload
        })?;
        upload = Some((bytes, content_type, filename));
        break;
    }

    let (bytes, content_type, filename) = upload.ok_or(ValidationError::MissingFile)?;
    let file = ResumeFile::new(bytes, content_type.as_deref(), filename)?;
    let session = SessionId::from_headers(&headers).unwrap_or_else(SessionId::mint);
    let result = state.gateway.submit_file(&file).await?;
    store_result(&state, session, "file", result).await
}

/// Overwrites the session's slot with a completed analysis.
///
/// The submission is awaited inline by the handlers: if the client disconnects,
/// the handler future is dropped, the upstream request is aborted and this never runs.
async fn store_result(
    state: &AppState,
    session: SessionId,
    kind: &'static str,
    result: AnalysisResult,
) -> Result<Response, AppError> {
    state.store.put(&session, &result).await?;

    info!(
        session = session.as_str(),
        input = kind,
        overall_score = result.overall_score.value(),
        "Analysis stored"
    );

    let header = HeaderValue::from_str(session.as_str())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid session header: {e}")))?;
    let mut response = Json(AnalyzeResponse {
        session_id: session.as_str().to_string(),
        result,
    })
    .into_response();
    response.headers_mut().insert(SESSION_HEADER, header);
    Ok(response)
}
