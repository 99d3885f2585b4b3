//! Handlers over the stored result: dashboard view-model, ring SVG, PDF export.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::AnalysisResult;
use crate::report::{self, REPORT_FILENAME};
use crate::session::SessionId;
use crate::state::AppState;
use crate::visual::{
    render_ring_svg, ArcAnimation, ResultsDashboard, RingGeometry, DEFAULT_SIZE,
    DEFAULT_STROKE_WIDTH,
};

const MIN_RING_SIZE: f64 = 16.0;
const MAX_RING_SIZE: f64 = 1024.0;

/// Reads the session's current result. A missing session reads like an empty slot.
async fn load_result(state: &AppState, headers: &HeaderMap) -> Result<AnalysisResult, AppError> {
    let session = SessionId::from_headers(headers).ok_or(AppError::NoResult)?;
    state.store.get(&session).await.ok_or(AppError::NoResult)
}

/// GET /api/v1/results
pub async fn handle_get_results(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ResultsDashboard>, AppError> {
    let result = load_result(&state, &headers).await?;
    Ok(Json(ResultsDashboard::build(result)))
}

#[derive(Debug, Deserialize)]
pub struct RingQuery {
    pub size: Option<f64>,
    pub stroke_width: Option<f64>,
}

/// GET /api/v1/results/ring.svg
pub async fn handle_ring_svg(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<RingQuery>,
) -> Result<Response, AppError> {
    let result = load_result(&state, &headers).await?;

    let size = query
        .size
        .filter(|s| s.is_finite())
        .unwrap_or(DEFAULT_SIZE)
        .clamp(MIN_RING_SIZE, MAX_RING_SIZE);
    let stroke_width = query
        .stroke_width
        .filter(|w| w.is_finite())
        .unwrap_or(DEFAULT_STROKE_WIDTH)
        .clamp(1.0, size / 2.0);

    let ring = RingGeometry::new(
        f64::from(result.overall_score.value()),
        size,
        stroke_width,
    );
    let svg = render_ring_svg(&ring, &ArcAnimation::default());

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

/// GET /api/v1/results/report
pub async fn handle_report(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let result = load_result(&state, &headers).await?;
    let layout = state.report_layout.clone();

    // PDF assembly is CPU-bound; keep it off the async workers.
    let pdf = tokio::task::spawn_blocking(move || report::synthesize(&result, &layout))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in report synthesis: {e}"))
        })??;

    let disposition = format!("attachment; filename=\"{REPORT_FILENAME}\"");
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    )
        .into_response())
}

/// DELETE /api/v1/results
pub async fn handle_clear_results(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    if let Some(session) = SessionId::from_headers(&headers) {
        state.store.clear(&session).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}
