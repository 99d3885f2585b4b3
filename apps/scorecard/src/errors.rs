use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::gateway::{AnalysisFailure, SubmitError};
use crate::models::ValidationError;
use crate::report::ReportError;
use crate::store::StoreError;

pub const NO_RESULT_MESSAGE: &str =
    "No analysis results found. Please analyze your resume first.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The session's result slot is empty or unparseable.
    #[error("No result available")]
    NoResult,

    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisFailure),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Invalid(e) => AppError::Validation(e),
            SubmitError::Failed(e) => AppError::Analysis(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string()),
            AppError::NoResult => (
                StatusCode::NOT_FOUND,
                "NO_RESULT",
                NO_RESULT_MESSAGE.to_string(),
            ),
            // The cause was logged by the gateway; only the user-facing text leaves.
            AppError::Analysis(failure) => (
                StatusCode::BAD_GATEWAY,
                "ANALYSIS_FAILED",
                failure.message.clone(),
            ),
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "Could not access the analysis result".to_string(),
                )
            }
            AppError::Report(e) => {
                tracing::error!("Report error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "REPORT_ERROR",
                    "Could not generate the report".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
