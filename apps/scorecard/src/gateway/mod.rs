//! Analysis Gateway: the single point of entry for calls to the Analysis Service.
//!
//! Sends a `ResumeInput` upstream and decodes the response into an `AnalysisResult`.
//! There is no retry: a failed submission surfaces as `AnalysisFailure` and the user
//! resubmits explicitly. Every exchange runs under one fixed deadline.

use std::time::Duration;

use reqwest::{
    multipart::{Form, Part},
    Client,
};
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::models::{AnalysisResult, ResumeFile, ResumeInput, ValidationError};

const TEXT_PATH: &str = "/analyze";
const FILE_PATH: &str = "/analyze/file";
const FILE_FIELD: &str = "file";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Lower-level cause of a failed exchange. Logged, never shown to users.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Analysis service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed analysis response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No response within {0:?}")]
    Timeout(Duration),
}

/// User-facing failure of an analysis submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AnalysisFailure {
    pub message: String,
}

impl AnalysisFailure {
    fn for_input(input: &ResumeInput) -> Self {
        let message = match input {
            ResumeInput::Text(_) => "Failed to analyze resume. Please try again.",
            ResumeInput::File(_) => "Failed to analyze resume file. Please try again.",
        };
        Self {
            message: message.to_string(),
        }
    }
}

/// Outcome of `submit_text`, which validates its argument first.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Failed(#[from] AnalysisFailure),
}

#[derive(Debug, Serialize)]
struct TextRequest<'a> {
    text: &'a str,
}

/// Client for the Analysis Service. Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct AnalysisGateway {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl AnalysisGateway {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Validates and submits pasted resume text.
    /// Blank text fails with a `ValidationError` before any request is made.
    ///
    /// Runs on its own task; dropping the returned future aborts the request.
    pub async fn submit_text(&self, content: &str) -> Result<AnalysisResult, SubmitError> {
        let input = ResumeInput::text(content)?;
        Ok(self.spawn(input).outcome().await?)
    }

    /// Submits an uploaded document as multipart form data.
    ///
    /// Runs on its own task; dropping the returned future aborts the request.
    pub async fn submit_file(&self, file: &ResumeFile) -> Result<AnalysisResult, AnalysisFailure> {
        self.spawn(ResumeInput::File(file.clone())).outcome().await
    }

    /// Submits either input variant under the gateway deadline.
    async fn submit(&self, input: &ResumeInput) -> Result<AnalysisResult, AnalysisFailure> {
        let outcome = match tokio::time::timeout(self.timeout, self.exchange(input)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(GatewayError::Timeout(self.timeout)),
        };

        outcome.map_err(|e| {
            error!(input = input.kind(), "Analysis request failed: {e}");
            AnalysisFailure::for_input(input)
        })
    }

    /// Starts a submission as its own task. Dropping or cancelling the returned
    /// handle aborts the in-flight request.
    pub fn spawn(&self, input: ResumeInput) -> PendingAnalysis {
        let failure = AnalysisFailure::for_input(&input);
        let gateway = self.clone();
        let handle = tokio::spawn(async move { gateway.submit(&input).await });
        PendingAnalysis { handle, failure }
    }

    async fn exchange(&self, input: &ResumeInput) -> Result<AnalysisResult, GatewayError> {
        let request = match input {
            ResumeInput::Text(content) => self
                .client
                .post(format!("{}{TEXT_PATH}", self.base_url))
                .json(&TextRequest { text: content }),
            ResumeInput::File(file) => {
                let part = Part::bytes(file.bytes().to_vec())
                    .file_name(file.filename().to_string())
                    .mime_str(file.media_type().mime())?;
                self.client
                    .post(format!("{}{FILE_PATH}", self.base_url))
                    .multipart(Form::new().part(FILE_FIELD, part))
            }
        };

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let result = AnalysisResult::from_json(&body)?;

        debug!(
            input = input.kind(),
            overall_score = result.overall_score.value(),
            "Analysis succeeded"
        );

        Ok(result)
    }
}

/// An in-flight submission. Aborted when cancelled or dropped.
pub struct PendingAnalysis {
    handle: JoinHandle<Result<AnalysisResult, AnalysisFailure>>,
    failure: AnalysisFailure,
}

impl PendingAnalysis {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Waits for the submission to settle. A cancelled task settles as a failure.
    pub async fn outcome(mut self) -> Result<AnalysisResult, AnalysisFailure> {
        match (&mut self.handle).await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => {
                warn!("Analysis submission cancelled");
                Err(self.failure.clone())
            }
            Err(e) => {
                error!("Analysis task failed: {e}");
                Err(self.failure.clone())
            }
        }
    }
}

impl Drop for PendingAnalysis {
    fn drop(&mut self) {
        self.cancel();
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
