//! Resume input as submitted by the user, validated before any network call.

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

/// Caller-side precondition violations. Surfaced immediately, never sent upstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter your resume text")]
    EmptyText,

    #[error("Please select a file")]
    MissingFile,

    #[error("Please select a PDF, DOCX, or TXT file")]
    UnsupportedFileType { declared: Option<String> },

    #[error("Could not read the uploaded file")]
    UnreadableUpload,
}

/// Document formats the Analysis Service can extract text from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeMediaType {
    Pdf,
    Docx,
    PlainText,
}

impl ResumeMediaType {
    pub fn mime(self) -> &'static str {
        match self {
            ResumeMediaType::Pdf => "application/pdf",
            ResumeMediaType::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ResumeMediaType::PlainText => "text/plain",
        }
    }

    /// Matches a declared MIME type, ignoring parameters such as `; charset=utf-8`.
    pub fn from_mime(declared: &str) -> Option<Self> {
        let essence = declared.split(';').next().unwrap_or_default().trim();
        [Self::Pdf, Self::Docx, Self::PlainText]
            .into_iter()
            .find(|t| t.mime().eq_ignore_ascii_case(essence))
    }
}

/// An uploaded resume document with an accepted media type.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    bytes: Bytes,
    media_type: ResumeMediaType,
    filename: String,
}

impl ResumeFile {
    /// Accepts a non-empty file whose declared MIME type is PDF, DOCX or plain text.
    pub fn new(
        bytes: Bytes,
        declared_mime: Option<&str>,
        filename: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if bytes.is_empty() {
            return Err(ValidationError::MissingFile);
        }
        let media_type = declared_mime.and_then(ResumeMediaType::from_mime).ok_or_else(|| {
            ValidationError::UnsupportedFileType {
                declared: declared_mime.map(str::to_string),
            }
        })?;
        let filename = filename.into();
        let filename = if filename.trim().is_empty() {
            "resume".to_string()
        } else {
            filename
        };
        Ok(Self {
            bytes,
            media_type,
            filename,
        })
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn media_type(&self) -> ResumeMediaType {
        self.media_type
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }
}

/// Exactly one of pasted text or an uploaded file per analysis request.
#[derive(Debug, Clone)]
pub enum ResumeInput {
    Text(String),
    File(ResumeFile),
}

impl ResumeInput {
    /// Accepts pasted text that is non-empty after trimming.
    pub fn text(content: impl Into<String>) -> Result<Self, ValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }
        Ok(ResumeInput::Text(content))
    }

    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ResumeInput::Text(_) => "text",
            ResumeInput::File(_) => "file",
        }
    }
}
