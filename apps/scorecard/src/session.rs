use axum::http::HeaderMap;
use uuid::Uuid;

/// Request/response header carrying the browsing-session id.
pub const SESSION_HEADER: &str = "x-session-id";

const MAX_SESSION_ID_LEN: usize = 128;

/// Opaque browsing-session id scoping the Result Store slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Starts a fresh session.
    pub fn mint() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Accepts a printable ASCII token of bounded length.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let valid = !raw.is_empty()
            && raw.len() <= MAX_SESSION_ID_LEN
            && raw.bytes().all(|b| b.is_ascii_graphic());
        valid.then(|| Self(raw.to_string()))
    }

    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(Self::parse)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
