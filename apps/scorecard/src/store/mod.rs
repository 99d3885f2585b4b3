//! Result Store: one persisted analysis result per browsing session.
//!
//! The slot is a plain string key on a `SlotBackend`, holding the canonical JSON
//! form of the most recent `AnalysisResult`. Writes are last-write-wins; there is no
//! history and no merge. Slots expire with the session TTL.
//!
//! Reads never fail: an empty slot, an unparseable payload and an unreachable backend
//! all read as `None` ("no result available").

pub mod memory;
pub mod redis_slot;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::AnalysisResult;
use crate::session::SessionId;

pub use memory::MemoryBackend;
pub use redis_slot::RedisBackend;

/// Slot name, namespaced per session.
const SLOT_PREFIX: &str = "resumeAnalysis";

pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// String key/value persistence with expiry. Swap implementations without
/// touching `ResultStore` callers.
#[async_trait]
pub trait SlotBackend: Send + Sync {
    async fn write(&self, key: &str, value: String, ttl: Duration) -> Result<(), StoreError>;
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Single-slot cache of the current result, shared by every reader in a session.
#[derive(Clone)]
pub struct ResultStore {
    backend: Arc<dyn SlotBackend>,
    ttl: Duration,
}

impl ResultStore {
    pub fn new(backend: Arc<dyn SlotBackend>, ttl: Duration) -> Self {
        Self { backend, ttl }
    }

    /// In-process store, used when no Redis URL is configured.
    pub fn in_memory(ttl: Duration) -> Self {
        Self::new(Arc::new(MemoryBackend::default()), ttl)
    }

    fn slot_key(session: &SessionId) -> String {
        format!("{SLOT_PREFIX}:{}", session.as_str())
    }

    /// Overwrites the session's slot unconditionally.
    pub async fn put(&self, session: &SessionId, result: &AnalysisResult) -> Result<(), StoreError> {
        let payload = serde_json::to_string(result)?;
        self.backend
            .write(&Self::slot_key(session), payload, self.ttl)
            .await?;
        debug!(session = session.as_str(), "Stored analysis result");
        Ok(())
    }

    /// Returns the session's current result, or `None` when there is nothing usable.
    pub async fn get(&self, session: &SessionId) -> Option<AnalysisResult> {
        let key = Self::slot_key(session);
        let payload = match self.backend.read(&key).await {
            Ok(payload) => payload?,
            Err(e) => {
                warn!(session = session.as_str(), "Result slot unreadable: {e}");
                return None;
            }
        };

        match AnalysisResult::from_json(payload.as_bytes()) {
            Ok(result) => Some(result),
            Err(e) => {
                warn!(session = session.as_str(), "Discarding unparseable result slot: {e}");
                None
            }
        }
    }

    /// Empties the session's slot.
    pub async fn clear(&self, session: &SessionId) -> Result<(), StoreError> {
        self.backend.remove(&Self::slot_key(session)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::tests::sample_result;
    use crate::models::analysis::Score;

    fn store_with_backend() -> (ResultStore, Arc<MemoryBackend>) {
        let backend = Arc::new(MemoryBackend::default());
        (ResultStore::new(backend.clone(), DEFAULT_SESSION_TTL), backend)
    }

    #[tokio::test]
    async fn test_get_without_put_is_empty() {
        let store = ResultStore::in_memory(DEFAULT_SESSION_TTL);
        assert_eq!(store.get(&SessionId::mint()).await, None);
    }

    #[tokio::test]
    async fn test_put_then_get_round_trips() {
        let store = ResultStore::in_memory(DEFAULT_SESSION_TTL);
        let session = SessionId::mint();
        let result = sample_result();
        store.put(&session, &result).await.unwrap();
        assert_eq!(store.get(&session).await, Some(result));
    }

    #[tokio::test]
    async fn test_put_overwrites_previous_result() {
        let store = ResultStore::in_memory(DEFAULT_SESSION_TTL);
        let session = SessionId::mint();
        store.put(&session, &sample_result()).await.unwrap();

        let mut newer = sample_result();
        newer.overall_score = Score::new(91).unwrap();
        store.put(&session, &newer).await.unwrap();

        assert_eq!(store.get(&session).await, Some(newer));
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = ResultStore::in_memory(DEFAULT_SESSION_TTL);
        let (a, b) = (SessionId::mint(), SessionId::mint());
        store.put(&a, &sample_result()).await.unwrap();
        assert_eq!(store.get(&b).await, None);
    }

    #[tokio::test]
    async fn test_unparseable_slot_reads_as_empty() {
        let (store, backend) = store_with_backend();
        let session = SessionId::mint();
        let key = ResultStore::slot_key(&session);

        backend
            .write(&key, "{not json".to_string(), DEFAULT_SESSION_TTL)
            .await
            .unwrap();
        assert_eq!(store.get(&session).await, None);

        // Valid JSON of a foreign shape is just as unusable.
        backend
            .write(&key, r#"{"overall_score": 500}"#.to_string(), DEFAULT_SESSION_TTL)
            .await
            .unwrap();
        assert_eq!(store.get(&session).await, None);
    }

    #[tokio::test]
    async fn test_slot_uses_canonical_json() {
        let (store, backend) = store_with_backend();
        let session = SessionId::parse("s1").unwrap();
        store.put(&session, &sample_result()).await.unwrap();

        let raw = backend.read("resumeAnalysis:s1").await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["overall_score"], 72);
        assert_eq!(value["breakdown"]["grammar"], 80);
    }

    #[tokio::test]
    async fn test_clear_empties_slot() {
        let store = ResultStore::in_memory(DEFAULT_SESSION_TTL);
        let session = SessionId::mint();
        store.put(&session, &sample_result()).await.unwrap();
        store.clear(&session).await.unwrap();
        assert_eq!(store.get(&session).await, None);
        // Clearing an empty slot is not an error.
        store.clear(&session).await.unwrap();
    }
}
