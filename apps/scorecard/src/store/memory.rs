use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use super::{SlotBackend, StoreError};

/// In-process slot backend. Contents are lost on restart, which ends every session.
#[derive(Default)]
pub struct MemoryBackend {
    slots: RwLock<HashMap<String, (String, Instant)>>,
}

#[async_trait]
impl SlotBackend for MemoryBackend {
    async fn write(&self, key: &str, value: String, ttl: Duration) -> Result<(), StoreError> {
        let expires_at = Instant::now() + ttl;
        let mut slots = self.slots.write().await;
        // Opportunistic sweep so abandoned sessions do not accumulate.
        let now = Instant::now();
        slots.retain(|_, (_, expiry)| *expiry > now);
        slots.insert(key.to_string(), (value, expires_at));
        Ok(())
    }

    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let slots = self.slots.read().await;
        Ok(slots
            .get(key)
            .filter(|(_, expiry)| *expiry > Instant::now())
            .map(|(value, _)| value.clone()))
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.slots.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_missing_key() {
        let backend = MemoryBackend::default();
        assert_eq!(backend.read("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let backend = MemoryBackend::default();
        let ttl = Duration::from_secs(60);
        backend.write("k", "first".into(), ttl).await.unwrap();
        backend.write("k", "second".into(), ttl).await.unwrap();
        assert_eq!(backend.read("k").await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slot_expires_after_ttl() {
        let backend = MemoryBackend::default();
        backend
            .write("k", "v".into(), Duration::from_secs(10))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(9)).await;
        assert_eq!(backend.read("k").await.unwrap().as_deref(), Some("v"));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(backend.read("k").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_sweeps_expired_slots() {
        let backend = MemoryBackend::default();
        backend
            .write("old", "v".into(), Duration::from_secs(1))
            .await
            .unwrap();
        tokio::time::advance(Duration::from_secs(2)).await;
        backend
            .write("new", "v".into(), Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(backend.slots.read().await.len(), 1);
    }
}
