//! Persistence adapter — the whole record lives as one JSON string under a
//! single key.
//!
//! Reads fail open: a missing key or an unreadable value yields an empty
//! record. Writes report failures so the caller can tell the user that the
//! last edit may not survive a reload.

use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::AsyncCommands;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::models::resume::ResumeRecord;

/// Minimal string key-value store. Implement this to swap backends.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

// ────────────────────────────────────────────────────────────────────────────
// Backends
// ────────────────────────────────────────────────────────────────────────────

/// Redis-backed store.
pub struct RedisStore {
    client: redis::Client,
}

impl RedisStore {
    pub fn open(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).context("Invalid REDIS_URL")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set::<_, _, ()>(key, value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del::<_, ()>(key).await?;
        Ok(())
    }
}

/// In-process store. Used when no Redis is configured, and in tests.
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.values.write().await.remove(key);
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Record repository
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to serialize resume: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write resume to storage: {0}")]
    Storage(anyhow::Error),
}

/// Reads and writes the record under one key.
pub struct ResumeRepository {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl ResumeRepository {
    pub fn new(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The stored record, or an empty one when absent or unreadable.
    pub async fn load(&self) -> ResumeRecord {
        let raw = match self.store.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!("No saved resume under '{}'; starting empty", self.key);
                return ResumeRecord::default();
            }
            Err(e) => {
                warn!("Failed to load saved resume: {e:?}");
                return ResumeRecord::default();
            }
        };

        match serde_json::from_str::<ResumeRecord>(&raw) {
            Ok(mut record) => {
                record.enforce_invariants();
                record
            }
            Err(e) => {
                warn!("Saved resume is not valid JSON, starting empty: {e}");
                ResumeRecord::default()
            }
        }
    }

    pub async fn save(&self, record: &ResumeRecord) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(record)?;
        self.store
            .set(&self.key, &json)
            .await
            .map_err(PersistenceError::Storage)
    }

    pub async fn clear(&self) -> Result<(), PersistenceError> {
        self.store
            .remove(&self.key)
            .await
            .map_err(PersistenceError::Storage)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::resume::{ExperienceEntry, Experiences};

    /// A store whose writes always fail; reads return nothing.
    pub(crate) struct FailingStore;

    #[async_trait]
    impl KeyValueStore for FailingStore {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            anyhow::bail!("storage unavailable")
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<()> {
            anyhow::bail!("quota exceeded")
        }

        async fn remove(&self, _key: &str) -> Result<()> {
            anyhow::bail!("storage unavailable")
        }
    }

    fn sample_record() -> ResumeRecord {
        let mut current = ExperienceEntry::new("Acme Corp", "Engineer");
        current.start_date = "2020-01".to_string();
        current.current = true;
        current.description = "Built stuff\nRan things".to_string();
        ResumeRecord {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+1 555 123 4567".to_string(),
            bio: "Engineer.".to_string(),
            education: "BSc".to_string(),
            skills: vec!["Rust".to_string(), "Go".to_string()],
            experiences: Experiences::Structured(vec![current]),
        }
    }

    #[tokio::test]
    async fn test_round_trip_through_repository() {
        let repo = ResumeRepository::new(Box::new(MemoryStore::default()), "resumeData");
        let record = sample_record();
        repo.save(&record).await.unwrap();
        assert_eq!(repo.load().await, record);
    }

    #[tokio::test]
    async fn test_missing_key_loads_empty() {
        let repo = ResumeRepository::new(Box::new(MemoryStore::default()), "resumeData");
        assert_eq!(repo.load().await, ResumeRecord::default());
    }

    #[tokio::test]
    async fn test_corrupt_value_loads_empty() {
        let store = MemoryStore::default();
        store.set("resumeData", "{not json").await.unwrap();
        let repo = ResumeRepository::new(Box::new(store), "resumeData");
        assert_eq!(repo.load().await, ResumeRecord::default());
    }

    #[tokio::test]
    async fn test_browser_saved_record_keeps_experience_text() {
        let store = MemoryStore::default();
        store
            .set(
                "resumeData",
                r#"{"name":"Jane","email":"j@x.io","phone":"","bio":"","education":"","experience":"Acme 2019-2021 built things","skills":["Rust"]}"#,
            )
            .await
            .unwrap();
        let repo = ResumeRepository::new(Box::new(store), "resumeData");

        let record = repo.load().await;
        assert_eq!(record.name, "Jane");
        assert_eq!(
            record.experiences,
            Experiences::Freeform("Acme 2019-2021 built things".to_string())
        );
    }

    #[tokio::test]
    async fn test_read_failure_loads_empty() {
        let repo = ResumeRepository::new(Box::new(FailingStore), "resumeData");
        assert_eq!(repo.load().await, ResumeRecord::default());
    }

    #[tokio::test]
    async fn test_write_failure_reported() {
        let repo = ResumeRepository::new(Box::new(FailingStore), "resumeData");
        let err = repo.save(&sample_record()).await.unwrap_err();
        assert!(matches!(err, PersistenceError::Storage(_)));
    }

    #[tokio::test]
    async fn test_clear_removes_key() {
        let repo = ResumeRepository::new(Box::new(MemoryStore::default()), "resumeData");
        repo.save(&sample_record()).await.unwrap();
        repo.clear().await.unwrap();
        assert_eq!(repo.load().await, ResumeRecord::default());
    }
}
