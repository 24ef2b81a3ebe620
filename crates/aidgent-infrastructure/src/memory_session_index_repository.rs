//! In-memory SessionIndexRepository for tests.

use aidgent_core::session::{SessionIndexRepository, SessionMeta, SessionMetaPatch};
use aidgent_core::time::now_rfc3339;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// An in-memory session index with the same semantics as the file-backed
/// implementation. This is the single test double the application-layer
/// tests inject instead of touching the filesystem.
#[derive(Default)]
pub struct MemorySessionIndexRepository {
    records: RwLock<Vec<SessionMeta>>,
}

impl MemorySessionIndexRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the index with pre-existing records.
    pub async fn with_records(records: Vec<SessionMeta>) -> Self {
        let repo = Self::new();
        {
            let mut guard = repo.records.write().await;
            *guard = records;
        }
        repo
    }
}

#[async_trait]
impl SessionIndexRepository for MemorySessionIndexRepository {
    async fn list(&self) -> Result<Vec<SessionMeta>> {
        let mut records = self.records.read().await.clone();
        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(records)
    }

    async fn add(&self, meta: SessionMeta) -> Result<()> {
        let mut records = self.records.write().await;
        records.retain(|record| record.id != meta.id);
        records.insert(0, meta);
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<()> {
        let mut records = self.records.write().await;
        records.retain(|record| record.id != id);
        Ok(())
    }

    async fn touch(&self, id: &str) -> Result<()> {
        let mut records = self.records.write().await;
        if let Some(record) = records.iter_mut().find(|record| record.id == id) {
            record.updated_at = now_rfc3339();
        }
        Ok(())
    }

    async fn update(&self, id: &str, patch: SessionMetaPatch) -> Result<()> {
        let mut records = self.records.write().await;
        if let Some(record) = records.iter_mut().find(|record| record.id == id) {
            patch.apply(record);
        }
        Ok(())
    }
}
