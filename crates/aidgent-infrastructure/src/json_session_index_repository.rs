//! JSON-file-backed SessionIndexRepository implementation.

use crate::paths::AidgentPaths;
use aidgent_core::session::{SessionIndexRepository, SessionMeta, SessionMetaPatch};
use aidgent_core::time::now_rfc3339;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};

/// A repository implementation persisting the session index as a single
/// JSON file holding the encoded array of records.
///
/// Every operation follows a read-whole / mutate / write-whole cycle
/// against that one file. Reads degrade to an empty index when the file
/// is missing, unreadable, or corrupt - callers never see a storage error
/// on the read path; the degradation is logged instead.
pub struct JsonSessionIndexRepository {
    path: PathBuf,
}

impl JsonSessionIndexRepository {
    /// Creates a new repository backed by the given file path.
    ///
    /// The parent directory is created if it doesn't exist.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create session index directory")?;
        }
        Ok(Self { path })
    }

    /// Creates a repository at the default platform data location.
    pub fn default_location() -> Result<Self> {
        let path = AidgentPaths::session_index_file()
            .context("Failed to resolve session index path")?;
        Self::new(path)
    }

    /// Reads the full index, degrading to empty on any read failure.
    fn read_all(&self) -> Vec<SessionMeta> {
        if !self.path.exists() {
            return Vec::new();
        }

        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Session index unreadable, treating as empty: {e}");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<SessionMeta>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Session index corrupt, treating as empty: {e}");
                Vec::new()
            }
        }
    }

    /// Writes the full index back. Write failures do surface as errors.
    fn write_all(&self, records: &[SessionMeta]) -> Result<()> {
        let encoded = serde_json::to_string_pretty(records)
            .context("Failed to serialize session index")?;
        fs::write(&self.path, encoded)
            .context(format!("Failed to write session index: {:?}", self.path))?;
        Ok(())
    }
}

#[async_trait]
impl SessionIndexRepository for JsonSessionIndexRepository {
    async fn list(&self) -> Result<Vec<SessionMeta>> {
        let mut records = self.read_all();
        // Descending by updated_at; RFC 3339 strings sort chronologically.
        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(records)
    }

    async fn add(&self, meta: SessionMeta) -> Result<()> {
        let mut records = self.read_all();
        records.retain(|record| record.id != meta.id);
        records.insert(0, meta);
        self.write_all(&records)
    }

    async fn remove(&self, id: &str) -> Result<()> {
        let mut records = self.read_all();
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            return Ok(());
        }
        self.write_all(&records)
    }

    async fn touch(&self, id: &str) -> Result<()> {
        let mut records = self.read_all();
        match records.iter_mut().find(|record| record.id == id) {
            Some(record) => {
                record.updated_at = now_rfc3339();
                self.write_all(&records)
            }
            None => Ok(()),
        }
    }

    async fn update(&self, id: &str, patch: SessionMetaPatch) -> Result<()> {
        let mut records = self.read_all();
        match records.iter_mut().find(|record| record.id == id) {
            Some(record) => {
                patch.apply(record);
                self.write_all(&records)
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aidgent_core::intent::Intent;
    use aidgent_core::session::SessionStatus;
    use tempfile::TempDir;

    fn repo(dir: &TempDir) -> JsonSessionIndexRepository {
        JsonSessionIndexRepository::new(dir.path().join("sessions.json")).unwrap()
    }

    fn meta(id: &str, updated_at: &str) -> SessionMeta {
        SessionMeta {
            id: id.to_string(),
            intent: None,
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
            updated_at: updated_at.to_string(),
            last_status: SessionStatus::Active,
        }
    }

    #[tokio::test]
    async fn test_add_is_idempotent_per_id() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);

        repo.add(meta("s-1", "2024-01-01T00:00:00.000Z")).await.unwrap();
        repo.add(meta("s-1", "2024-01-02T00:00:00.000Z")).await.unwrap();

        let records = repo.list().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].updated_at, "2024-01-02T00:00:00.000Z");
    }

    #[tokio::test]
    async fn test_list_sorted_descending_by_updated_at() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);

        repo.add(meta("old", "2024-01-01T00:00:00.000Z")).await.unwrap();
        repo.add(meta("newest", "2024-03-01T00:00:00.000Z")).await.unwrap();
        repo.add(meta("mid", "2024-02-01T00:00:00.000Z")).await.unwrap();

        let ids: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|record| record.id)
            .collect();
        assert_eq!(ids, vec!["newest", "mid", "old"]);
    }

    #[tokio::test]
    async fn test_touch_absent_id_is_noop() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);

        repo.add(meta("s-1", "2024-01-01T00:00:00.000Z")).await.unwrap();
        let before = repo.list().await.unwrap();

        repo.touch("missing").await.unwrap();

        assert_eq!(repo.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_touch_refreshes_updated_at() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);

        repo.add(meta("s-1", "2020-01-01T00:00:00.000Z")).await.unwrap();
        repo.touch("s-1").await.unwrap();

        let records = repo.list().await.unwrap();
        assert!(records[0].updated_at > "2020-01-01T00:00:00.000Z".to_string());
    }

    #[tokio::test]
    async fn test_update_merges_patch() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);

        repo.add(meta("s-1", "2024-01-01T00:00:00.000Z")).await.unwrap();
        repo.update(
            "s-1",
            SessionMetaPatch {
                intent: Some(Intent::Urti),
                last_status: Some(SessionStatus::Ended),
                updated_at: None,
            },
        )
        .await
        .unwrap();

        let records = repo.list().await.unwrap();
        assert_eq!(records[0].intent, Some(Intent::Urti));
        assert_eq!(records[0].last_status, SessionStatus::Ended);
        assert_eq!(records[0].updated_at, "2024-01-01T00:00:00.000Z");
    }

    #[tokio::test]
    async fn test_update_absent_id_is_noop() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);

        repo.update(
            "missing",
            SessionMetaPatch {
                last_status: Some(SessionStatus::Ended),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_then_absent() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);

        repo.add(meta("s-1", "2024-01-01T00:00:00.000Z")).await.unwrap();
        repo.remove("s-1").await.unwrap();
        repo.remove("s-1").await.unwrap(); // second remove is a no-op

        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_roundtrip_equality() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);

        let record = SessionMeta {
            id: "s-1".to_string(),
            intent: Some(Intent::Derm),
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
            updated_at: "2024-01-02T00:00:00.000Z".to_string(),
            last_status: SessionStatus::Ended,
        };
        repo.add(record.clone()).await.unwrap();

        assert_eq!(repo.list().await.unwrap(), vec![record]);
    }

    #[tokio::test]
    async fn test_corrupt_file_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sessions.json");
        std::fs::write(&path, "{not valid json").unwrap();

        let repo = JsonSessionIndexRepository::new(&path).unwrap();
        assert!(repo.list().await.unwrap().is_empty());

        // The store recovers: a subsequent add replaces the corrupt content.
        repo.add(meta("s-1", "2024-01-01T00:00:00.000Z")).await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }
}
