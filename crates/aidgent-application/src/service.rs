//! Session index service: create, list, and remove local sessions.

use aidgent_client::TriageApi;
use aidgent_core::error::Result;
use aidgent_core::intent::Intent;
use aidgent_core::session::{SessionIndexRepository, SessionMeta};
use std::sync::Arc;

/// Front door for the session list view.
///
/// Reads degrade gracefully (an unavailable index yields an empty list,
/// logged but never surfaced); session creation errors do propagate, since
/// the caller has nothing to show without a session id.
pub struct SessionIndexService {
    api: Arc<dyn TriageApi>,
    index: Arc<dyn SessionIndexRepository>,
}

impl SessionIndexService {
    pub fn new(api: Arc<dyn TriageApi>, index: Arc<dyn SessionIndexRepository>) -> Self {
        Self { api, index }
    }

    /// Creates a session on the backend and records it locally.
    ///
    /// The local record exists before any messages do: created now,
    /// active, carrying whatever intent the backend echoed.
    pub async fn start_session(&self, intent: Option<Intent>) -> Result<SessionMeta> {
        let created = self.api.create_session(intent).await?;
        let meta = SessionMeta::new(created.session_id, created.intent);
        self.index.add(meta.clone()).await?;
        tracing::info!("Started session {}", meta.id);
        Ok(meta)
    }

    /// Lists locally known sessions, most recently updated first.
    pub async fn sessions(&self) -> Vec<SessionMeta> {
        match self.index.list().await {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!("Session index unavailable, showing empty list: {err}");
                Vec::new()
            }
        }
    }

    /// Removes a session from the local index only; server-held state is
    /// unaffected.
    pub async fn delete_session(&self, id: &str) -> Result<()> {
        self.index.remove(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aidgent_client::normalize::ServerSessionStatus;
    use aidgent_client::wire::{ChatTurnResponse, CreateSessionResponse};
    use aidgent_core::error::{AidgentError, Result as ApiResult};
    use aidgent_core::session::{SessionStatus, Transcript};
    use aidgent_infrastructure::MemorySessionIndexRepository;
    use async_trait::async_trait;

    struct MockCreateApi {
        fail: bool,
    }

    #[async_trait]
    impl TriageApi for MockCreateApi {
        async fn create_session(
            &self,
            intent: Option<Intent>,
        ) -> ApiResult<CreateSessionResponse> {
            if self.fail {
                return Err(AidgentError::api(503, "unavailable"));
            }
            Ok(CreateSessionResponse {
                session_id: "srv-1".to_string(),
                intent,
            })
        }

        async fn post_turn(
            &self,
            _session_id: &str,
            _user_text: &str,
        ) -> ApiResult<ChatTurnResponse> {
            Err(AidgentError::transport("not scripted"))
        }

        async fn fetch_transcript(&self, _session_id: &str) -> ApiResult<Transcript> {
            Err(AidgentError::transport("not scripted"))
        }

        async fn fetch_session_status(
            &self,
            _session_id: &str,
        ) -> ApiResult<ServerSessionStatus> {
            Err(AidgentError::transport("not scripted"))
        }
    }

    #[tokio::test]
    async fn test_start_session_records_single_active_meta() {
        let index = Arc::new(MemorySessionIndexRepository::new());
        let service =
            SessionIndexService::new(Arc::new(MockCreateApi { fail: false }), index.clone());

        let meta = service.start_session(Some(Intent::Urti)).await.unwrap();
        assert_eq!(meta.id, "srv-1");

        let records = index.list().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].last_status, SessionStatus::Active);
        assert_eq!(records[0].intent, Some(Intent::Urti));
    }

    #[tokio::test]
    async fn test_start_session_failure_records_nothing() {
        let index = Arc::new(MemorySessionIndexRepository::new());
        let service =
            SessionIndexService::new(Arc::new(MockCreateApi { fail: true }), index.clone());

        assert!(service.start_session(None).await.is_err());
        assert!(index.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_is_local_only_and_idempotent() {
        let index = Arc::new(
            MemorySessionIndexRepository::with_records(vec![SessionMeta::new("s-1", None)])
                .await,
        );
        let service =
            SessionIndexService::new(Arc::new(MockCreateApi { fail: true }), index.clone());

        service.delete_session("s-1").await.unwrap();
        service.delete_session("s-1").await.unwrap();
        assert!(service.sessions().await.is_empty());
    }
}
