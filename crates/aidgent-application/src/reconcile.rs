//! Session metadata reconciliation.
//!
//! Brings the local session index's `intent`/`last_status`/`updated_at`
//! fields in line with server-derived truth. Runs once per session-list
//! view activation.

use aidgent_client::TriageApi;
use aidgent_core::session::{SessionIndexRepository, SessionMetaPatch, SessionStatus};
use futures::future::join_all;
use std::sync::Arc;

/// What a reconciliation pass did. Failures are counted, never surfaced
/// as errors - a stale record is preferable to a blocked list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Records updated from server values.
    pub updated: usize,
    /// Records left untouched because their status fetch failed.
    pub skipped: usize,
}

/// Pulls authoritative status from the backend for every locally known
/// session and merges it into the index.
pub struct SessionMetaReconciler {
    api: Arc<dyn TriageApi>,
    index: Arc<dyn SessionIndexRepository>,
}

impl SessionMetaReconciler {
    pub fn new(api: Arc<dyn TriageApi>, index: Arc<dyn SessionIndexRepository>) -> Self {
        Self { api, index }
    }

    /// Reconciles every record in the index against the server.
    ///
    /// All status fetches are issued concurrently with no bound; each
    /// future only ever mutates the single record matching its own
    /// session id, so no coordination is needed. Server values win when
    /// present; local values are kept as fallback. A per-session failure
    /// leaves that record untouched and never blocks the others.
    pub async fn reconcile_all(&self) -> ReconcileReport {
        let records = match self.index.list().await {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!("Session index unavailable, skipping reconciliation: {err}");
                return ReconcileReport::default();
            }
        };

        let passes = records.into_iter().map(|record| {
            let api = Arc::clone(&self.api);
            let index = Arc::clone(&self.index);
            async move {
                let status = match api.fetch_session_status(&record.id).await {
                    Ok(status) => status,
                    Err(err) => {
                        tracing::debug!("Status fetch failed for {}: {err}", record.id);
                        return false;
                    }
                };

                let patch = SessionMetaPatch {
                    // Server intent wins when present; keep local otherwise.
                    intent: status.intent,
                    // Server truth is authoritative for status: a
                    // client-set Ended persists only until a reconcile
                    // says otherwise.
                    last_status: Some(if status.ended {
                        SessionStatus::Ended
                    } else {
                        SessionStatus::Active
                    }),
                    updated_at: status.last_ts,
                };

                match index.update(&record.id, patch).await {
                    Ok(()) => true,
                    Err(err) => {
                        tracing::debug!("Index update failed for {}: {err}", record.id);
                        false
                    }
                }
            }
        });

        let results = join_all(passes).await;
        let updated = results.iter().filter(|ok| **ok).count();
        ReconcileReport {
            updated,
            skipped: results.len() - updated,
        }
    }
}
