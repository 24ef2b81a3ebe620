//! The backend API seam.

use crate::normalize::ServerSessionStatus;
use crate::wire::{ChatTurnResponse, CreateSessionResponse};
use aidgent_core::error::Result;
use aidgent_core::intent::Intent;
use aidgent_core::session::Transcript;
use async_trait::async_trait;

/// Abstract triage backend.
///
/// The application layer depends on this trait, not on the HTTP client,
/// so turn orchestration and reconciliation are testable against mocks.
#[async_trait]
pub trait TriageApi: Send + Sync {
    /// Creates a new session, optionally seeded with an intent.
    async fn create_session(&self, intent: Option<Intent>) -> Result<CreateSessionResponse>;

    /// Sends one user turn and returns the assistant reply plus the
    /// backend's asserted state bag.
    async fn post_turn(&self, session_id: &str, user_text: &str) -> Result<ChatTurnResponse>;

    /// Fetches a session's transcript in canonical form.
    async fn fetch_transcript(&self, session_id: &str) -> Result<Transcript>;

    /// Derives the compact status summary for the session list view.
    async fn fetch_session_status(&self, session_id: &str) -> Result<ServerSessionStatus>;
}
