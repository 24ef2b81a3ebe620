//! Reqwest-backed TriageApi implementation.

use crate::api::TriageApi;
use crate::config::ClientConfig;
use crate::normalize::{canonical_transcript, derive_status, ServerSessionStatus};
use crate::wire::{
    ChatTurnRequest, ChatTurnResponse, CreateSessionRequest, CreateSessionResponse,
    TranscriptWire,
};
use aidgent_core::error::{AidgentError, Result};
use aidgent_core::intent::Intent;
use aidgent_core::session::Transcript;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

/// HTTP client for the triage backend.
///
/// Every transport failure or non-success response maps to a single
/// `AidgentError::Api` variant; the failure body is captured best-effort
/// for diagnostics only. No retries, no client-side timeouts.
#[derive(Clone)]
pub struct HttpTriageClient {
    client: Client,
    base_url: String,
}

impl HttpTriageClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_base,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn handle<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(AidgentError::api(status.as_u16(), body));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| AidgentError::Serialization {
                format: "JSON".to_string(),
                message: format!("Failed to parse backend response: {err}"),
            })
    }

    async fn get_transcript_wire(&self, session_id: &str) -> Result<TranscriptWire> {
        let response = self
            .client
            .get(self.url(&format!("/session/{session_id}/transcript")))
            .send()
            .await
            .map_err(|err| AidgentError::transport(format!("Transcript request failed: {err}")))?;
        self.handle(response).await
    }
}

#[async_trait]
impl TriageApi for HttpTriageClient {
    async fn create_session(&self, intent: Option<Intent>) -> Result<CreateSessionResponse> {
        let response = self
            .client
            .post(self.url("/session"))
            .json(&CreateSessionRequest { intent })
            .send()
            .await
            .map_err(|err| {
                AidgentError::transport(format!("Session creation request failed: {err}"))
            })?;
        self.handle(response).await
    }

    async fn post_turn(&self, session_id: &str, user_text: &str) -> Result<ChatTurnResponse> {
        let response = self
            .client
            .post(self.url("/chat/turn"))
            .json(&ChatTurnRequest {
                session_id: Some(session_id.to_string()),
                user_text: user_text.to_string(),
            })
            .send()
            .await
            .map_err(|err| AidgentError::transport(format!("Turn request failed: {err}")))?;
        self.handle(response).await
    }

    async fn fetch_transcript(&self, session_id: &str) -> Result<Transcript> {
        let wire = self.get_transcript_wire(session_id).await?;
        Ok(canonical_transcript(wire))
    }

    async fn fetch_session_status(&self, session_id: &str) -> Result<ServerSessionStatus> {
        let wire = self.get_transcript_wire(session_id).await?;
        Ok(derive_status(&wire))
    }
}
