//! Turn orchestration for one live chat view.

use crate::texts;
use aidgent_client::TriageApi;
use aidgent_core::redflag::RedFlagLatch;
use aidgent_core::session::{
    ChatMessage, MessageRole, SessionIndexRepository, SessionMetaPatch, SessionStatus, Transcript,
};
use aidgent_core::time::now_rfc3339;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Outcome of a `send_turn` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Assistant reply appended; side effects propagated.
    Sent,
    /// Rejected without a network call: a turn is already in flight.
    Busy,
    /// Rejected without a network call: the red-flag latch is raised.
    Blocked,
    /// Round-trip failed; the localized fallback message was appended and
    /// no partial state was propagated.
    Failed,
}

/// View state owned by one composer instance.
struct ViewState {
    messages: Vec<ChatMessage>,
    red_flag: RedFlagLatch,
    loading: bool,
    transcript: Option<Transcript>,
}

/// Drives user→assistant exchanges for a single composer instance and
/// propagates their side effects into the session index.
///
/// The controller owns the live transcript view state behind interior
/// mutability, so it can be shared (`Arc`) between the view and whatever
/// drives input. The in-flight lock is a real test-and-set: a `send_turn`
/// that arrives while another is outstanding is refused with `Busy`
/// before any network call. Side effects are observable only through the
/// view state and the injected repository; the session list view picks
/// them up on its own next reconciliation pass.
pub struct TurnController {
    session_id: String,
    api: Arc<dyn TriageApi>,
    index: Arc<dyn SessionIndexRepository>,
    state: RwLock<ViewState>,
    in_flight: AtomicBool,
}

impl TurnController {
    pub fn new(
        session_id: impl Into<String>,
        api: Arc<dyn TriageApi>,
        index: Arc<dyn SessionIndexRepository>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            api,
            index,
            state: RwLock::new(ViewState {
                messages: Vec::new(),
                red_flag: RedFlagLatch::default(),
                loading: true,
                transcript: None,
            }),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Populates the view from the server transcript.
    ///
    /// A fetch failure is absorbed: the view receives the single localized
    /// fallback assistant message and loading still resolves.
    pub async fn load(&self) {
        self.state.write().await.loading = true;
        let fetched = self.api.fetch_transcript(&self.session_id).await;

        let mut state = self.state.write().await;
        match fetched {
            Ok(transcript) => {
                state.messages = transcript.messages.clone();
                state.transcript = Some(transcript);
            }
            Err(err) => {
                tracing::warn!("Failed to load transcript for {}: {err}", self.session_id);
                state.messages = vec![ChatMessage::new(
                    MessageRole::Assistant,
                    texts::TRANSCRIPT_LOAD_FAILED_TH,
                    now_rfc3339(),
                )];
            }
        }
        state.loading = false;
    }

    /// Orchestrates one user→assistant exchange.
    ///
    /// The user message is appended before the network call is issued; the
    /// assistant message (or fallback) only after the call settles. Turns
    /// are never pipelined: the in-flight flag is claimed atomically and
    /// held across the round-trip.
    pub async fn send_turn(&self, user_text: &str) -> SendOutcome {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return SendOutcome::Busy;
        }
        if self.state.read().await.red_flag.is_raised() {
            self.in_flight.store(false, Ordering::SeqCst);
            return SendOutcome::Blocked;
        }

        // Optimistic local append; the session resurfaces at the top of
        // the list immediately.
        self.state.write().await.messages.push(ChatMessage::new(
            MessageRole::User,
            user_text,
            now_rfc3339(),
        ));
        if let Err(err) = self.index.touch(&self.session_id).await {
            tracing::warn!("Failed to touch session {}: {err}", self.session_id);
        }

        let outcome = match self.api.post_turn(&self.session_id, user_text).await {
            Ok(reply) => {
                let mut state = self.state.write().await;
                state.messages.push(ChatMessage::new(
                    MessageRole::Assistant,
                    reply.assistant_text,
                    now_rfc3339(),
                ));

                if reply.state.red_flag_detected == Some(true) {
                    if let Some(label) = &reply.state.red_flag_label {
                        state.red_flag.raise(texts::red_flag_banner(label));
                    }
                }
                drop(state);

                if reply.state.intent.is_some() {
                    let patch = SessionMetaPatch {
                        intent: reply.state.intent,
                        ..Default::default()
                    };
                    if let Err(err) = self.index.update(&self.session_id, patch).await {
                        tracing::warn!("Failed to record intent for {}: {err}", self.session_id);
                    }
                }

                if reply.state.soap_ready == Some(true) {
                    let patch = SessionMetaPatch {
                        last_status: Some(SessionStatus::Ended),
                        updated_at: Some(now_rfc3339()),
                        ..Default::default()
                    };
                    if let Err(err) = self.index.update(&self.session_id, patch).await {
                        tracing::warn!("Failed to end session {}: {err}", self.session_id);
                    }
                }

                SendOutcome::Sent
            }
            Err(err) => {
                tracing::warn!("Turn failed for {}: {err}", self.session_id);
                self.state.write().await.messages.push(ChatMessage::new(
                    MessageRole::Assistant,
                    texts::TURN_FAILED_TH,
                    now_rfc3339(),
                ));
                SendOutcome::Failed
            }
        };

        self.in_flight.store(false, Ordering::SeqCst);
        outcome
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Snapshot of the live transcript view.
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.state.read().await.messages.clone()
    }

    pub async fn is_red_flagged(&self) -> bool {
        self.state.read().await.red_flag.is_raised()
    }

    /// The latched danger-signal banner, if any.
    pub async fn red_flag_label(&self) -> Option<String> {
        self.state
            .read()
            .await
            .red_flag
            .label()
            .map(str::to_string)
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// The last loaded transcript, when `load` succeeded.
    pub async fn transcript(&self) -> Option<Transcript> {
        self.state.read().await.transcript.clone()
    }
}
