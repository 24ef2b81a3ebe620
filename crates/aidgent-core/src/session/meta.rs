//! Local session index records.
//!
//! A `SessionMeta` is the device-local view of one triage conversation.
//! It is created client-side immediately after a successful
//! session-creation call, before any messages exist, and is only ever
//! removed by explicit user action.

use crate::intent::Intent;
use crate::time::now_rfc3339;
use serde::{Deserialize, Serialize};

/// Locally tracked session status.
///
/// The only client-side transition is `end()`; there is no method back to
/// `Active`. Reconciliation may still overwrite the field wholesale,
/// because server truth is authoritative there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Active,
    Ended,
}

impl SessionStatus {
    /// One-way transition to `Ended`.
    pub fn end(&mut self) {
        *self = SessionStatus::Ended;
    }

    pub fn is_ended(&self) -> bool {
        matches!(self, SessionStatus::Ended)
    }

    /// The lowercase wire/display form (`"active"` / `"ended"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Ended => "ended",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single record in the local session index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMeta {
    /// Opaque session identifier (unique key within the index).
    pub id: String,
    /// Triage category, when one has been captured.
    #[serde(default)]
    pub intent: Option<Intent>,
    /// Creation time (RFC 3339), immutable after creation.
    pub created_at: String,
    /// Last-activity time (RFC 3339), monotonically non-decreasing.
    pub updated_at: String,
    /// Last known session status.
    #[serde(default)]
    pub last_status: SessionStatus,
}

impl SessionMeta {
    /// Creates a fresh record for a just-created session.
    pub fn new(id: impl Into<String>, intent: Option<Intent>) -> Self {
        let now = now_rfc3339();
        Self {
            id: id.into(),
            intent,
            created_at: now.clone(),
            updated_at: now,
            last_status: SessionStatus::Active,
        }
    }
}

/// A partial update to a `SessionMeta` record.
///
/// Each field is optional; `None` means "keep the existing value".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionMetaPatch {
    pub intent: Option<Intent>,
    pub last_status: Option<SessionStatus>,
    pub updated_at: Option<String>,
}

impl SessionMetaPatch {
    /// Merges the present fields into `meta`, leaving the rest untouched.
    pub fn apply(&self, meta: &mut SessionMeta) {
        if let Some(intent) = self.intent {
            meta.intent = Some(intent);
        }
        if let Some(status) = self.last_status {
            meta.last_status = status;
        }
        if let Some(updated_at) = &self.updated_at {
            meta.updated_at = updated_at.clone();
        }
    }
}
