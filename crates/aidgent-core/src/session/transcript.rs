//! Canonical transcript shape.

use super::message::ChatMessage;
use super::soap::SoapNote;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A session's remote state in canonical form.
///
/// `soap_summaries` and `citations` are carried as opaque JSON values; the
/// client only ever looks at the SOAP collection's length and last element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub session_id: String,
    /// Chronological, append-only message sequence.
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub soap_summaries: Vec<Value>,
    #[serde(default)]
    pub citations: Vec<Value>,
}

impl Transcript {
    /// True once the backend has produced at least one SOAP summary.
    pub fn has_soap(&self) -> bool {
        !self.soap_summaries.is_empty()
    }

    /// The latest SOAP summary, normalized. The backend returns summaries
    /// in ascending order, so the last element is the most recent.
    pub fn latest_soap(&self) -> Option<SoapNote> {
        self.soap_summaries.last().and_then(SoapNote::normalize)
    }
}
