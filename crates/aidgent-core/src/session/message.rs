//! Canonical chat message types.

use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the AI assistant.
    Assistant,
}

/// A single canonical message in a transcript.
///
/// The Transcript Client guarantees `ts` is present and RFC 3339 formatted
/// before a message reaches any consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    /// Thai text content.
    pub content_th: String,
    /// RFC 3339 timestamp.
    pub ts: String,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content_th: impl Into<String>, ts: impl Into<String>) -> Self {
        Self {
            role,
            content_th: content_th.into(),
            ts: ts.into(),
        }
    }
}
