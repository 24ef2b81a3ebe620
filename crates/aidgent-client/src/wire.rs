//! Wire DTOs for the triage backend REST contract.
//!
//! Every backend-asserted fact is optional by design: absence means
//! "no signal", never "false". Unknown fields are ignored everywhere, and
//! an unknown intent code decodes to `None` rather than failing the
//! surrounding payload.

use aidgent_core::intent::Intent;
use aidgent_core::session::MessageRole;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// `POST /session` request body.
#[derive(Debug, Serialize)]
pub struct CreateSessionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
}

/// `POST /session` response.
#[derive(Debug, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    #[serde(default, deserialize_with = "lenient_intent")]
    pub intent: Option<Intent>,
}

/// `POST /chat/turn` request body.
#[derive(Debug, Serialize)]
pub struct ChatTurnRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub user_text: String,
}

/// `POST /chat/turn` response.
#[derive(Debug, Deserialize)]
pub struct ChatTurnResponse {
    pub assistant_text: String,
    #[serde(default)]
    pub state: TurnState,
}

/// The backend's side-channel of asserted facts attached to a turn or a
/// stored message. Only these four fields are extracted; anything else in
/// the bag is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TurnState {
    #[serde(default)]
    pub red_flag_detected: Option<bool>,
    #[serde(default)]
    pub red_flag_label: Option<String>,
    #[serde(default, deserialize_with = "lenient_intent")]
    pub intent: Option<Intent>,
    #[serde(default)]
    pub soap_ready: Option<bool>,
}

/// `GET /session/{id}/transcript` response.
#[derive(Debug, Deserialize)]
pub struct TranscriptWire {
    pub session_id: String,
    #[serde(default)]
    pub messages: Vec<RawMessage>,
    #[serde(default)]
    pub soap_summaries: Vec<Value>,
    #[serde(default)]
    pub citations: Vec<Value>,
}

/// A stored message as the backend returns it: the content lives in
/// `content_th` with `text` as a legacy fallback, and `ts` may be RFC 3339
/// text, epoch milliseconds, or absent.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMessage {
    pub role: MessageRole,
    #[serde(default)]
    pub content_th: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub ts: Option<RawTs>,
    #[serde(default)]
    pub state: Option<TurnState>,
}

/// A timestamp as found on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawTs {
    Text(String),
    Millis(i64),
}

/// Decodes an intent leniently: unknown or non-string codes become `None`
/// instead of failing the whole payload.
fn lenient_intent<'de, D>(deserializer: D) -> Result<Option<Intent>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(Value::as_str)
        .and_then(Intent::parse))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_turn_state_absent_fields_are_none() {
        let state: TurnState = serde_json::from_value(json!({})).unwrap();
        assert_eq!(state.red_flag_detected, None);
        assert_eq!(state.red_flag_label, None);
        assert_eq!(state.intent, None);
        assert_eq!(state.soap_ready, None);
    }

    #[test]
    fn test_turn_state_ignores_unknown_fields() {
        let state: TurnState = serde_json::from_value(json!({
            "soap_ready": true,
            "slot_values": {"duration": "3d"},
            "turn_index": 7,
        }))
        .unwrap();
        assert_eq!(state.soap_ready, Some(true));
    }

    #[test]
    fn test_unknown_intent_decodes_to_none() {
        let state: TurnState =
            serde_json::from_value(json!({"intent": "cardiology"})).unwrap();
        assert_eq!(state.intent, None);

        let state: TurnState = serde_json::from_value(json!({"intent": 42})).unwrap();
        assert_eq!(state.intent, None);
    }

    #[test]
    fn test_known_intent_decodes() {
        let state: TurnState = serde_json::from_value(json!({"intent": "derm"})).unwrap();
        assert_eq!(state.intent, Some(Intent::Derm));
    }

    #[test]
    fn test_raw_ts_both_shapes() {
        let msg: RawMessage = serde_json::from_value(json!({
            "role": "user",
            "content_th": "ไอ",
            "ts": "2024-01-01T00:00:00.000Z",
        }))
        .unwrap();
        assert_eq!(
            msg.ts,
            Some(RawTs::Text("2024-01-01T00:00:00.000Z".to_string()))
        );

        let msg: RawMessage = serde_json::from_value(json!({
            "role": "assistant",
            "text": "สวัสดี",
            "ts": 1_700_000_000_000_i64,
        }))
        .unwrap();
        assert_eq!(msg.ts, Some(RawTs::Millis(1_700_000_000_000)));
    }

    #[test]
    fn test_chat_turn_response_missing_state() {
        let res: ChatTurnResponse =
            serde_json::from_value(json!({"assistant_text": "ok"})).unwrap();
        assert_eq!(res.state.soap_ready, None);
    }
}
