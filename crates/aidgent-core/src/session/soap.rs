//! SOAP summary normalization.
//!
//! The backend's SOAP objects are treated as opaque JSON; only the display
//! layer needs them in a fixed shape. Both long field names
//! (`subjective`, ...) and single-letter keys (`S`/`s`, ...) are accepted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A normalized clinical SOAP note.
///
/// Absent sections are rendered as `"-"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoapNote {
    pub subjective: String,
    pub objective: String,
    pub assessment: String,
    pub plan: String,
}

impl SoapNote {
    /// Normalizes a raw backend SOAP object.
    ///
    /// Returns `None` when the raw value is not a JSON object.
    pub fn normalize(raw: &Value) -> Option<Self> {
        if !raw.is_object() {
            return None;
        }
        Some(Self {
            subjective: section(raw, &["subjective", "S", "s"]),
            objective: section(raw, &["objective", "O", "o"]),
            assessment: section(raw, &["assessment", "A", "a"]),
            plan: section(raw, &["plan", "P", "p"]),
        })
    }
}

/// Extracts the first present key and renders it as display text.
fn section(raw: &Value, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| raw.get(*key))
        .map(to_text)
        .unwrap_or_else(|| "-".to_string())
}

fn to_text(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_long_keys() {
        let soap = SoapNote::normalize(&json!({
            "subjective": "cough for 3 days",
            "objective": "afebrile",
            "assessment": "likely URTI",
            "plan": "rest and fluids",
        }))
        .unwrap();
        assert_eq!(soap.subjective, "cough for 3 days");
        assert_eq!(soap.plan, "rest and fluids");
    }

    #[test]
    fn test_single_letter_keys() {
        let soap = SoapNote::normalize(&json!({"S": "itchy rash", "P": "topical steroid"})).unwrap();
        assert_eq!(soap.subjective, "itchy rash");
        assert_eq!(soap.objective, "-");
        assert_eq!(soap.assessment, "-");
        assert_eq!(soap.plan, "topical steroid");
    }

    #[test]
    fn test_non_text_sections_stringified() {
        let soap = SoapNote::normalize(&json!({"assessment": {"dx": "urti"}})).unwrap();
        assert!(soap.assessment.contains("\"dx\""));
    }

    #[test]
    fn test_non_object_raw() {
        assert!(SoapNote::normalize(&json!("just a string")).is_none());
        assert!(SoapNote::normalize(&Value::Null).is_none());
    }
}
