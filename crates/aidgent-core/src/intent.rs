//! Triage intent categories.

use serde::{Deserialize, Serialize};

/// A coarse triage category associated with a session.
///
/// The wire representation is the lowercase category code used by the
/// backend (`"urti"`, `"derm"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// Upper respiratory tract infection.
    Urti,
    /// Dermatological complaint.
    Derm,
}

impl Intent {
    /// Returns the wire-level category code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Urti => "urti",
            Intent::Derm => "derm",
        }
    }

    /// Thai display label for the category.
    pub fn label_th(&self) -> &'static str {
        match self {
            Intent::Urti => "ทางเดินหายใจบน",
            Intent::Derm => "ผิวหนัง",
        }
    }

    /// Parses a backend-asserted intent string defensively.
    ///
    /// Unknown or empty values yield `None` - never a default category.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "urti" => Some(Intent::Urti),
            "derm" => Some(Intent::Derm),
            _ => None,
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Intent {
    type Err = crate::error::AidgentError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Intent::parse(s)
            .ok_or_else(|| crate::error::AidgentError::config(format!("unknown intent '{s}'")))
    }
}
