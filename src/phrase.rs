//! Phrase rows as stored in the `phrase` table.

use serde::{Deserialize, Serialize};

/// A stored text row with its auto-assigned identifier.
///
/// Serializes with the column names of the table, so a listing dumps as
/// `[{"phraseID": 1, "phrase": "Hello World!"}, ...]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase {
    #[serde(rename = "phraseID")]
    pub id: i64,
    /// The `phrase` column is nullable
    #[serde(rename = "phrase")]
    pub text: Option<String>,
}

impl Phrase {
    pub fn new(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: Some(text.into()),
        }
    }

    /// Text of the phrase, empty for NULL rows
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

impl std::fmt::Display for Phrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.text {
            Some(text) => write!(f, "#{} {}", self.id, text),
            None => write!(f, "#{} <null>", self.id),
        }
    }
}
