use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// An example post from the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Document {
    /// Builds a document, trimming the text. Blank text is rejected.
    pub fn new(text: impl AsRef<str>, tags: Vec<String>) -> Result<Self, DomainError> {
        let text = text.as_ref().trim();
        if text.is_empty() {
            return Err(DomainError::validation("document text is empty"));
        }

        Ok(Self {
            text: text.to_string(),
            tags,
        })
    }

    /// Decodes one corpus record. Unknown fields are ignored so that
    /// fetched timelines can be used as corpus files directly.
    pub fn from_record(record: serde_json::Value) -> Result<Self, DomainError> {
        let raw: Document =
            serde_json::from_value(record).map_err(|e| DomainError::validation(e.to_string()))?;
        Self::new(raw.text, raw.tags)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub document: Document,
    pub score: f32,
}
