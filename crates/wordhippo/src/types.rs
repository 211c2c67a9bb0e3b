//! Core types for thesaurus lookups

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for fetching similar words
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ThesaurusRequest {
    /// word that should be looked up in the thesaurus
    pub word: String,
}

impl ThesaurusRequest {
    /// Create a new request for the given word
    pub fn new(word: impl Into<String>) -> Self {
        Self { word: word.into() }
    }
}

/// Result of a thesaurus lookup
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ThesaurusResponse {
    /// The word that was looked up
    pub word: String,

    /// The fetched page URL
    pub url: String,

    /// HTTP status code of the content fetch
    pub status_code: u16,

    /// Normalized text extracted from the page
    pub content: String,

    /// Diagnostic prefix, present only when the payload was not HTML and
    /// is passed through verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl ThesaurusResponse {
    /// Caller-facing text: the diagnostic prefix (if any) followed by the
    /// extracted content
    pub fn text(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}{}", self.content),
            None => self.content.clone(),
        }
    }
}
