use serde::{Deserialize, Serialize};

/// One work of the anthology.
///
/// Every field defaults to an absent state so collections written by other
/// tools (or with keys missing) still load. `filtered_terms` and
/// `stemmed_terms` are never set by the extractor; downstream stages fill them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub document_id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub raw_text: Option<String>,
    #[serde(default)]
    pub terms: Option<Vec<String>>,
    #[serde(default)]
    pub filtered_terms: Option<Vec<String>>,
    #[serde(default)]
    pub stemmed_terms: Option<Vec<String>>,
}

impl Document {
    /// Build a record from accumulated body text. Terms are the whitespace
    /// split of the text, so they always agree with `raw_text`.
    pub fn from_body(document_id: u64, title: Option<String>, body: &str) -> Self {
        Document {
            document_id,
            title,
            raw_text: Some(body.trim().to_string()),
            terms: Some(body.split_whitespace().map(str::to_string).collect()),
            ..Document::default()
        }
    }

    pub fn text(&self) -> &str {
        self.raw_text.as_deref().unwrap_or_default()
    }

    pub fn terms(&self) -> &[String] {
        self.terms.as_deref().unwrap_or_default()
    }

    pub fn term_count(&self) -> usize {
        self.terms().len()
    }
}
