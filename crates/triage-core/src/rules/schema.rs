use crate::model::Priority;
use serde::{Deserialize, Serialize};

/// Keyword tables driving record classification for one language.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordRules {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    pub language: String,
    /// Word whose presence marks a message as a review request.
    pub review_marker: String,
    /// Checked in order; the first keyword found in the description wins.
    pub priorities: Vec<PriorityRule>,
}

/// A single `(priority, keyword)` pair. An empty keyword is a fallback that
/// matches whenever it is reached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityRule {
    pub priority: Priority,
    #[serde(default)]
    pub keyword: String,
}

impl PriorityRule {
    pub fn is_fallback(&self) -> bool {
        self.keyword.is_empty()
    }
}
