//! Result type definitions

use serde::{Deserialize, Serialize};

/// Title used when the provider record has none
pub const NO_TITLE: &str = "No title";

/// Snippet used when the provider record has no body
pub const NO_DESCRIPTION: &str = "No description";

/// Synthesis tag for the heuristic summarizer
pub const HEURISTIC_EXTRACTION: &str = "heuristic_extraction";

/// A single normalized search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// 1-based position in the provider response
    pub rank: u32,
    /// The title of the result
    pub title: String,
    /// Content snippet/description
    pub snippet: String,
    /// The URL of the result (may be empty)
    pub url: String,
    /// Provider that returned this result
    pub source: String,
}

impl SearchResult {
    /// Create a new result
    pub fn new(
        rank: u32,
        title: impl Into<String>,
        snippet: impl Into<String>,
        url: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            rank,
            title: title.into(),
            snippet: snippet.into(),
            url: url.into(),
            source: source.into(),
        }
    }

    /// Whether the result links anywhere
    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }
}

/// One condensed point extracted from a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Snippet truncated to at most 200 characters
    pub point: String,
    /// Title of the originating result
    pub source: String,
    /// URL of the originating result (may be empty)
    pub url: String,
}

/// A cited source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub title: String,
    pub url: String,
}

/// Output of the summarizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Up to 10 findings, in flattened input order
    pub key_findings: Vec<Finding>,
    /// Total number of flattened input results, not the capped output size
    pub source_count: usize,
    /// Up to 15 sources with non-empty URLs, not deduplicated
    pub sources: Vec<SourceRef>,
    /// Which synthesis algorithm produced this summary
    pub synthesis_method: String,
}

impl Summary {
    /// Summary of nothing
    pub fn empty() -> Self {
        Self {
            key_findings: Vec::new(),
            source_count: 0,
            sources: Vec::new(),
            synthesis_method: HEURISTIC_EXTRACTION.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.key_findings.is_empty()
    }
}

/// Truncate to at most `max` characters without splitting a UTF-8 sequence
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("hi", 10), "hi");
        assert_eq!(truncate_chars("", 5), "");
        // multi-byte characters count once each
        assert_eq!(truncate_chars("héllo wörld", 7), "héllo w");
    }

    #[test]
    fn test_empty_summary_serializes() {
        let json = serde_json::to_value(Summary::empty()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "key_findings": [],
                "source_count": 0,
                "sources": [],
                "synthesis_method": "heuristic_extraction"
            })
        );
    }
}
