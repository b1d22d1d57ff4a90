//! Summarizer agent: heuristic condensation of several result lists

use crate::activity::{self, AgentAction, SharedActionLog};
use crate::results::{
    truncate_chars, Finding, SearchResult, SourceRef, Summary, HEURISTIC_EXTRACTION,
};
use serde_json::{json, Map, Value};
use tracing::debug;

/// Results considered when building findings
pub const MAX_FINDINGS: usize = 10;

/// Cap on cited sources
pub const MAX_SOURCES: usize = 15;

/// Longest finding text, in characters
pub const MAX_POINT_CHARS: usize = 200;

/// Condenses the output of several searches into one [`Summary`]
pub struct SummarizerAgent {
    log: SharedActionLog,
}

impl SummarizerAgent {
    /// Name reported in activity entries
    pub const NAME: &'static str = "SummarizerAgent";

    pub fn new() -> Self {
        Self {
            log: activity::noop(),
        }
    }

    pub fn with_log(mut self, log: SharedActionLog) -> Self {
        self.log = log;
        self
    }

    /// Summarize a batch of result lists. Never fails.
    pub fn summarize(&self, batches: &[Vec<SearchResult>]) -> Summary {
        // `source_count` in both payloads is the number of batches
        self.log_action(
            AgentAction::SummarizationStarted,
            json!({ "source_count": batches.len() }),
        );

        let summary = synthesize(batches);
        debug!(
            "Summarized {} results from {} batches into {} findings",
            summary.source_count,
            batches.len(),
            summary.key_findings.len()
        );

        self.log_action(
            AgentAction::SummarizationCompleted,
            json!({
                "source_count": batches.len(),
                "key_points": summary.key_findings.len()
            }),
        );

        summary
    }

    fn log_action(&self, action: AgentAction, data: Value) {
        let data = match data {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        activity::log_action(self.log.as_ref(), Self::NAME, action, data);
    }
}

impl Default for SummarizerAgent {
    fn default() -> Self {
        Self::new()
    }
}

/// Flatten the batches in order and extract findings from the first
/// [`MAX_FINDINGS`] results.
///
/// Sources are drawn from that same slice, so they never exceed
/// `MAX_FINDINGS` even though the nominal cap is [`MAX_SOURCES`].
/// Titles are copied as they are, empty ones included.
pub fn synthesize(batches: &[Vec<SearchResult>]) -> Summary {
    let source_count = batches.iter().map(Vec::len).sum();

    let mut key_findings = Vec::new();
    let mut sources = Vec::new();

    for result in batches.iter().flatten().take(MAX_FINDINGS) {
        let title = result.title.as_str();

        key_findings.push(Finding {
            point: truncate_chars(&result.snippet, MAX_POINT_CHARS).to_string(),
            source: title.to_string(),
            url: result.url.clone(),
        });

        if result.has_url() {
            sources.push(SourceRef {
                title: title.to_string(),
                url: result.url.clone(),
            });
        }
    }

    sources.truncate(MAX_SOURCES);

    Summary {
        key_findings,
        source_count,
        sources,
        synthesis_method: HEURISTIC_EXTRACTION.to_string(),
    }
}
