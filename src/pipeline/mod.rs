//! Research pipeline
//!
//! Runs the search agent over each query in turn, then hands every result
//! list to the summarizer.

use crate::agents::{SearchAgent, SummarizerAgent};
use crate::results::{SearchResult, Summary};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

/// Everything one pipeline run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchReport {
    /// Queries in the order they were searched
    pub queries: Vec<String>,
    /// One result list per query, same order as `queries`
    pub results: Vec<Vec<SearchResult>>,
    /// Summary over all result lists
    pub summary: Summary,
    /// Wall-clock duration of the run in milliseconds
    pub elapsed_ms: u64,
}

impl ResearchReport {
    /// Total number of results across all queries
    pub fn result_count(&self) -> usize {
        self.results.iter().map(Vec::len).sum()
    }
}

/// Sequential search-then-summarize pipeline
pub struct ResearchPipeline {
    search: SearchAgent,
    summarizer: SummarizerAgent,
}

impl ResearchPipeline {
    pub fn new(search: SearchAgent, summarizer: SummarizerAgent) -> Self {
        Self { search, summarizer }
    }

    pub fn search_agent(&self) -> &SearchAgent {
        &self.search
    }

    /// Search every query in order, then summarize
    pub async fn run<S: AsRef<str>>(&self, queries: &[S]) -> ResearchReport {
        let start = Instant::now();
        let mut results = Vec::with_capacity(queries.len());

        info!("Running research pipeline over {} queries", queries.len());

        for query in queries {
            results.push(self.search.search(query.as_ref(), None).await);
        }

        let summary = self.summarizer.summarize(&results);

        ResearchReport {
            queries: queries.iter().map(|q| q.as_ref().to_string()).collect(),
            results,
            summary,
            elapsed_ms: start.elapsed().as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{AgentAction, MemoryLog};
    use crate::agents::Pacing;
    use crate::network::HttpClient;
    use crate::provider::DuckDuckGo;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_unreachable_provider_yields_empty_report() {
        // nothing listens on port 9 locally
        let provider = DuckDuckGo::new(HttpClient::new().unwrap()).with_url("http://127.0.0.1:9/html/");
        let log = Arc::new(MemoryLog::new());
        let pipeline = ResearchPipeline::new(
            SearchAgent::new(Arc::new(provider))
                .with_log(log.clone())
                .with_pacing(Pacing::None),
            SummarizerAgent::new().with_log(log.clone()),
        );

        let report = pipeline.run(&["rust", "tokio"]).await;

        assert_eq!(report.queries, vec!["rust", "tokio"]);
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.result_count(), 0);
        assert_eq!(report.summary, Summary::empty());
        assert_eq!(log.by_action(AgentAction::SearchFailed).len(), 2);
        assert_eq!(
            log.actions().last(),
            Some(&AgentAction::SummarizationCompleted)
        );
    }
}
