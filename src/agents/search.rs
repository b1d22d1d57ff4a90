//! Search agent: queries a provider and normalizes its records

use super::pacing::Pacing;
use crate::activity::{self, AgentAction, SharedActionLog};
use crate::config::SearchSettings;
use crate::provider::{ProviderError, ProviderSession, RawRecord, SearchProvider};
use crate::results::{SearchResult, NO_DESCRIPTION, NO_TITLE};
use futures::StreamExt;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// Results requested when neither caller nor settings say otherwise
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Gathers ranked results for a query from an external provider.
///
/// `search` never fails from the caller's point of view: provider errors
/// are logged and collapse to an empty list.
pub struct SearchAgent {
    provider: Arc<dyn SearchProvider>,
    log: SharedActionLog,
    max_results: usize,
    pacing: Pacing,
}

impl SearchAgent {
    /// Name reported in activity entries
    pub const NAME: &'static str = "SearchAgent";

    /// Create an agent with default limits, default pacing and no activity log
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self {
            provider,
            log: activity::noop(),
            max_results: DEFAULT_MAX_RESULTS,
            pacing: Pacing::default(),
        }
    }

    /// Create an agent configured from settings
    pub fn from_settings(
        provider: Arc<dyn SearchProvider>,
        settings: &SearchSettings,
        log: SharedActionLog,
    ) -> Self {
        Self::new(provider)
            .with_log(log)
            .with_max_results(settings.max_results)
            .with_pacing(Pacing::from_millis(settings.pacing_ms))
    }

    pub fn with_log(mut self, log: SharedActionLog) -> Self {
        self.log = log;
        self
    }

    /// Set the default result limit; zero keeps the current value
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        if max_results > 0 {
            self.max_results = max_results;
        }
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Search for `query`, returning at most `max_results` ranked results.
    ///
    /// `None` or `Some(0)` uses the agent's default limit.
    pub async fn search(&self, query: &str, max_results: Option<usize>) -> Vec<SearchResult> {
        let max_results = max_results
            .filter(|&n| n > 0)
            .unwrap_or(self.max_results);

        self.log_action(AgentAction::SearchStarted, json!({ "query": query }));

        match self.execute_search(query, max_results).await {
            Ok(results) => {
                self.log_action(
                    AgentAction::SearchCompleted,
                    json!({
                        "query": query,
                        "result_count": results.len(),
                        "success": true
                    }),
                );
                results
            }
            Err(e) => {
                warn!("Search for '{}' failed: {}", query, e);
                self.log_action(
                    AgentAction::SearchFailed,
                    json!({
                        "query": query,
                        "error": e.to_string()
                    }),
                );
                Vec::new()
            }
        }
    }

    /// Run one query inside a provider session, closing it on every path,
    /// including when the search future is dropped
    async fn execute_search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, ProviderError> {
        let mut session = OpenSession(self.provider.open().await?);
        self.collect(session.0.as_mut(), query, max_results).await
    }

    async fn collect(
        &self,
        session: &mut dyn ProviderSession,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, ProviderError> {
        let mut records = session.text(query, max_results).await?.take(max_results);
        let mut results = Vec::new();

        while let Some(record) = records.next().await {
            let rank = results.len() as u32 + 1;
            results.push(self.normalize(rank, record?));
            self.pacing.wait().await;
        }

        debug!(
            "{} collected {} results for '{}'",
            self.provider.name(),
            results.len(),
            query
        );
        Ok(results)
    }

    fn normalize(&self, rank: u32, record: RawRecord) -> SearchResult {
        SearchResult {
            rank,
            title: record.title.unwrap_or_else(|| NO_TITLE.to_string()),
            snippet: record.body.unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            url: record.href.unwrap_or_default(),
            source: self.provider.name().to_string(),
        }
    }

    fn log_action(&self, action: AgentAction, data: Value) {
        let data = match data {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        activity::log_action(self.log.as_ref(), Self::NAME, action, data);
    }
}

/// Closes the wrapped session when it goes out of scope
struct OpenSession(Box<dyn ProviderSession>);

impl Drop for OpenSession {
    fn drop(&mut self) {
        self.0.close();
    }
}
