//! Action log implementations

use super::{ActionLog, AgentAction, AgentActionLogEntry};
use std::sync::{PoisonError, RwLock};
use tracing::info;

/// Discards every entry
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLog;

impl ActionLog for NoopLog {
    fn record(&self, _entry: AgentActionLogEntry) {}
}

/// Forwards entries to `tracing` as structured events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl ActionLog for TracingLog {
    fn record(&self, entry: AgentActionLogEntry) {
        let data = serde_json::Value::Object(entry.data);
        info!(
            target: "research_agents::activity",
            agent = %entry.agent,
            action = %entry.action,
            timestamp = %entry.timestamp,
            data = %data,
            "agent action"
        );
    }
}

/// Keeps every entry in memory, in arrival order
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: RwLock<Vec<AgentActionLogEntry>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded entries
    pub fn entries(&self) -> Vec<AgentActionLogEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Entries recorded by one agent
    pub fn by_agent(&self, agent: &str) -> Vec<AgentActionLogEntry> {
        self.filter(|e| e.agent == agent)
    }

    /// Entries with a given action tag
    pub fn by_action(&self, action: AgentAction) -> Vec<AgentActionLogEntry> {
        self.filter(|e| e.action == action)
    }

    /// Sequence of recorded action tags
    pub fn actions(&self) -> Vec<AgentAction> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|e| e.action)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all entries
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn filter(&self, pred: impl Fn(&AgentActionLogEntry) -> bool) -> Vec<AgentActionLogEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| pred(e))
            .cloned()
            .collect()
    }
}

impl ActionLog for MemoryLog {
    fn record(&self, entry: AgentActionLogEntry) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn entry(agent: &str, action: AgentAction) -> AgentActionLogEntry {
        let mut data = Map::new();
        data.insert("query".to_string(), json!("rust"));
        AgentActionLogEntry::now(agent, action, data)
    }

    #[test]
    fn test_memory_log() {
        let log = MemoryLog::new();
        assert!(log.is_empty());

        log.record(entry("SearchAgent", AgentAction::SearchStarted));
        log.record(entry("SearchAgent", AgentAction::SearchCompleted));
        log.record(entry("SummarizerAgent", AgentAction::SummarizationStarted));

        assert_eq!(log.len(), 3);
        assert_eq!(log.by_agent("SearchAgent").len(), 2);
        assert_eq!(log.by_action(AgentAction::SummarizationStarted).len(), 1);
        assert_eq!(
            log.actions(),
            vec![
                AgentAction::SearchStarted,
                AgentAction::SearchCompleted,
                AgentAction::SummarizationStarted
            ]
        );

        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_noop_and_tracing_accept_entries() {
        NoopLog.record(entry("SearchAgent", AgentAction::SearchFailed));
        TracingLog.record(entry("SearchAgent", AgentAction::SearchFailed));
    }
}
