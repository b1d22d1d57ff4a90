//! Log entry types

use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Timestamp layout: local time, microseconds, no offset
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Lifecycle tags an agent can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentAction {
    SearchStarted,
    SearchCompleted,
    SearchFailed,
    SummarizationStarted,
    SummarizationCompleted,
}

impl AgentAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SearchStarted => "search_started",
            Self::SearchCompleted => "search_completed",
            Self::SearchFailed => "search_failed",
            Self::SummarizationStarted => "summarization_started",
            Self::SummarizationCompleted => "summarization_completed",
        }
    }
}

impl fmt::Display for AgentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded agent action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentActionLogEntry {
    /// Name of the originating agent
    pub agent: String,
    /// Lifecycle tag
    pub action: AgentAction,
    /// Free-form payload
    pub data: Map<String, Value>,
    /// ISO-8601 timestamp
    pub timestamp: String,
}

impl AgentActionLogEntry {
    pub fn new(
        agent: impl Into<String>,
        action: AgentAction,
        data: Map<String, Value>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            agent: agent.into(),
            action,
            data,
            timestamp: timestamp.into(),
        }
    }

    /// Create an entry stamped with the current local time
    pub fn now(agent: impl Into<String>, action: AgentAction, data: Map<String, Value>) -> Self {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        Self::new(agent, action, data, timestamp)
    }

    /// Look up a payload field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}
