//! Agent activity logging
//!
//! Agents report lifecycle events (search started, summarization completed,
//! ...) to an [`ActionLog`] injected at construction. The log is an optional
//! collaborator: when none is wanted, [`NoopLog`] stands in for it so the
//! agents never need to check for its absence.

mod entry;
mod sinks;

pub use entry::{AgentAction, AgentActionLogEntry};
pub use sinks::{MemoryLog, NoopLog, TracingLog};

use serde_json::{Map, Value};
use std::sync::Arc;

/// Sink for agent lifecycle events
pub trait ActionLog: Send + Sync {
    /// Record one entry. Must not fail or block the caller.
    fn record(&self, entry: AgentActionLogEntry);
}

/// Shared handle to an action log
pub type SharedActionLog = Arc<dyn ActionLog>;

/// Build a log handle that discards everything
pub fn noop() -> SharedActionLog {
    Arc::new(NoopLog)
}

/// Build and record an entry stamped with the current local time
pub fn log_action(
    log: &dyn ActionLog,
    agent: &str,
    action: AgentAction,
    data: Map<String, Value>,
) {
    log.record(AgentActionLogEntry::now(agent, action, data));
}
