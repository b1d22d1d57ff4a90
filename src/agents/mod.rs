//! Search and summarization agents
//!
//! The two stages of the research pipeline. Each agent is stateless per
//! call and reports its lifecycle to an injected activity log.

mod pacing;
mod search;
mod summarizer;

pub use pacing::{Pacing, DEFAULT_PACING};
pub use search::{SearchAgent, DEFAULT_MAX_RESULTS};
pub use summarizer::{synthesize, SummarizerAgent, MAX_FINDINGS, MAX_POINT_CHARS, MAX_SOURCES};
