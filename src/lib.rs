//! research-agents: a two-stage search and summarization pipeline
//!
//! A search agent queries an external web-search provider and normalizes
//! its records; a summarizer agent condenses several result lists into a
//! flat list of findings with source attribution.

pub mod activity;
pub mod agents;
pub mod config;
pub mod network;
pub mod pipeline;
pub mod provider;
pub mod results;

pub use agents::{Pacing, SearchAgent, SummarizerAgent};
pub use config::Settings;
pub use pipeline::{ResearchPipeline, ResearchReport};
pub use provider::{DuckDuckGo, SearchProvider};
pub use results::{Finding, SearchResult, SourceRef, Summary};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
