//! Result types shared by the agents
//!
//! Search results produced by the search agent and the summary records
//! produced by the summarizer.

mod types;

pub use types::*;
