//! Search provider module
//!
//! Defines the provider traits the search agent talks to and the
//! DuckDuckGo implementation.

mod traits;

pub mod duckduckgo;

pub use duckduckgo::DuckDuckGo;
pub use traits::*;

use crate::config::SearchSettings;
use crate::network::HttpClient;
use anyhow::Result;
use std::sync::Arc;

/// Build the provider named in the settings
pub fn from_settings(client: HttpClient, settings: &SearchSettings) -> Result<Arc<dyn SearchProvider>> {
    match settings.provider.as_str() {
        "duckduckgo" | "ddg" => Ok(Arc::new(DuckDuckGo::with_settings(client, settings))),
        other => Err(anyhow::anyhow!("Unknown search provider: {}", other)),
    }
}

/// Provider names accepted by [`from_settings`]
pub fn available_providers() -> Vec<&'static str> {
    vec!["duckduckgo"]
}
