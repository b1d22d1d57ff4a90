//! Settings structures for research-agents configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Main settings structure matching research.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub search: SearchSettings,
    pub outgoing: OutgoingSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (RESEARCH_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Merge overrides from an arbitrary variable lookup
    pub fn merge_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("RESEARCH_MAX_RESULTS") {
            if let Ok(n) = val.parse() {
                self.search.max_results = n;
            }
        }
        if let Some(val) = lookup("RESEARCH_PACING_MS") {
            if let Ok(ms) = val.parse() {
                self.search.pacing_ms = ms;
            }
        }
        if let Some(val) = lookup("RESEARCH_BASE_URL") {
            self.search.base_url = Some(val);
        }
        if let Some(val) = lookup("RESEARCH_LOG_LEVEL") {
            self.logging.level = val;
        }
    }

    /// Reject values the agents cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.search.max_results == 0 {
            bail!("search.max_results must be at least 1");
        }
        let timeout = self.outgoing.request_timeout;
        if !(timeout.is_finite() && timeout > 0.0) {
            bail!("outgoing.request_timeout must be positive");
        }
        if self.search.safesearch > 2 {
            bail!("search.safesearch must be 0, 1 or 2");
        }
        Ok(())
    }
}

/// Search agent settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Results requested when the caller gives no limit
    pub max_results: usize,
    /// Delay after each processed result, in milliseconds
    pub pacing_ms: u64,
    /// Provider to query
    pub provider: String,
    /// Provider region code (DuckDuckGo `kl`)
    pub region: String,
    /// Safe search level: 0 = off, 1 = moderate, 2 = strict
    pub safesearch: u8,
    /// Override for the provider endpoint
    pub base_url: Option<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_results: 5,
            pacing_ms: 500,
            provider: "duckduckgo".to_string(),
            region: "wt-wt".to_string(),
            safesearch: 1,
            base_url: None,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Default request timeout in seconds
    pub request_timeout: f64,
    /// Pool max size
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 5.0,
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Where agent activity entries go
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivitySink {
    /// Structured `tracing` events
    #[default]
    Tracing,
    /// Kept in memory for inspection
    Memory,
    /// Discarded
    None,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive for the subscriber
    pub level: String,
    /// Destination of agent activity entries
    pub activity_sink: ActivitySink,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            activity_sink: ActivitySink::Tracing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.search.max_results, 5);
        assert_eq!(settings.search.pacing_ms, 500);
        assert_eq!(settings.search.provider, "duckduckgo");
        assert_eq!(settings.logging.activity_sink, ActivitySink::Tracing);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
search:
  max_results: 8
logging:
  activity_sink: memory
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.search.max_results, 8);
        assert_eq!(settings.search.pacing_ms, 500);
        assert_eq!(settings.outgoing.request_timeout, 5.0);
        assert_eq!(settings.logging.activity_sink, ActivitySink::Memory);
    }

    #[test]
    fn test_merge_vars() {
        let mut settings = Settings::default();
        settings.merge_vars(|key| match key {
            "RESEARCH_MAX_RESULTS" => Some("3".to_string()),
            "RESEARCH_PACING_MS" => Some("not-a-number".to_string()),
            "RESEARCH_BASE_URL" => Some("http://localhost:9000/html/".to_string()),
            _ => None,
        });
        assert_eq!(settings.search.max_results, 3);
        assert_eq!(settings.search.pacing_ms, 500);
        assert_eq!(
            settings.search.base_url.as_deref(),
            Some("http://localhost:9000/html/")
        );
    }

    #[test]
    fn test_validate_rejects_zero_results() {
        let mut settings = Settings::default();
        settings.search.max_results = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite_timeout() {
        for value in [".nan", ".inf", "-.inf", "0", "-2.5"] {
            let yaml = format!("outgoing:\n  request_timeout: {}\n", value);
            let settings = Settings::from_yaml(&yaml).unwrap();
            assert!(settings.validate().is_err(), "{}", value);
        }
    }
}
