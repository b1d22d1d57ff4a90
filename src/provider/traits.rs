//! Provider traits and types

use async_trait::async_trait;
use futures::stream::BoxStream;
use std::collections::HashMap;
use thiserror::Error;

/// Raw record as handed back by a provider, before normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub title: Option<String>,
    pub body: Option<String>,
    pub href: Option<String>,
}

impl RawRecord {
    pub fn new(
        title: Option<impl Into<String>>,
        body: Option<impl Into<String>>,
        href: Option<impl Into<String>>,
    ) -> Self {
        Self {
            title: title.map(Into::into),
            body: body.map(Into::into),
            href: href.map(Into::into),
        }
    }
}

/// Errors raised while talking to a provider
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    #[error("failed to open provider session: {0}")]
    Session(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("rate limited by provider")]
    RateLimited,

    #[error("provider requires a CAPTCHA")]
    Captcha,

    #[error("malformed response: {0}")]
    Malformed(String),

    /// Some records were read before record `index` failed to parse
    #[error("failed to parse record {index}: {reason}")]
    Record { index: usize, reason: String },
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        Self::Request(e.to_string())
    }
}

/// Stream of records from one provider query
pub type RecordStream = BoxStream<'static, Result<RawRecord, ProviderError>>;

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// HTTP request to be made against a provider
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    /// URL to request
    pub url: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Query parameters
    pub params: HashMap<String, String>,
    /// Form body
    pub form: Option<HashMap<String, String>>,
}

impl ProviderRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Get,
            headers: HashMap::new(),
            params: HashMap::new(),
            form: None,
        }
    }

    /// Create a POST request
    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            ..Self::get(url)
        }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Add form data (sent as form-urlencoded)
    pub fn form(mut self, data: HashMap<String, String>) -> Self {
        self.form = Some(data);
        self
    }
}

/// HTTP response from a provider request
#[derive(Debug)]
pub struct ProviderResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl ProviderResponse {
    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if response indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// Map unusable status codes to the matching error.
    ///
    /// The body is not inspected; challenge pages are detected by the parser.
    pub fn error_for_status(self) -> Result<Self, ProviderError> {
        if self.is_rate_limited() {
            Err(ProviderError::RateLimited)
        } else if !self.is_success() {
            Err(ProviderError::Status(self.status))
        } else {
            Ok(self)
        }
    }
}

/// A text-search provider
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Provider name, used as the `source` tag of results
    fn name(&self) -> &str;

    /// Open a session; the caller closes it when done
    async fn open(&self) -> Result<Box<dyn ProviderSession>, ProviderError>;
}

/// An open provider session
#[async_trait]
pub trait ProviderSession: Send {
    /// Query for up to `max_results` records
    async fn text(
        &mut self,
        query: &str,
        max_results: usize,
    ) -> Result<RecordStream, ProviderError>;

    /// Release the session
    fn close(&mut self);
}
