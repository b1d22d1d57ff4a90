//! DuckDuckGo HTML search provider

use super::traits::*;
use crate::config::SearchSettings;
use crate::network::HttpClient;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use tracing::debug;
use url::Url;

const DEFAULT_HTML_URL: &str = "https://html.duckduckgo.com/html/";

static RESULT_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("div.result").unwrap());
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a.result__a").unwrap());
static SNIPPET_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".result__snippet").unwrap());
static CONTAINER_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#links, div.results, div.serp__results").unwrap());
static CHALLENGE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.anomaly-modal__mask, div.anomaly-modal__modal, #challenge-form").unwrap()
});
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// DuckDuckGo web search through the HTML endpoint
pub struct DuckDuckGo {
    client: HttpClient,
    html_url: String,
    region: String,
    safesearch: u8,
}

impl DuckDuckGo {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            html_url: DEFAULT_HTML_URL.to_string(),
            region: "wt-wt".to_string(),
            safesearch: 1,
        }
    }

    /// Build from search settings
    pub fn with_settings(client: HttpClient, settings: &SearchSettings) -> Self {
        let mut ddg = Self::new(client);
        if let Some(ref url) = settings.base_url {
            ddg.html_url = url.clone();
        }
        ddg.region = settings.region.clone();
        ddg.safesearch = settings.safesearch;
        ddg
    }

    /// Point at a different endpoint
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.html_url = url.into();
        self
    }

    pub fn html_url(&self) -> &str {
        &self.html_url
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGo {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn open(&self) -> Result<Box<dyn ProviderSession>, ProviderError> {
        let endpoint = Url::parse(&self.html_url).map_err(|e| {
            ProviderError::Session(format!("invalid endpoint {}: {}", self.html_url, e))
        })?;

        let client = self
            .client
            .fork()
            .map_err(|e| ProviderError::Session(format!("failed to build client: {}", e)))?;
        debug!("Opened DuckDuckGo session against {}", endpoint);

        Ok(Box::new(DuckDuckGoSession {
            client,
            endpoint,
            region: self.region.clone(),
            safesearch: self.safesearch,
            open: true,
        }))
    }
}

/// One DuckDuckGo session with its own user agent and cookie jar
struct DuckDuckGoSession {
    client: HttpClient,
    endpoint: Url,
    region: String,
    safesearch: u8,
    open: bool,
}

impl DuckDuckGoSession {
    fn request(&self, query: &str) -> ProviderRequest {
        let mut form = HashMap::new();
        form.insert("q".to_string(), query.to_string());
        form.insert("b".to_string(), String::new());
        form.insert("kl".to_string(), self.region.clone());

        let kp = match self.safesearch {
            2 => "1",  // Strict
            1 => "-1", // Moderate
            _ => "-2", // Off
        };
        form.insert("kp".to_string(), kp.to_string());

        ProviderRequest::post(self.endpoint.as_str()).form(form)
    }
}

#[async_trait]
impl ProviderSession for DuckDuckGoSession {
    async fn text(
        &mut self,
        query: &str,
        max_results: usize,
    ) -> Result<RecordStream, ProviderError> {
        if !self.open {
            return Err(ProviderError::Session("session already closed".to_string()));
        }

        let response = self
            .client
            .execute(self.request(query))
            .await?
            .error_for_status()?;

        let records = parse_results(&response.text)?;
        debug!(
            "DuckDuckGo returned {} records for '{}'",
            records.len(),
            query
        );

        Ok(stream::iter(records.into_iter().take(max_results)).boxed())
    }

    fn close(&mut self) {
        if self.open {
            self.open = false;
            debug!("Closed DuckDuckGo session");
        }
    }
}

impl Drop for DuckDuckGoSession {
    fn drop(&mut self) {
        self.close();
    }
}

/// Parse a DuckDuckGo HTML result page.
///
/// A record whose link cannot be resolved becomes an `Err` at its position,
/// so the records before it stay readable. A page with no results but a
/// bot challenge form is reported as [`ProviderError::Captcha`].
pub fn parse_results(html: &str) -> Result<Vec<Result<RawRecord, ProviderError>>, ProviderError> {
    let document = Html::parse_document(html);
    let mut records = Vec::new();

    for element in document.select(&RESULT_SELECTOR) {
        // Sponsored results
        if element
            .value()
            .classes()
            .any(|c| c == "result--ad" || c == "result--no-result")
        {
            continue;
        }

        let title_elem = match element.select(&TITLE_SELECTOR).next() {
            Some(t) => t,
            None => continue,
        };

        let index = records.len();
        let href = match title_elem.value().attr("href") {
            Some(h) => match resolve_href(h) {
                Ok(url) => url,
                Err(reason) => {
                    records.push(Err(ProviderError::Record { index, reason }));
                    continue;
                }
            },
            None => None,
        };

        if href.as_deref().is_some_and(is_internal) {
            continue;
        }

        records.push(Ok(RawRecord {
            title: text_of(title_elem),
            body: element.select(&SNIPPET_SELECTOR).next().and_then(text_of),
            href,
        }));
    }

    if records.is_empty() && document.select(&CHALLENGE_SELECTOR).next().is_some() {
        return Err(ProviderError::Captcha);
    }

    if records.is_empty() && document.select(&CONTAINER_SELECTOR).next().is_none() {
        return Err(ProviderError::Malformed(
            "no result container in response".to_string(),
        ));
    }

    Ok(records)
}

/// Collapsed text content, `None` when blank
fn text_of(element: ElementRef<'_>) -> Option<String> {
    let text = element.text().collect::<String>();
    let text = WHITESPACE.replace_all(text.trim(), " ");
    if text.is_empty() {
        None
    } else {
        Some(text.into_owned())
    }
}

/// Unwrap DuckDuckGo redirect links (`//duckduckgo.com/l/?uddg=...`)
fn resolve_href(href: &str) -> Result<Option<String>, String> {
    let href = href.trim();
    if href.is_empty() {
        return Ok(None);
    }

    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else if href.starts_with('/') {
        format!("https://duckduckgo.com{}", href)
    } else {
        href.to_string()
    };

    let url = Url::parse(&absolute).map_err(|e| format!("invalid link {}: {}", href, e))?;

    if url.path() == "/l/" {
        return url
            .query_pairs()
            .find(|(k, _)| k == "uddg")
            .map(|(_, v)| Some(v.into_owned()))
            .ok_or_else(|| format!("redirect link without target: {}", href));
    }

    Ok(Some(url.to_string()))
}

fn is_internal(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.ends_with("duckduckgo.com")))
        .unwrap_or(false)
}
