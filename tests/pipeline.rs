use research_agents::activity::{AgentAction, MemoryLog};
use research_agents::config::Settings;
use research_agents::network::HttpClient;
use research_agents::provider::{self, DuckDuckGo};
use research_agents::{Pacing, ResearchPipeline, SearchAgent, SummarizerAgent};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Result page with `n` organic results for `topic`
fn page(topic: &str, n: usize) -> String {
    let mut html = String::from(r#"<html><body><div id="links" class="results">"#);
    for i in 1..=n {
        html.push_str(&format!(
            r##"<div class="result results_links">
  <h2><a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2F{topic}.example%2F{i}&amp;rut=x">{topic} result {i}</a></h2>
  <a class="result__snippet" href="#">About {topic}, part {i}.</a>
</div>"##
        ));
    }
    html.push_str("</div></body></html>");
    html
}

async fn mock_provider(server: &MockServer, topic: &str, n: usize) {
    Mock::given(method("POST"))
        .and(path("/html/"))
        .and(body_string_contains(format!("q={}", topic)))
        .respond_with(ResponseTemplate::new(200).set_body_string(page(topic, n)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_pipeline_against_mock_duckduckgo() {
    let server = MockServer::start().await;
    mock_provider(&server, "tokio", 4).await;
    mock_provider(&server, "serde", 8).await;

    let provider = DuckDuckGo::new(HttpClient::new().unwrap())
        .with_url(format!("{}/html/", server.uri()));
    let log = Arc::new(MemoryLog::new());
    let pipeline = ResearchPipeline::new(
        SearchAgent::new(Arc::new(provider))
            .with_log(log.clone())
            .with_pacing(Pacing::None),
        SummarizerAgent::new().with_log(log.clone()),
    );

    let report = pipeline.run(&["tokio", "serde"]).await;

    // default limit of 5 per query
    assert_eq!(report.results[0].len(), 4);
    assert_eq!(report.results[1].len(), 5);
    assert_eq!(report.results[1][4].rank, 5);
    assert_eq!(report.results[0][0].url, "https://tokio.example/1");
    assert_eq!(report.results[0][0].title, "tokio result 1");
    assert_eq!(report.results[0][0].snippet, "About tokio, part 1.");
    assert_eq!(report.results[0][0].source, "duckduckgo");

    let summary = &report.summary;
    assert_eq!(summary.source_count, 9);
    assert_eq!(summary.key_findings.len(), 9);
    assert_eq!(summary.sources.len(), 9);
    assert_eq!(summary.key_findings[4].source, "serde result 1");

    assert_eq!(
        log.actions(),
        vec![
            AgentAction::SearchStarted,
            AgentAction::SearchCompleted,
            AgentAction::SearchStarted,
            AgentAction::SearchCompleted,
            AgentAction::SummarizationStarted,
            AgentAction::SummarizationCompleted,
        ]
    );
    let completed = log.by_action(AgentAction::SummarizationCompleted);
    assert_eq!(completed[0].get("source_count"), Some(&json!(2)));
    assert_eq!(completed[0].get("key_points"), Some(&json!(9)));
}

#[tokio::test]
async fn test_provider_outage_degrades_to_empty_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut settings = Settings::default();
    settings.search.base_url = Some(format!("{}/html/", server.uri()));
    settings.search.pacing_ms = 0;

    let log = Arc::new(MemoryLog::new());
    let provider = provider::from_settings(HttpClient::new().unwrap(), &settings.search).unwrap();
    let agent = SearchAgent::from_settings(provider, &settings.search, log.clone());

    let results = agent.search("rust", Some(3)).await;

    assert!(results.is_empty());
    let failures = log.by_action(AgentAction::SearchFailed);
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].get("query"), Some(&json!("rust")));
    assert_eq!(failures[0].get("error"), Some(&json!("HTTP error: 503")));
}

#[tokio::test]
async fn test_result_about_captchas_is_not_a_failure() {
    let server = MockServer::start().await;
    let html = r##"<html><body><div id="links" class="results">
<div class="result results_links">
  <h2><a class="result__a" href="https://en.wikipedia.org/wiki/CAPTCHA">CAPTCHA - Wikipedia</a></h2>
  <a class="result__snippet" href="#">A CAPTCHA is a type of challenge-response test.</a>
</div>
</div></body></html>"##;
    Mock::given(method("POST"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(&server)
        .await;

    let provider = DuckDuckGo::new(HttpClient::new().unwrap())
        .with_url(format!("{}/html/", server.uri()));
    let log = Arc::new(MemoryLog::new());
    let agent = SearchAgent::new(Arc::new(provider))
        .with_log(log.clone())
        .with_pacing(Pacing::None);

    let results = agent.search("what is a captcha", None).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "CAPTCHA - Wikipedia");
    assert_eq!(results[0].url, "https://en.wikipedia.org/wiki/CAPTCHA");
    assert!(log.by_action(AgentAction::SearchFailed).is_empty());
}
