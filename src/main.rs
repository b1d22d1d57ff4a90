//! research-agents: search the web and summarize what was found
//!
//! This is the main entry point for the application.

use anyhow::Result;
use research_agents::{
    activity::{self, MemoryLog, SharedActionLog, TracingLog},
    config::{self, ActivitySink, Settings},
    network::HttpClient,
    provider, ResearchPipeline, SearchAgent, SummarizerAgent,
};
use std::io::BufRead;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let mut trace = false;
    let mut queries = Vec::new();

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            "-V" | "--version" => {
                println!("research-agents {}", research_agents::VERSION);
                return Ok(());
            }
            "--trace" => trace = true,
            _ => queries.push(arg),
        }
    }

    // Load configuration
    let settings = config::load()?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting research-agents v{}", research_agents::VERSION);

    if queries.is_empty() {
        queries = read_queries()?;
    }
    if queries.is_empty() {
        print_usage();
        return Ok(());
    }

    let memory = Arc::new(MemoryLog::new());
    let log = activity_log(&settings, trace, &memory);

    let pipeline = build_pipeline(&settings, log)?;
    let report = pipeline.run(&queries).await;
    info!(
        "Collected {} results for {} queries in {} ms",
        report.result_count(),
        report.queries.len(),
        report.elapsed_ms
    );

    println!("{}", serde_json::to_string_pretty(&report)?);

    if trace {
        println!("{}", serde_json::to_string_pretty(&memory.entries())?);
    }

    Ok(())
}

/// Wire the agents from settings
fn build_pipeline(settings: &Settings, log: SharedActionLog) -> Result<ResearchPipeline> {
    let client = HttpClient::with_settings(&settings.outgoing)?;
    let provider = provider::from_settings(client, &settings.search)?;
    info!("Using search provider: {}", provider.name());

    let search = SearchAgent::from_settings(provider, &settings.search, log.clone());
    let summarizer = SummarizerAgent::new().with_log(log);

    Ok(ResearchPipeline::new(search, summarizer))
}

/// Pick the activity sink; `--trace` always records into memory
fn activity_log(settings: &Settings, trace: bool, memory: &Arc<MemoryLog>) -> SharedActionLog {
    if trace {
        return memory.clone();
    }
    match settings.logging.activity_sink {
        ActivitySink::Tracing => Arc::new(TracingLog),
        ActivitySink::Memory => memory.clone(),
        ActivitySink::None => activity::noop(),
    }
}

/// One query per non-empty stdin line
fn read_queries() -> Result<Vec<String>> {
    let stdin = std::io::stdin();
    let mut queries = Vec::new();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            queries.push(line.to_string());
        }
    }
    Ok(queries)
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
research-agents v{}
Search the web and summarize the results

USAGE:
    research-agents [OPTIONS] [QUERY]...

Queries are read from stdin, one per line, when none are given.

OPTIONS:
    --trace                Print the recorded agent activity after the report
    -h, --help             Print help information
    -V, --version          Print version information

ENVIRONMENT VARIABLES:
    RESEARCH_SETTINGS_PATH  Path to research.yml
    RESEARCH_MAX_RESULTS    Results per query
    RESEARCH_PACING_MS      Delay after each result, in milliseconds
    RESEARCH_BASE_URL       Search provider endpoint
    RESEARCH_LOG_LEVEL      Log filter (overridden by RUST_LOG)
"#,
        research_agents::VERSION
    );
}
