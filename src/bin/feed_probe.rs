//! Diagnostic probe: run the full curation pipeline against Google News for
//! each configured topic and print what survives. Useful when a section
//! comes back empty and you want to see where candidates are being dropped
//! (raise RUST_LOG=debug for per-entry decisions).

use logistics_radar::fetch::adapters::google_rss::GoogleNewsAdapter;
use logistics_radar::{FetchPipeline, Topic};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let topics = match logistics_radar::config::load_topics_default() {
        Ok(v) if !v.is_empty() => v,
        Ok(_) => {
            tracing::warn!("no topics configured; probing a sample query");
            vec![Topic::new(
                "Red Sea shipping OR Suez Canal blockage OR Panama Canal drought",
            )]
        }
        Err(e) => {
            tracing::error!(error = ?e, "failed to load topics config");
            return;
        }
    };

    let pipeline = FetchPipeline::new();
    let adapter = GoogleNewsAdapter::new();

    for topic in &topics {
        println!("== {} ==", topic.query);
        let articles = pipeline.fetch_topic(&adapter, topic).await;
        if articles.is_empty() {
            println!("   (no results)");
            continue;
        }
        for a in &articles {
            println!("   [{}] {}", a.source, a.title);
            println!("   {} ({})", a.url, a.published);
        }
        println!("   kept {} article(s)", articles.len());
    }

    println!("feed-probe done");
}
