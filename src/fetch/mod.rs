// src/fetch/mod.rs
pub mod adapters;
pub mod types;

use std::sync::{Arc, Mutex};

use metrics::{counter, describe_counter, describe_histogram};
use once_cell::sync::OnceCell;

use crate::dedup::SeenSet;
use crate::fetch::types::{Article, SourceAdapter, Topic};
use crate::linkcheck::{HttpLinkVerifier, LinkProbe};

/// One-time metrics registration (so series show up when a recorder is
/// installed by the host).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "fetch_candidates_total",
            "Raw candidate entries produced by source adapters."
        );
        describe_counter!("fetch_kept_total", "Articles accepted into topic output.");
        describe_counter!(
            "fetch_dedup_total",
            "Candidates dropped as exact or fuzzy duplicates."
        );
        describe_counter!(
            "fetch_unreachable_total",
            "Candidates dropped because the link probe failed."
        );
        describe_counter!(
            "fetch_source_errors_total",
            "Adapter fetch/parse errors (degraded to zero results)."
        );
        describe_counter!(
            "fetch_entries_total",
            "Entries parsed and normalized by source adapters."
        );
        describe_histogram!("fetch_parse_ms", "Adapter parse time in milliseconds.");
    });
}

/// Normalize feed-provided text: decode HTML entities, strip tags, collapse
/// whitespace, cap length.
pub fn normalize_text(s: &str) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, " ").to_string();

    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").trim().to_string();

    // Summaries only need to be short teaser text.
    if out.chars().count() > 1500 {
        out = out.chars().take(1500).collect();
    }

    out
}

/// Per-topic fetch pipeline: adapter -> dedup -> link probe -> cap.
///
/// Holds the process-wide `SeenSet` so dedup is global across topics; the
/// topic processed first wins a contested story.
pub struct FetchPipeline {
    seen: Arc<Mutex<SeenSet>>,
    probe: Arc<dyn LinkProbe>,
}

impl FetchPipeline {
    pub fn new() -> Self {
        Self::with_probe(HttpLinkVerifier::new())
    }

    /// Substitute the link probe (tests use a canned one).
    pub fn with_probe(probe: impl LinkProbe + 'static) -> Self {
        ensure_metrics_described();
        Self {
            seen: Arc::new(Mutex::new(SeenSet::new())),
            probe: Arc::new(probe),
        }
    }

    /// Shared handle to the registry, e.g. for inspection or reset between
    /// runs.
    pub fn seen(&self) -> Arc<Mutex<SeenSet>> {
        Arc::clone(&self.seen)
    }

    /// Curate one topic. Zero qualifying articles is a valid result, not an
    /// error: adapter failures are logged and degrade to an empty list.
    pub async fn fetch_topic(&self, adapter: &dyn SourceAdapter, topic: &Topic) -> Vec<Article> {
        let candidates = match adapter.fetch_candidates(topic).await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(
                    error = ?e,
                    adapter = adapter.name(),
                    topic = %topic.query,
                    "source fetch failed"
                );
                counter!("fetch_source_errors_total").increment(1);
                return Vec::new();
            }
        };
        counter!("fetch_candidates_total").increment(candidates.len() as u64);

        if candidates.is_empty() {
            tracing::warn!(topic = %topic.query, adapter = adapter.name(), "no entries found");
            return Vec::new();
        }

        let mut out = Vec::new();
        for article in candidates {
            // Duplicate check before the probe: no network spend on a
            // candidate that would be discarded anyway.
            {
                let seen = self.seen.lock().unwrap_or_else(|e| e.into_inner());
                if seen.is_duplicate(&article.title, &article.url) {
                    counter!("fetch_dedup_total").increment(1);
                    tracing::debug!(title = %article.title, "dropped duplicate");
                    continue;
                }
            }

            if !self.probe.is_reachable(&article.url).await {
                counter!("fetch_unreachable_total").increment(1);
                tracing::debug!(url = %article.url, "dropped unreachable link");
                continue;
            }

            // Re-check and register in one critical section: a concurrent
            // topic may have claimed the story while the probe was in flight.
            {
                let mut seen = self.seen.lock().unwrap_or_else(|e| e.into_inner());
                if seen.is_duplicate(&article.title, &article.url) {
                    counter!("fetch_dedup_total").increment(1);
                    continue;
                }
                seen.register(&article.title, &article.url);
            }

            out.push(article);
            if out.len() >= topic.max_articles {
                break;
            }
        }

        counter!("fetch_kept_total").increment(out.len() as u64);
        tracing::info!(
            topic = %topic.query,
            adapter = adapter.name(),
            kept = out.len(),
            "topic fetch finished"
        );
        out
    }
}

impl Default for FetchPipeline {
    fn default() -> Self {
        Self::new()
    }
}
