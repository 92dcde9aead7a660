// src/fetch/adapters/google_rss.rs
//! Primary source: Google News RSS search.
//!
//! The search endpoint is not time-bounded, so recency filtering happens
//! client-side here. Entries without a parseable `pubDate` are kept; a
//! missing timestamp is not evidence of staleness.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use metrics::{counter, histogram};
use quick_xml::de::from_str;
use serde::Deserialize;

use crate::fetch::normalize_text;
use crate::fetch::types::{Article, SourceAdapter, Topic};

const GOOGLE_NEWS_RSS: &str = "https://news.google.com/rss/search";

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    description: Option<String>,
    source: Option<Source>,
}

/// `<source url="...">Outlet Name</source>`
#[derive(Debug, Deserialize)]
struct Source {
    #[serde(rename = "$text")]
    name: Option<String>,
}

pub struct GoogleNewsAdapter {
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http { client: reqwest::Client },
}

impl GoogleNewsAdapter {
    pub fn new() -> Self {
        Self {
            mode: Mode::Http {
                client: reqwest::Client::new(),
            },
        }
    }

    /// Parse canned feed XML instead of hitting the network.
    pub fn from_fixture(xml: &str) -> Self {
        Self {
            mode: Mode::Fixture(xml.to_string()),
        }
    }
}

impl Default for GoogleNewsAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a Google News RSS document into normalized articles, dropping
/// entries older than the topic's lookback window relative to `now`.
pub fn parse_feed(xml: &str, now: DateTime<Utc>, topic: &Topic) -> Result<Vec<Article>> {
    let t0 = std::time::Instant::now();

    let rss: Rss = from_str(xml).context("parsing google news rss xml")?;
    let cutoff = now - Duration::hours(i64::from(topic.lookback_hours));

    let mut out = Vec::with_capacity(rss.channel.item.len());
    for it in rss.channel.item {
        // Title and link are identity fields; entries without them are
        // unusable and skipped.
        let title = match it.title.as_deref().map(normalize_text) {
            Some(t) if !t.is_empty() => t,
            _ => continue,
        };
        let url = match it.link {
            Some(l) if !l.trim().is_empty() => l.trim().to_string(),
            _ => continue,
        };

        let published = it.pub_date.unwrap_or_default();
        if let Ok(dt) = DateTime::parse_from_rfc2822(&published) {
            if dt.with_timezone(&Utc) < cutoff {
                continue;
            }
        }

        let source = it
            .source
            .and_then(|s| s.name)
            .map(|n| normalize_text(&n))
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Unknown".to_string());

        let content = it
            .description
            .as_deref()
            .map(normalize_text)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| title.clone());

        out.push(Article {
            title,
            url,
            source,
            published,
            content,
        });
    }

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("fetch_parse_ms").record(ms);
    counter!("fetch_entries_total").increment(out.len() as u64);
    Ok(out)
}

#[async_trait]
impl SourceAdapter for GoogleNewsAdapter {
    async fn fetch_candidates(&self, topic: &Topic) -> Result<Vec<Article>> {
        match &self.mode {
            Mode::Fixture(xml) => parse_feed(xml, Utc::now(), topic),
            Mode::Http { client } => {
                let resp = client
                    .get(GOOGLE_NEWS_RSS)
                    .query(&[
                        ("q", topic.query.as_str()),
                        ("hl", "en-US"),
                        ("gl", "US"),
                        ("ceid", "US:en"),
                    ])
                    .send()
                    .await
                    .context("google news http get()")?;
                let body = resp
                    .error_for_status()
                    .context("google news http status")?
                    .text()
                    .await
                    .context("google news http .text()")?;
                parse_feed(&body, Utc::now(), topic)
            }
        }
    }

    fn name(&self) -> &'static str {
        "GoogleNewsRSS"
    }
}
