// src/fetch/adapters/gnews_api.rs
//! Fallback source: the GNews keyword-search REST API.
//!
//! Recency is enforced server-side through the `from` parameter, so no
//! client-side re-check happens here. A missing API key and a missing
//! `articles` field both degrade to zero results rather than errors.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Duration, SecondsFormat, Utc};
use metrics::counter;
use serde::Deserialize;

use crate::fetch::normalize_text;
use crate::fetch::types::{Article, SourceAdapter, Topic};

const GNEWS_SEARCH: &str = "https://gnews.io/api/v4/search";

pub const API_KEY_ENV: &str = "GNEWS_API_KEY";

#[derive(Debug, Deserialize)]
struct GnewsResponse {
    #[serde(default)]
    articles: Vec<GnewsArticle>,
}

#[derive(Debug, Deserialize)]
struct GnewsArticle {
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    source: Option<GnewsSource>,
}

#[derive(Debug, Deserialize)]
struct GnewsSource {
    name: Option<String>,
}

pub struct GnewsApiAdapter {
    endpoint: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl GnewsApiAdapter {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            endpoint: GNEWS_SEARCH.to_string(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Key from `GNEWS_API_KEY`; a missing key is tolerated and reported at
    /// fetch time.
    pub fn from_env() -> Self {
        Self::new(std::env::var(API_KEY_ENV).ok())
    }

    /// Point at a different endpoint (tests use a local mock server).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

fn to_articles(resp: GnewsResponse) -> Vec<Article> {
    let mut out = Vec::with_capacity(resp.articles.len());
    for a in resp.articles {
        let title = match a.title.as_deref().map(normalize_text) {
            Some(t) if !t.is_empty() => t,
            _ => continue,
        };
        let url = match a.url {
            Some(u) if !u.trim().is_empty() => u.trim().to_string(),
            _ => continue,
        };
        let source = a
            .source
            .and_then(|s| s.name)
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Unknown".to_string());
        let content = a
            .description
            .as_deref()
            .map(normalize_text)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| title.clone());

        out.push(Article {
            title,
            url,
            source,
            published: a.published_at.unwrap_or_default(),
            content,
        });
    }
    out
}

#[async_trait]
impl SourceAdapter for GnewsApiAdapter {
    async fn fetch_candidates(&self, topic: &Topic) -> Result<Vec<Article>> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!(
                env = API_KEY_ENV,
                "no GNews API key configured; keyword search yields no results"
            );
            return Ok(Vec::new());
        };

        let from = (Utc::now() - Duration::hours(i64::from(topic.lookback_hours)))
            .to_rfc3339_opts(SecondsFormat::Secs, true);
        let max = topic.max_articles.to_string();

        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", topic.query.as_str()),
                ("lang", "en"),
                ("country", "us"),
                ("max", max.as_str()),
                ("apikey", api_key),
                ("from", from.as_str()),
                ("sortby", "publishedAt"),
            ])
            .send()
            .await
            .context("gnews http get()")?;

        let body: GnewsResponse = resp
            .error_for_status()
            .context("gnews http status")?
            .json()
            .await
            .context("decoding gnews json")?;

        let articles = to_articles(body);
        counter!("fetch_entries_total").increment(articles.len() as u64);
        Ok(articles)
    }

    fn name(&self) -> &'static str {
        "GNewsAPI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_articles_field_means_zero_results() {
        let resp: GnewsResponse = serde_json::from_str("{}").unwrap();
        assert!(to_articles(resp).is_empty());
    }

    #[test]
    fn malformed_entries_get_defaults_or_are_skipped() {
        let resp: GnewsResponse = serde_json::from_str(
            r#"{
                "articles": [
                    {"title": "Kept", "url": "https://example.com/a"},
                    {"title": "No URL here"},
                    {"url": "https://example.com/untitled"}
                ]
            }"#,
        )
        .unwrap();
        let out = to_articles(resp);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].source, "Unknown");
        assert_eq!(out[0].content, "Kept");
    }
}
