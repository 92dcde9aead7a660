// src/fetch/types.rs
use anyhow::Result;

pub const DEFAULT_LOOKBACK_HOURS: u32 = 48;
pub const DEFAULT_MAX_ARTICLES: usize = 10;

/// One curated news story, immutable once constructed.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct Article {
    /// Display and dedup key; never empty.
    pub title: String,
    /// Absolute URL; canonical identity key.
    pub url: String,
    /// Originating outlet, `"Unknown"` when the source omits it.
    pub source: String,
    /// Source-provided date text, kept verbatim (not required to parse).
    pub published: String,
    /// Short summary; falls back to the title when the source has none.
    pub content: String,
}

/// One news section to curate: a search query plus its freshness window
/// and output cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub query: String,
    pub lookback_hours: u32,
    pub max_articles: usize,
}

impl Topic {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            lookback_hours: DEFAULT_LOOKBACK_HOURS,
            max_articles: DEFAULT_MAX_ARTICLES,
        }
    }

    pub fn with_lookback_hours(mut self, hours: u32) -> Self {
        self.lookback_hours = hours;
        self
    }

    pub fn with_max_articles(mut self, max: usize) -> Self {
        self.max_articles = max;
        self
    }
}

/// A source of raw candidates for a topic. Implementations normalize into
/// the common `Article` shape; the pipeline depends only on this trait.
#[async_trait::async_trait]
pub trait SourceAdapter: Send + Sync {
    async fn fetch_candidates(&self, topic: &Topic) -> Result<Vec<Article>>;
    fn name(&self) -> &'static str;
}
