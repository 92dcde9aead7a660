// src/dedup.rs
//! Process-wide memory of accepted articles.
//!
//! `SeenSet` remembers every accepted URL and normalized title for the
//! lifetime of the process. The fetch pipeline consults it before paying for
//! a link probe and registers into it only after all checks pass, so dedup is
//! global across topics and adapters: first seen wins.
//!
//! The fuzzy check is a linear scan of all registered titles. At daily-batch
//! scale (tens to low hundreds of titles) that is fine; a shingled index
//! would only be worth it far above that, and would have to preserve the
//! same ratio semantics.

use std::collections::HashSet;

use crate::similarity::similarity;

/// Titles scoring above this against any registered title are duplicates.
pub const TITLE_SIMILARITY_THRESHOLD: f64 = 0.85;

#[derive(Debug, Default)]
pub struct SeenSet {
    urls: HashSet<String>,
    titles: HashSet<String>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the URL was already registered, the normalized title was
    /// already registered, or any registered title is a near-duplicate.
    pub fn is_duplicate(&self, title: &str, url: &str) -> bool {
        if self.urls.contains(url) {
            return true;
        }
        let norm = normalize_title(title);
        if self.titles.contains(&norm) {
            return true;
        }
        self.titles
            .iter()
            .any(|seen| similarity(&norm, seen) > TITLE_SIMILARITY_THRESHOLD)
    }

    /// Remember an accepted article. Idempotent: re-registering an existing
    /// pair is a no-op. Call exactly once per accepted article, after all
    /// validation passes.
    pub fn register(&mut self, title: &str, url: &str) {
        self.urls.insert(url.to_string());
        self.titles.insert(normalize_title(title));
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Forget everything; used for per-test and per-run isolation.
    pub fn clear(&mut self) {
        self.urls.clear();
        self.titles.clear();
    }
}

/// Lowercase and collapse whitespace so the exact-match set is not defeated
/// by casing or spacing differences between outlets.
fn normalize_title(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last_was_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push(' ');
                last_was_space = true;
            }
        } else {
            for lc in ch.to_lowercase() {
                out.push(lc);
            }
            last_was_space = false;
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_pair_is_duplicate_in_every_combination() {
        let mut seen = SeenSet::new();
        seen.register("Test Article 1", "http://example.com/1");

        assert!(seen.is_duplicate("Test Article 1", "http://example.com/1"));
        // same URL, different title
        assert!(seen.is_duplicate("Different Title", "http://example.com/1"));
        // same title, different URL
        assert!(seen.is_duplicate("Test Article 1", "http://different-url.com"));
        // both fresh
        assert!(!seen.is_duplicate("New Title", "http://new-url.com"));
    }

    #[test]
    fn title_match_ignores_case_and_spacing() {
        let mut seen = SeenSet::new();
        seen.register("Port Strike  Ends", "http://example.com/a");
        assert!(seen.is_duplicate("port strike ends", "http://example.com/b"));
    }

    #[test]
    fn fuzzy_rewrite_is_caught_and_distinct_story_is_not() {
        let mut seen = SeenSet::new();
        seen.register(
            "Global Trade Slows Down Due to Tariffs",
            "http://example.com/trade1",
        );

        assert!(seen.is_duplicate(
            "Global Trade Slows Down Because of Tariffs",
            "http://example.com/trade2"
        ));
        assert!(!seen.is_duplicate(
            "Tech Industry Booms in India",
            "http://example.com/tech1"
        ));
    }

    #[test]
    fn register_is_idempotent() {
        let mut seen = SeenSet::new();
        seen.register("A Title", "http://example.com/1");
        seen.register("A Title", "http://example.com/1");
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut seen = SeenSet::new();
        seen.register("A Title", "http://example.com/1");
        seen.clear();
        assert!(seen.is_empty());
        assert!(!seen.is_duplicate("A Title", "http://example.com/1"));
    }
}
