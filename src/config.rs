// src/config.rs
//! Topics configuration. Supports TOML or JSON formats.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::fetch::types::{Topic, DEFAULT_LOOKBACK_HOURS, DEFAULT_MAX_ARTICLES};

const ENV_PATH: &str = "RADAR_TOPICS_PATH";

#[derive(Debug, Deserialize)]
struct TopicsFile {
    topics: Vec<TopicEntry>,
}

#[derive(Debug, Deserialize)]
struct TopicEntry {
    name: String,
    lookback_hours: Option<u32>,
    max_articles: Option<usize>,
}

impl TopicEntry {
    fn into_topic(self) -> Topic {
        Topic {
            query: self.name,
            lookback_hours: self.lookback_hours.unwrap_or(DEFAULT_LOOKBACK_HOURS),
            max_articles: self.max_articles.unwrap_or(DEFAULT_MAX_ARTICLES),
        }
    }
}

/// Load topics from an explicit path.
pub fn load_topics_from(path: &Path) -> Result<Vec<Topic>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading topics from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_topics(&content, ext.as_str())
}

/// Load topics using env var + fallbacks:
/// 1) $RADAR_TOPICS_PATH
/// 2) config/topics.toml
/// 3) config/topics.json
pub fn load_topics_default() -> Result<Vec<Topic>> {
    if let Ok(p) = std::env::var(ENV_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_topics_from(&pb);
        } else {
            return Err(anyhow!("RADAR_TOPICS_PATH points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/topics.toml");
    if toml_p.exists() {
        return load_topics_from(&toml_p);
    }
    let json_p = PathBuf::from("config/topics.json");
    if json_p.exists() {
        return load_topics_from(&json_p);
    }
    Ok(Vec::new())
}

fn parse_topics(s: &str, hint_ext: &str) -> Result<Vec<Topic>> {
    let try_toml = hint_ext == "toml" || s.contains("[[topics]]");
    if try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    if let Ok(v) = parse_json(s) {
        return Ok(v);
    }
    if !try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    Err(anyhow!("unsupported topics format"))
}

fn parse_toml(s: &str) -> Result<Vec<Topic>> {
    let f: TopicsFile = toml::from_str(s)?;
    Ok(clean_list(f.topics))
}

fn parse_json(s: &str) -> Result<Vec<Topic>> {
    let f: TopicsFile = serde_json::from_str(s)?;
    Ok(clean_list(f.topics))
}

fn clean_list(entries: Vec<TopicEntry>) -> Vec<Topic> {
    entries
        .into_iter()
        .filter(|e| !e.name.trim().is_empty())
        .map(|mut e| {
            e.name = e.name.trim().to_string();
            e.into_topic()
        })
        .collect()
}
