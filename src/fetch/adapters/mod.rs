// src/fetch/adapters/mod.rs
pub mod gnews_api;
pub mod google_rss;
