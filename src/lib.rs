// src/lib.rs
// Public library surface for the orchestration layer and integration tests.
//
// The engine curates topic-scoped news: source adapters pull candidates,
// the shared seen-set drops exact and fuzzy duplicates, and the link
// verifier drops dead links before anything reaches the caller.

pub mod config;
pub mod dedup;
pub mod fetch;
pub mod linkcheck;
pub mod similarity;

// ---- Re-exports for stable public API ----
pub use crate::dedup::{SeenSet, TITLE_SIMILARITY_THRESHOLD};
pub use crate::fetch::types::{Article, SourceAdapter, Topic};
pub use crate::fetch::FetchPipeline;
pub use crate::linkcheck::{HttpLinkVerifier, LinkProbe};
pub use crate::similarity::similarity;
