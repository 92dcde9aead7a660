// src/linkcheck.rs
//! Reachability probes for candidate article links.
//!
//! A probe confirms that a URL still resolves; it never fetches content for
//! use. HEAD with a browser User-Agent first (some outlets bot-block default
//! client strings), GET once if the server answers 405, 200 means reachable.
//! Everything else, including timeouts and transport errors, means
//! unreachable; probe failures are logged and never propagated.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

/// Hard per-probe timeout, independent of any orchestration deadline.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Realistic browser UA so reachable pages are not misclassified by
/// bot-blocking.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

/// Seam between the fetch pipeline and the network, so tests can substitute
/// a canned probe.
#[async_trait]
pub trait LinkProbe: Send + Sync {
    async fn is_reachable(&self, url: &str) -> bool;
}

/// Production probe backed by `reqwest` (redirects followed by default).
pub struct HttpLinkVerifier {
    client: reqwest::Client,
}

impl HttpLinkVerifier {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(PROBE_TIMEOUT)
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client }
    }
}

impl Default for HttpLinkVerifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkProbe for HttpLinkVerifier {
    async fn is_reachable(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(resp) if resp.status() == StatusCode::OK => true,
            Ok(resp) if resp.status() == StatusCode::METHOD_NOT_ALLOWED => {
                // Server rejects header-only probes; one full GET, same budget.
                match self.client.get(url).send().await {
                    Ok(resp) => resp.status() == StatusCode::OK,
                    Err(e) => {
                        tracing::debug!(error = ?e, url, "GET fallback probe failed");
                        false
                    }
                }
            }
            Ok(resp) => {
                tracing::debug!(status = %resp.status(), url, "link probe rejected");
                false
            }
            Err(e) => {
                tracing::debug!(error = ?e, url, "link probe failed");
                false
            }
        }
    }
}
