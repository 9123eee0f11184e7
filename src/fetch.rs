use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use crate::config::Settings;

/// Anything that can hand back the HTML body of a URL.
#[async_trait]
pub trait PageSource {
    async fn fetch_html(&self, url: &str) -> Result<String>;
}

/// Live HTTP source. One client per run so cookies carry across pages.
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for Fetcher {
    async fn fetch_html(&self, url: &str) -> Result<String> {
        let start = Instant::now();
        let html = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .with_context(|| format!("Failed to fetch {}", url))?
            .text()
            .await
            .with_context(|| format!("Failed to read body of {}", url))?;
        debug!(
            url,
            bytes = html.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(html)
    }
}
