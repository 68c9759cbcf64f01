use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

use crate::config::ScrapeConfig;
use crate::error::{Result, ScrapeError};

/// Anything that can hand back the HTML of a page.
pub trait PageSource {
    fn fetch(&self, url: &Url) -> Result<String>;
}

/// Blocking HTTP client carrying the configured user agent and timeout.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()?;
        Ok(Self { client })
    }
}

impl PageSource for HttpSource {
    fn fetch(&self, url: &Url) -> Result<String> {
        let transport = |reason: String| ScrapeError::Transport {
            url: url.to_string(),
            reason,
        };

        let resp = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(transport(format!("status {}", status)));
        }
        let body = resp.text().map_err(|e| transport(e.to_string()))?;
        debug!(%url, bytes = body.len(), "page downloaded");
        Ok(body)
    }
}
