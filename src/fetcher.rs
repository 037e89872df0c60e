use reqwest::blocking::Client;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

use crate::config::ScraperConfig;
use crate::error::{Result, ScrapeError};

/// A successfully fetched page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub body: String,
}

/// Source of page bodies. One call is one outbound request; nothing is cached or retried.
pub trait Fetcher: Sync {
    /// Fetch `url`. Transport failures and non-2xx statuses are errors.
    fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

/// Blocking HTTP fetcher over a shared reqwest client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ScrapeError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedPage> {
        debug!(url, "GET");

        let response = self.client.get(url).send().map_err(|e| ScrapeError::Network {
            url: url.to_string(),
            source: e,
        })?;

        let status = response.status();
        let final_url = response.url().to_string();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|e| ScrapeError::Network {
            url: url.to_string(),
            source: e,
        })?;

        Ok(FetchedPage {
            url: final_url,
            status: status.as_u16(),
            body,
        })
    }
}

/// In-memory fetcher serving canned bodies. Unknown URLs answer 404.
///
/// Every requested URL is recorded, in request order.
#[derive(Default)]
pub struct MemoryFetcher {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.insert(url, body);
        self
    }

    pub fn insert(&mut self, url: impl Into<String>, body: impl Into<String>) {
        self.pages.insert(url.into(), body.into());
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests().iter().filter(|u| u.as_str() == url).count()
    }
}

impl Fetcher for MemoryFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedPage> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(url.to_string());
        }

        match self.pages.get(url) {
            Some(body) => Ok(FetchedPage {
                url: url.to_string(),
                status: 200,
                body: body.clone(),
            }),
            None => Err(ScrapeError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
