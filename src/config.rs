//! Scraper configuration.
//!
//! Every selector that couples us to the site's markup lives here, so a
//! markup change is a one-line edit.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::{Result, ScrapeError};

pub const SITE_ORIGIN: &str = "https://dakarvente.com/";
pub const PAGE_PARAM: &str = "nb";
pub const CURRENCY_TOKEN: &str = "FCFA";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub const LISTING_CARD_SELECTOR: &str = "div.item-inner.mv-effect-translate-1.mv-box-shadow-gray-1";
pub const CARD_LINK_SELECTOR: &str = "a";
pub const BRAND_SELECTOR: &str = "a.mv-overflow-ellipsis";
pub const PRICE_SELECTOR: &str = "span.new-price";
pub const ADDRESS_SELECTOR: &str = "div.block-27-desc";
pub const IMAGE_SLIDE_SELECTOR: &str = "div.slick-slide-inner.mv-box-shadow-gray-2";
pub const IMAGE_SELECTOR: &str = "img";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selectors {
    pub listing_card: String,
    pub card_link: String,
    pub brand: String,
    pub price: String,
    pub address: String,
    pub image_slide: String,
    pub image: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            listing_card: LISTING_CARD_SELECTOR.to_string(),
            card_link: CARD_LINK_SELECTOR.to_string(),
            brand: BRAND_SELECTOR.to_string(),
            price: PRICE_SELECTOR.to_string(),
            address: ADDRESS_SELECTOR.to_string(),
            image_slide: IMAGE_SLIDE_SELECTOR.to_string(),
            image: IMAGE_SELECTOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Base URL that relative image paths are resolved against.
    pub site_origin: String,
    /// Query parameter carrying the 1-based page index.
    pub page_param: String,
    pub currency_token: String,
    pub user_agent: String,
    /// `None` leaves requests without a timeout.
    pub request_timeout_secs: Option<u64>,
    /// Detail pages fetched at once per listing page; 1 is sequential.
    pub detail_concurrency: usize,
    pub selectors: Selectors,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            site_origin: SITE_ORIGIN.to_string(),
            page_param: PAGE_PARAM.to_string(),
            currency_token: CURRENCY_TOKEN.to_string(),
            user_agent: USER_AGENT.to_string(),
            request_timeout_secs: None,
            detail_concurrency: 1,
            selectors: Selectors::default(),
        }
    }
}

impl ScraperConfig {
    /// Defaults overridden by environment variables (a `.env` file is loaded first).
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(origin) = lookup("SITE_ORIGIN") {
            config.site_origin = origin;
        }
        if let Some(param) = lookup("PAGE_PARAM") {
            config.page_param = param;
        }
        if let Some(agent) = lookup("USER_AGENT") {
            config.user_agent = agent;
        }
        if let Some(raw) = lookup("REQUEST_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                ScrapeError::Config(format!("REQUEST_TIMEOUT_SECS is not a number: {:?}", raw))
            })?;
            config.request_timeout_secs = Some(secs);
        }
        if let Some(raw) = lookup("DETAIL_CONCURRENCY") {
            config.detail_concurrency = raw.trim().parse::<usize>().map_err(|_| {
                ScrapeError::Config(format!("DETAIL_CONCURRENCY is not a number: {:?}", raw))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.detail_concurrency == 0 {
            return Err(ScrapeError::Config(
                "detail_concurrency must be at least 1".to_string(),
            ));
        }
        if Url::parse(&self.site_origin).is_err() {
            return Err(ScrapeError::Config(format!(
                "site_origin is not an absolute URL: {:?}",
                self.site_origin
            )));
        }
        if self.page_param.trim().is_empty() {
            return Err(ScrapeError::Config("page_param must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
