use chrono::Utc;
use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::{debug, info, warn};

use crate::config::ScraperConfig;
use crate::detail;
use crate::error::{Result, ScrapeError};
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::html::{parse_url, resolve_url};
use crate::listing::parse_listing_page;
use crate::models::{ListingRecord, ScrapeRun};
use crate::progress::Progress;

/// Two-level scraper: listing pages 1..=N, then every card's detail page.
///
/// Failures are isolated per listing. A failed listing page contributes
/// nothing and the run moves on; only a bad page count or base URL aborts.
pub struct ListingScraper<F: Fetcher> {
    fetcher: F,
    config: ScraperConfig,
}

impl ListingScraper<HttpFetcher> {
    /// Create a scraper over a real HTTP client
    pub fn new(config: ScraperConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self { fetcher, config })
    }
}

impl<F: Fetcher> ListingScraper<F> {
    pub fn with_fetcher(fetcher: F, config: ScraperConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// `{base_url}&{page_param}={page_index}`
    pub fn page_url(&self, base_url: &str, page_index: usize) -> Result<String> {
        parse_url(base_url)?;
        if page_index == 0 {
            return Err(ScrapeError::InvalidPageCount(page_index));
        }
        Ok(format!("{}&{}={}", base_url, self.config.page_param, page_index))
    }

    /// Fetch one listing page and return its detail links, resolved
    /// against the page they were found on.
    pub fn scrape_page(&self, page_url: &str) -> Result<Vec<String>> {
        let page = self.fetcher.fetch(page_url)?;
        let base = parse_url(&page.url)?;
        let links = parse_listing_page(&page.body, &self.config.selectors)?;

        Ok(links
            .iter()
            .filter_map(|href| match resolve_url(&base, href) {
                Ok(url) => Some(url),
                Err(e) => {
                    warn!(href = %href, error = %e, "Unresolvable detail link, skipping");
                    None
                }
            })
            .collect())
    }

    /// Fetch one detail page and extract its record.
    pub fn scrape_detail(&self, url: &str) -> Result<ListingRecord> {
        let page = self.fetcher.fetch(url)?;
        detail::extract(&page.body, &self.config)
    }

    /// Scrape pages `1..=page_count` of `base_url`, in order.
    pub fn scrape(
        &self,
        base_url: &str,
        page_count: usize,
        progress: &mut dyn Progress,
    ) -> Result<Vec<ListingRecord>> {
        if page_count == 0 {
            return Err(ScrapeError::InvalidPageCount(page_count));
        }
        let page_urls = (1..=page_count)
            .map(|page| self.page_url(base_url, page))
            .collect::<Result<Vec<_>>>()?;

        let pool = self.detail_pool();
        let mut records = Vec::new();

        progress.begin(page_count);

        for (index, page_url) in page_urls.iter().enumerate() {
            let page = index + 1;
            info!(page, url = %page_url, "Scraping listing page");

            match self.scrape_page(page_url) {
                Ok(links) => {
                    debug!(page, count = links.len(), "Found detail links");

                    for (link, result) in self.scrape_details(&links, pool.as_ref()) {
                        match result {
                            Ok(record) => records.push(record),
                            Err(e) => progress.listing_skipped(page, &link, &e),
                        }
                    }
                }
                Err(e) => {
                    warn!(page, error = %e, "Listing page failed");
                    progress.listing_skipped(page, page_url, &e);
                }
            }

            progress.page_done(page, page_count);
        }

        progress.finish(records.len());
        Ok(records)
    }

    /// [`scrape`](Self::scrape) wrapped with its source and timing.
    pub fn scrape_run(
        &self,
        base_url: &str,
        page_count: usize,
        progress: &mut dyn Progress,
    ) -> Result<ScrapeRun> {
        let started_at = Utc::now();
        let records = self.scrape(base_url, page_count, progress)?;

        Ok(ScrapeRun {
            source_url: base_url.to_string(),
            pages_requested: page_count,
            records,
            started_at,
            finished_at: Utc::now(),
        })
    }

    fn detail_pool(&self) -> Option<ThreadPool> {
        if self.config.detail_concurrency <= 1 {
            return None;
        }

        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.detail_concurrency)
            .build()
        {
            Ok(pool) => Some(pool),
            Err(e) => {
                warn!(error = %e, "Could not start detail pool, fetching sequentially");
                None
            }
        }
    }

    /// Results come back in card order whichever way they were fetched.
    fn scrape_details(
        &self,
        links: &[String],
        pool: Option<&ThreadPool>,
    ) -> Vec<(String, Result<ListingRecord>)> {
        match pool {
            Some(pool) if links.len() > 1 => pool.install(|| {
                links
                    .par_iter()
                    .map(|link| (link.clone(), self.scrape_detail(link)))
                    .collect()
            }),
            _ => links
                .iter()
                .map(|link| (link.clone(), self.scrape_detail(link)))
                .collect(),
        }
    }
}
