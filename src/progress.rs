use tracing::{info, warn};

use crate::error::ScrapeError;

/// Observer for a running scrape. Frontends implement it to surface status;
/// it never changes control flow.
pub trait Progress {
    /// Called once with the number of listing pages that will be fetched.
    fn begin(&mut self, _total_pages: usize) {}

    /// Called after every page, including pages whose fetch failed.
    fn page_done(&mut self, _completed: usize, _total: usize) {}

    /// A listing (or a whole page when `url` is the page URL) was dropped.
    fn listing_skipped(&mut self, _page: usize, _url: &str, _error: &ScrapeError) {}

    /// Called at the end with the number of records kept.
    fn finish(&mut self, _records: usize) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Forwards progress to `tracing`.
#[derive(Default)]
pub struct LogProgress {
    skipped: usize,
}

impl LogProgress {
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl Progress for LogProgress {
    fn begin(&mut self, total_pages: usize) {
        info!(total_pages, "Scraping started");
    }

    fn page_done(&mut self, completed: usize, total: usize) {
        info!(completed, total, "Page done");
    }

    fn listing_skipped(&mut self, page: usize, url: &str, error: &ScrapeError) {
        self.skipped += 1;
        warn!(page, url, error = %error, "Skipped listing");
    }

    fn finish(&mut self, records: usize) {
        info!(records, skipped = self.skipped, "Scraping finished");
    }
}
