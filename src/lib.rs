pub mod config;
pub mod detail;
pub mod error;
pub mod export;
pub mod fetcher;
pub mod html;
pub mod listing;
pub mod models;
pub mod progress;
pub mod scraper;
pub mod summary;
pub mod utils;

// Re-export main types
pub use config::{ScraperConfig, Selectors};
pub use error::{ExtractionError, ScrapeError};
pub use fetcher::{FetchedPage, Fetcher, HttpFetcher, MemoryFetcher};
pub use models::{Category, ListingRecord, ScrapeRun, DEFAULT_PAGE_COUNT};
pub use progress::{LogProgress, NullProgress, Progress};
pub use scraper::ListingScraper;
