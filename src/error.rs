use thiserror::Error;

/// A required piece of a detail page was missing or malformed.
///
/// Always scoped to a single listing: the driver logs it, reports it to the
/// progress observer and moves on to the next card.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("no element for {field} (selector `{selector}`)")]
    MissingElement {
        field: &'static str,
        selector: String,
    },
    #[error("{field} element has no `{attribute}` attribute")]
    MissingAttribute {
        field: &'static str,
        attribute: &'static str,
    },
    #[error("address block has no second '/' segment: {text:?}")]
    MissingAddressSegment { text: String },
}

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("page count must be at least 1, got {0}")]
    InvalidPageCount(usize),
    #[error("invalid listing URL: {0}")]
    InvalidUrl(String),
    #[error("invalid CSS selector: {0}")]
    Selector(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScrapeError {
    /// True for transport failures and non-success HTTP statuses.
    pub fn is_network(&self) -> bool {
        matches!(self, ScrapeError::Network { .. } | ScrapeError::Status { .. })
    }

    pub fn is_extraction(&self) -> bool {
        matches!(self, ScrapeError::Extraction(_))
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
