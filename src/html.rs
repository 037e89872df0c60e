use scraper::{ElementRef, Selector};
use url::Url;

use crate::error::{Result, ScrapeError};

pub fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector(format!("{}: {:?}", css, e)))
}

/// All descendant text nodes, each trimmed, empty ones dropped, joined with single spaces.
pub fn joined_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| ScrapeError::InvalidUrl(format!("{}: {}", raw, e)))
}

/// Resolve `href` the way a browser would from a page at `base`.
pub fn resolve_url(base: &Url, href: &str) -> Result<String> {
    base.join(href.trim())
        .map(String::from)
        .map_err(|e| ScrapeError::InvalidUrl(format!("{}: {}", href, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_joined_text_normalizes_whitespace() {
        let doc = Html::parse_fragment(
            "<div>\n  Annonce <b> / </b>\n\n Dakar <i>Plateau</i> </div>",
        );
        let div = parse_selector("div").unwrap();
        let element = doc.select(&div).next().unwrap();
        assert_eq!(joined_text(element), "Annonce / Dakar Plateau");
    }

    #[test]
    fn test_resolve_against_origin() {
        let origin = parse_url("https://example.test/").unwrap();
        assert_eq!(
            resolve_url(&origin, "images/ad123.jpg").unwrap(),
            "https://example.test/images/ad123.jpg"
        );
        assert_eq!(
            resolve_url(&origin, "/images/ad123.jpg").unwrap(),
            "https://example.test/images/ad123.jpg"
        );
        assert_eq!(
            resolve_url(&origin, "https://cdn.test/x.jpg").unwrap(),
            "https://cdn.test/x.jpg"
        );
    }

    #[test]
    fn test_resolve_against_listing_page() {
        let page_url = "https://dakarvente.com/index.php?page=annonces_categorie&id=3&sort=&nb=1";
        let page = parse_url(page_url).unwrap();
        assert_eq!(
            resolve_url(&page, "?page=annonce&id=5").unwrap(),
            "https://dakarvente.com/index.php?page=annonce&id=5"
        );
        assert_eq!(
            resolve_url(&page, "annonce-5.html").unwrap(),
            "https://dakarvente.com/annonce-5.html"
        );
    }

    #[test]
    fn test_bad_url() {
        assert!(matches!(parse_url("not a url").unwrap_err(), ScrapeError::InvalidUrl(_)));
    }

    #[test]
    fn test_bad_selector() {
        assert!(matches!(parse_selector("div[[").unwrap_err(), ScrapeError::Selector(_)));
    }
}
