use scraper::Html;
use tracing::warn;

use crate::config::Selectors;
use crate::error::Result;
use crate::html::parse_selector;

/// Detail-page links of every listing card on a listing page, in page order.
///
/// A card without a linked anchor is skipped and logged. A page with no
/// cards yields an empty list; that looks the same as a markup change.
/// Only an invalid selector is an error.
pub fn parse_listing_page(html: &str, selectors: &Selectors) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let card_selector = parse_selector(&selectors.listing_card)?;
    let link_selector = parse_selector(&selectors.card_link)?;

    let mut links = Vec::new();

    for (index, card) in document.select(&card_selector).enumerate() {
        let href = card
            .select(&link_selector)
            .next()
            .and_then(|anchor| anchor.value().attr("href"));

        match href {
            Some(href) if !href.trim().is_empty() => links.push(href.trim().to_string()),
            _ => warn!(card = index, "listing card has no detail link, skipping"),
        }
    }

    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: &str = "item-inner mv-effect-translate-1 mv-box-shadow-gray-1";

    #[test]
    fn test_extracts_first_anchor_per_card() {
        let html = format!(
            r#"<html><body>
            <div class="{CARD}">
                <a href="https://dakarvente.com/annonce-1">One</a><a href="/other">x</a>
            </div>
            <div class="{CARD}"><span>no link here</span></div>
            <div class="{CARD}"><a href="https://dakarvente.com/annonce-2">Two</a></div>
            <div class="item-inner"><a href="https://dakarvente.com/not-a-card">no</a></div>
            </body></html>"#
        );

        let links = parse_listing_page(&html, &Selectors::default()).unwrap();
        assert_eq!(
            links,
            vec![
                "https://dakarvente.com/annonce-1",
                "https://dakarvente.com/annonce-2"
            ]
        );
    }

    #[test]
    fn test_anchor_without_href_is_skipped() {
        let html = format!(r#"<div class="{CARD}"><a name="top">x</a></div>"#);
        assert!(parse_listing_page(&html, &Selectors::default()).unwrap().is_empty());
    }

    #[test]
    fn test_no_cards_is_empty_not_error() {
        let html = "<html><body><p>nothing</p></body></html>";
        let links = parse_listing_page(html, &Selectors::default()).unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn test_custom_card_selector() {
        let selectors = Selectors {
            listing_card: "li.ad".to_string(),
            ..Selectors::default()
        };
        let html = r#"<ul><li class="ad"><a href="/ad/9">nine</a></li></ul>"#;
        assert_eq!(parse_listing_page(html, &selectors).unwrap(), vec!["/ad/9"]);
    }
}
