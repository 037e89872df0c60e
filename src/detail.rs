//! Detail page extraction.
//!
//! Strict all-or-nothing per listing: a record is only produced when all
//! four fields were found. Any miss is an [`ExtractionError`] and the
//! listing is dropped by the caller.

use scraper::{ElementRef, Html, Selector};

use crate::config::ScraperConfig;
use crate::error::{ExtractionError, Result};
use crate::html::{joined_text, parse_selector, parse_url, resolve_url};
use crate::models::ListingRecord;

pub fn extract(html: &str, config: &ScraperConfig) -> Result<ListingRecord> {
    let document = Html::parse_document(html);
    let selectors = &config.selectors;

    let brand_sel = parse_selector(&selectors.brand)?;
    let price_sel = parse_selector(&selectors.price)?;
    let address_sel = parse_selector(&selectors.address)?;
    let slide_sel = parse_selector(&selectors.image_slide)?;
    let image_sel = parse_selector(&selectors.image)?;

    // Brand text is kept verbatim.
    let brand = find(&document, &brand_sel, "brand", &selectors.brand)?
        .text()
        .collect::<String>();

    let raw_price = find(&document, &price_sel, "price", &selectors.price)?
        .text()
        .collect::<String>();
    let price = normalize_price(&raw_price, &config.currency_token);

    let address_block = find(&document, &address_sel, "address", &selectors.address)?;
    let address = address_segment(&joined_text(address_block))?;

    let slide = find(&document, &slide_sel, "image", &selectors.image_slide)?;
    let src = slide
        .select(&image_sel)
        .next()
        .ok_or_else(|| ExtractionError::MissingElement {
            field: "image",
            selector: selectors.image.clone(),
        })?
        .value()
        .attr("src")
        .ok_or(ExtractionError::MissingAttribute {
            field: "image",
            attribute: "src",
        })?;
    let image_link = resolve_url(&parse_url(&config.site_origin)?, src)?;

    Ok(ListingRecord {
        brand,
        price,
        address,
        image_link,
    })
}

fn find<'a>(
    document: &'a Html,
    selector: &Selector,
    field: &'static str,
    css: &str,
) -> std::result::Result<ElementRef<'a>, ExtractionError> {
    document
        .select(selector)
        .next()
        .ok_or_else(|| ExtractionError::MissingElement {
            field,
            selector: css.to_string(),
        })
}

/// `"1.500.000 FCFA"` becomes `"1500000"`: thousands dots, the currency
/// token and all whitespace are removed. No numeric validation.
pub fn normalize_price(raw: &str, currency_token: &str) -> String {
    let without_dots = raw.trim().replace('.', "");
    let without_currency = if currency_token.is_empty() {
        without_dots
    } else {
        without_dots.replace(currency_token, "")
    };
    without_currency.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Second `/`-delimited segment of the address block, trimmed.
pub fn address_segment(text: &str) -> std::result::Result<String, ExtractionError> {
    text.split('/')
        .nth(1)
        .map(|segment| segment.trim().to_string())
        .ok_or_else(|| ExtractionError::MissingAddressSegment {
            text: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;

    fn detail_page(
        brand: Option<&str>,
        price: Option<&str>,
        address: Option<&str>,
        image: Option<&str>,
    ) -> String {
        let mut body = String::new();
        if let Some(b) = brand {
            body.push_str(&format!(r#"<a class="mv-overflow-ellipsis" href="/b">{}</a>"#, b));
        }
        if let Some(p) = price {
            body.push_str(&format!(r#"<span class="new-price">{}</span>"#, p));
        }
        if let Some(a) = address {
            body.push_str(&format!(r#"<div class="block-27-desc">{}</div>"#, a));
        }
        if let Some(src) = image {
            body.push_str(&format!(
                r#"<div class="slick-slide-inner mv-box-shadow-gray-2"><img src="{}"></div>"#,
                src
            ));
        }
        format!("<html><body>{}</body></html>", body)
    }

    fn config() -> ScraperConfig {
        ScraperConfig {
            site_origin: "https://example.test/".to_string(),
            ..ScraperConfig::default()
        }
    }

    #[test]
    fn test_extracts_full_record() {
        let html = detail_page(
            Some("Toyota Corolla"),
            Some("\n  1.250.000 FCFA  "),
            Some("<p>Annonce</p> / <p>Dakar Plateau</p> / <p>Vendeur</p>"),
            Some("images/ad123.jpg"),
        );

        let record = extract(&html, &config()).unwrap();
        assert_eq!(
            record,
            ListingRecord {
                brand: "Toyota Corolla".to_string(),
                price: "1250000".to_string(),
                address: "Dakar Plateau".to_string(),
                image_link: "https://example.test/images/ad123.jpg".to_string(),
            }
        );
    }

    #[test]
    fn test_each_missing_element_fails() {
        let cases = [
            detail_page(None, Some("1 FCFA"), Some("a / b"), Some("x.jpg")),
            detail_page(Some("B"), None, Some("a / b"), Some("x.jpg")),
            detail_page(Some("B"), Some("1 FCFA"), None, Some("x.jpg")),
            detail_page(Some("B"), Some("1 FCFA"), Some("a / b"), None),
            detail_page(Some("B"), Some("1 FCFA"), Some("no separator"), Some("x.jpg")),
        ];

        for html in cases {
            let err = extract(&html, &config()).unwrap_err();
            assert!(err.is_extraction(), "unexpected error: {}", err);
        }
    }

    #[test]
    fn test_brand_text_kept_verbatim() {
        let html = detail_page(Some(" Toyota "), Some("1 FCFA"), Some("a / b"), Some("x.jpg"));
        assert_eq!(extract(&html, &config()).unwrap().brand, " Toyota ");
    }

    #[test]
    fn test_address_without_separator_is_extraction_error() {
        let html = detail_page(Some("B"), Some("1 FCFA"), Some("<p>Dakar</p>"), Some("x.jpg"));
        match extract(&html, &config()) {
            Err(ScrapeError::Extraction(ExtractionError::MissingAddressSegment { text })) => {
                assert_eq!(text, "Dakar")
            }
            other => panic!("expected missing address segment, got {:?}", other),
        }
    }

    #[test]
    fn test_image_without_src_fails() {
        let html = r#"<div class="slick-slide-inner mv-box-shadow-gray-2"><img alt="x"></div>
            <a class="mv-overflow-ellipsis">B</a><span class="new-price">1</span>
            <div class="block-27-desc">a / b</div>"#;
        match extract(html, &config()) {
            Err(ScrapeError::Extraction(ExtractionError::MissingAttribute { attribute, .. })) => {
                assert_eq!(attribute, "src")
            }
            other => panic!("expected missing src, got {:?}", other),
        }
    }

    #[test]
    fn test_normalize_price() {
        assert_eq!(normalize_price("1.250.000 FCFA", "FCFA"), "1250000");
        assert_eq!(normalize_price("  1.500.000 FCFA\n", "FCFA"), "1500000");
        assert_eq!(normalize_price("1 500 000FCFA", "FCFA"), "1500000");
        assert_eq!(normalize_price("Prix a debattre", "FCFA"), "Prixadebattre");
    }

    #[test]
    fn test_address_segment() {
        assert_eq!(
            address_segment("Annonce / Dakar Plateau / Vendeur").unwrap(),
            "Dakar Plateau"
        );
        assert_eq!(address_segment("Annonce /").unwrap(), "");
        assert!(matches!(
            address_segment("Annonce sans separateur"),
            Err(ExtractionError::MissingAddressSegment { .. })
        ));
    }
}
