use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One normalized ad, built only when every field was extracted.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    #[serde(rename = "Brand")]
    pub brand: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Image link")]
    pub image_link: String,
}

/// Column headers in export order.
pub const RECORD_HEADERS: [&str; 4] = ["Brand", "Price", "Address", "Image link"];

/// Page count used when the caller does not pick one.
pub const DEFAULT_PAGE_COUNT: usize = 5;

/// The category listings published by the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Vehicules,
    Motos,
    Location,
    Telephones,
}

impl Category {
    pub fn all() -> [Category; 4] {
        [
            Category::Vehicules,
            Category::Motos,
            Category::Location,
            Category::Telephones,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Category::Vehicules => "Vehicules",
            Category::Motos => "Motos",
            Category::Location => "Location",
            Category::Telephones => "Telephones",
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<Category> {
        let wanted = name.trim().to_lowercase();
        Self::all()
            .into_iter()
            .find(|c| c.name().to_lowercase() == wanted)
    }

    /// Listing URL without the page parameter.
    pub fn base_url(&self) -> &'static str {
        match self {
            Category::Vehicules => "https://dakarvente.com/index.php?page=annonces_rubrique&url_categorie_2=vehicules&id=2&sort=",
            Category::Motos => "https://dakarvente.com/index.php?page=annonces_categorie&id=3&sort=",
            Category::Location => "https://dakarvente.com/index.php?page=annonces_categorie&id=8&sort=",
            Category::Telephones => "https://dakarvente.com/index.php?page=annonces_categorie&id=32&sort=",
        }
    }

    /// Last listing page known to exist for this category.
    pub fn last_page(&self) -> usize {
        match self {
            Category::Vehicules => 129,
            Category::Motos => 5,
            Category::Location => 12,
            Category::Telephones => 46,
        }
    }

    /// Clamp a requested page count into `1..=last_page`.
    pub fn clamp_pages(&self, requested: usize) -> usize {
        requested.clamp(1, self.last_page())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A finished scrape with its timing, as handed to the record sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeRun {
    pub source_url: String,
    pub pages_requested: usize,
    pub records: Vec<ListingRecord>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ScrapeRun {
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_lookup_ignores_case() {
        assert_eq!(Category::from_name("motos"), Some(Category::Motos));
        assert_eq!(Category::from_name(" TELEPHONES "), Some(Category::Telephones));
        assert_eq!(Category::from_name("bikes"), None);
    }

    #[test]
    fn test_clamp_pages() {
        assert_eq!(Category::Motos.clamp_pages(0), 1);
        assert_eq!(Category::Motos.clamp_pages(3), 3);
        assert_eq!(Category::Motos.clamp_pages(50), 5);
        assert_eq!(Category::Vehicules.clamp_pages(500), 129);
    }

    #[test]
    fn test_record_serializes_with_export_keys() {
        let record = ListingRecord {
            brand: "Toyota".to_string(),
            price: "1500000".to_string(),
            address: "Dakar".to_string(),
            image_link: "https://dakarvente.com/a.jpg".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["Brand"], "Toyota");
        assert_eq!(json["Image link"], "https://dakarvente.com/a.jpg");
    }
}
