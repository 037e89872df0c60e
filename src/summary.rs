//! Descriptive statistics over pre-cleaned CSV files: the numbers behind
//! the dashboard's bar, pie and scatter charts.

use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::io::Read;
use std::sync::OnceLock;

use crate::error::{Result, ScrapeError};

const BRAND_COLUMNS: [&str; 2] = ["Brand", "brand"];
const PRICE_COLUMNS: [&str; 2] = ["Price", "price"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanedRow {
    pub brand: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

fn non_numeric() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^0-9.]").unwrap())
}

/// Parse a price cell, ignoring anything but digits and the decimal point.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned = non_numeric().replace_all(raw, "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Load `Brand`/`brand` and `Price`/`price` columns. Rows with an unusable
/// price are dropped; missing columns are a configuration error.
pub fn load_cleaned<R: Read>(reader: R) -> Result<Vec<CleanedRow>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let find_column = |names: &[&str]| {
        headers
            .iter()
            .position(|h| names.iter().any(|name| *name == h.trim()))
    };
    let brand_idx = find_column(&BRAND_COLUMNS)
        .ok_or_else(|| ScrapeError::Config("CSV has no Brand/brand column".to_string()))?;
    let price_idx = find_column(&PRICE_COLUMNS)
        .ok_or_else(|| ScrapeError::Config("CSV has no Price/price column".to_string()))?;

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let brand = record.get(brand_idx).unwrap_or_default().trim().to_string();
        if let Some(price) = record.get(price_idx).and_then(parse_price) {
            rows.push(CleanedRow { brand, price });
        }
    }

    Ok(rows)
}

/// Listings per brand, most frequent first, ties by name.
pub fn brand_counts(rows: &[CleanedRow]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        *counts.entry(row.brand.as_str()).or_insert(0) += 1;
    }

    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(brand, count)| (brand.to_string(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// `(row index, price)` pairs for a scatter plot.
pub fn price_points(rows: &[CleanedRow]) -> Vec<(usize, f64)> {
    rows.iter().enumerate().map(|(i, row)| (i, row.price)).collect()
}

pub fn price_stats(rows: &[CleanedRow]) -> Option<PriceStats> {
    if rows.is_empty() {
        return None;
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut total = 0.0;
    for row in rows {
        min = min.min(row.price);
        max = max.max(row.price);
        total += row.price;
    }

    Some(PriceStats {
        count: rows.len(),
        min,
        max,
        mean: total / rows.len() as f64,
    })
}
