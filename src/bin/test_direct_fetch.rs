use dakarvente_scraper::{utils, ListingScraper, ScraperConfig};

fn main() {
    let url = match std::env::args().nth(1) {
        Some(u) => u,
        None => {
            eprintln!("Usage: test_direct_fetch <detail-page-url>");
            return;
        }
    };

    println!("Testing URL: {}\n", url);

    let scraper = match ScraperConfig::from_env().and_then(ListingScraper::new) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("✗ Error: {}", e);
            return;
        }
    };

    match scraper.scrape_detail(&url) {
        Ok(record) => {
            println!("✓ Extracted record:\n");
            print!("{}", utils::format_record_info(&record));
        }
        Err(e) if e.is_extraction() => {
            eprintln!("✗ Page fetched but a field is missing: {}", e);
        }
        Err(e) => eprintln!("✗ Error making request: {}", e),
    }
}
