use dakarvente_scraper::{Category, ListingScraper, ScraperConfig};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let category = args
        .get(1)
        .and_then(|name| Category::from_name(name))
        .unwrap_or(Category::Motos);
    let page = args
        .get(2)
        .and_then(|p| p.parse::<usize>().ok())
        .unwrap_or(1);

    println!("Testing listing page {} of {}\n", page, category);

    let config = match ScraperConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("✗ Configuration error: {}", e);
            return;
        }
    };

    let scraper = match ListingScraper::new(config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("✗ Error: {}", e);
            return;
        }
    };

    let page_url = match scraper.page_url(category.base_url(), page) {
        Ok(u) => u,
        Err(e) => {
            eprintln!("✗ Error: {}", e);
            return;
        }
    };
    println!("URL: {}\n", page_url);

    match scraper.scrape_page(&page_url) {
        Ok(links) => {
            println!("✓ Found {} listing cards", links.len());
            for (i, link) in links.iter().enumerate() {
                println!("  {}. {}", i + 1, link);
            }
            if links.is_empty() {
                println!("\n⚠ No cards matched; the listing markup may have changed");
            }
        }
        Err(e) => eprintln!("✗ Error: {}", e),
    }
}
