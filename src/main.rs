use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dakarvente_scraper::{
    export, summary, utils, Category, ListingScraper, LogProgress, ScraperConfig,
    DEFAULT_PAGE_COUNT,
};
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "dakarvente")]
#[command(about = "Scrape classified ads from dakarvente.com and summarize cleaned exports")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the known categories and their last page
    Categories,

    /// Scrape listing pages and their detail pages
    Scrape {
        /// Category to scrape (Vehicules, Motos, Location, Telephones)
        #[arg(short, long, conflicts_with = "url")]
        category: Option<String>,

        /// Listing URL to scrape instead of a category
        #[arg(long)]
        url: Option<String>,

        /// Number of listing pages, starting at 1
        #[arg(short, long, default_value_t = DEFAULT_PAGE_COUNT)]
        pages: usize,

        /// CSV output file
        #[arg(short, long, default_value = "data.csv")]
        output: PathBuf,

        /// Also write the records as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Detail pages fetched at once per listing page
        #[arg(long)]
        concurrency: Option<usize>,

        /// Per-request timeout in seconds (none by default)
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Summarize a pre-cleaned CSV (brand counts, price statistics)
    Summary {
        /// CSV with Brand/brand and Price/price columns
        file: PathBuf,

        /// Width of the bar chart
        #[arg(long, default_value_t = 40)]
        width: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,dakarvente_scraper=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Categories => {
            for category in Category::all() {
                println!(
                    "{:<12} {:>4} pages  {}",
                    category.name(),
                    category.last_page(),
                    category.base_url()
                );
            }
            Ok(())
        }
        Command::Scrape {
            category,
            url,
            pages,
            output,
            json,
            concurrency,
            timeout,
        } => run_scrape(category, url, pages, output, json, concurrency, timeout),
        Command::Summary { file, width } => run_summary(file, width),
    }
}

fn run_scrape(
    category: Option<String>,
    url: Option<String>,
    pages: usize,
    output: PathBuf,
    json: Option<PathBuf>,
    concurrency: Option<usize>,
    timeout: Option<u64>,
) -> Result<()> {
    let (base_url, page_count) = match (category, url) {
        (Some(name), _) => {
            let category = Category::from_name(&name)
                .with_context(|| format!("Unknown category '{}'", name))?;
            let clamped = category.clamp_pages(pages);
            if clamped != pages {
                tracing::warn!(requested = pages, clamped, "Page count clamped to category range");
            }
            (category.base_url().to_string(), clamped)
        }
        (None, Some(url)) => (url, pages),
        (None, None) => bail!("Pass --category or --url"),
    };

    let mut config = ScraperConfig::from_env().context("Failed to load configuration")?;
    if let Some(concurrency) = concurrency {
        config.detail_concurrency = concurrency;
    }
    if timeout.is_some() {
        config.request_timeout_secs = timeout;
    }

    let scraper = ListingScraper::new(config).context("Failed to build scraper")?;
    let config = scraper.config();

    println!("Configuration:");
    println!("  Listing URL: {}", base_url);
    println!("  Site origin: {}", config.site_origin);
    println!("  Pages: {}", page_count);
    println!("  Detail concurrency: {}", config.detail_concurrency);
    println!(
        "  Request timeout: {}",
        config
            .request_timeout_secs
            .map(|s| format!("{}s", s))
            .unwrap_or_else(|| "none".to_string())
    );
    println!();

    let mut progress = LogProgress::default();
    let run = scraper
        .scrape_run(&base_url, page_count, &mut progress)
        .context("Scrape aborted")?;

    export::save_csv(&output, &run.records)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("✓ Saved {} records to '{}'", run.record_count(), output.display());

    if let Some(json_path) = json {
        export::save_json(&json_path, &run.records)
            .with_context(|| format!("Failed to write {}", json_path.display()))?;
        println!("✓ Saved JSON to '{}'", json_path.display());
    }

    print!("{}", utils::format_run_summary(&run));
    println!("Listings skipped: {}", progress.skipped());

    Ok(())
}

fn run_summary(file: PathBuf, width: usize) -> Result<()> {
    let reader = File::open(&file).with_context(|| format!("Cannot open {}", file.display()))?;
    let rows = summary::load_cleaned(reader)
        .with_context(|| format!("Cannot read {}", file.display()))?;

    let Some(stats) = summary::price_stats(&rows) else {
        println!("No usable rows in {}", file.display());
        return Ok(());
    };

    let counts = summary::brand_counts(&rows);

    println!("{}", "=".repeat(70));
    print!("{}", utils::format_price_stats(&stats));
    println!("{}", "=".repeat(70));
    println!("\nListings per brand:");
    print!("{}", utils::render_bar_chart(&counts, width));
    println!("\nShare per brand:");
    print!("{}", utils::format_shares(&counts));

    Ok(())
}
