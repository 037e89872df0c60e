use crate::models::{ListingRecord, ScrapeRun};
use crate::summary::PriceStats;

/// Format a record as a readable block
pub fn format_record_info(record: &ListingRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Brand: {}\n", record.brand));
    output.push_str(&format!("Price: {} FCFA\n", record.price));
    output.push_str(&format!("Address: {}\n", record.address));
    output.push_str(&format!("Image: {}\n", record.image_link));

    output
}

/// One-screen summary of a finished scrape
pub fn format_run_summary(run: &ScrapeRun) -> String {
    let mut output = String::new();

    output.push_str(&"=".repeat(70));
    output.push('\n');
    output.push_str(&format!("Source: {}\n", run.source_url));
    output.push_str(&format!("Pages scraped: {}\n", run.pages_requested));
    output.push_str(&format!("Nombre d'éléments scrappés : {}\n", run.record_count()));
    output.push_str(&format!(
        "Started: {}\n",
        run.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!("Duration: {}s\n", run.elapsed().num_seconds()));
    output.push_str(&"=".repeat(70));
    output.push('\n');

    output
}

/// Horizontal ASCII bars, scaled so the largest count fills `width` cells.
pub fn render_bar_chart(counts: &[(String, usize)], width: usize) -> String {
    let max = counts.iter().map(|(_, c)| *c).max().unwrap_or(0);
    let label_width = counts.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let mut output = String::new();

    for (label, count) in counts {
        let cells = if max == 0 { 0 } else { count * width / max };
        output.push_str(&format!(
            "{:<label_width$} | {} {}\n",
            label,
            "#".repeat(cells.max(1)),
            count,
            label_width = label_width
        ));
    }

    output
}

/// Share of each label as a percentage, the pie chart's slices.
pub fn format_shares(counts: &[(String, usize)]) -> String {
    let total: usize = counts.iter().map(|(_, c)| c).sum();
    let mut output = String::new();

    for (label, count) in counts {
        let share = if total == 0 {
            0.0
        } else {
            *count as f64 * 100.0 / total as f64
        };
        output.push_str(&format!("  {}: {:.1}%\n", label, share));
    }

    output
}

pub fn format_price_stats(stats: &PriceStats) -> String {
    format!(
        "Listings: {}\nMin price: {:.0}\nMax price: {:.0}\nMean price: {:.0}\n",
        stats.count, stats.min, stats.max, stats.mean
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_chart_scales_to_width() {
        let counts = vec![("Toyota".to_string(), 4), ("Kia".to_string(), 2)];
        let chart = render_bar_chart(&counts, 8);
        let lines: Vec<_> = chart.lines().collect();
        assert_eq!(lines[0], "Toyota | ######## 4");
        assert_eq!(lines[1], "Kia    | #### 2");
    }

    #[test]
    fn test_shares() {
        let counts = vec![("A".to_string(), 3), ("B".to_string(), 1)];
        assert_eq!(format_shares(&counts), "  A: 75.0%\n  B: 25.0%\n");
    }

    #[test]
    fn test_record_info() {
        let record = ListingRecord {
            brand: "Yamaha".to_string(),
            price: "800000".to_string(),
            address: "Pikine".to_string(),
            image_link: "https://dakarvente.com/m.jpg".to_string(),
        };
        assert!(format_record_info(&record).contains("Price: 800000 FCFA"));
    }
}
