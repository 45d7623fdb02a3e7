//! Terminal output rendering for chart decks.
//!
//! Plain-text tables for a quick look at the data without a renderer.

use crate::parser::schema::{ChartDeck, CountryTotal, PeriodView, WindowCharts};
use colored::*;

const RULE: &str = "---------------------------------------------------";

/// Render a human-readable summary of a whole deck
pub fn render_deck_summary(deck: &ChartDeck, max_lines: usize) -> String {
    let mut out = String::new();

    out.push_str(&render_header(deck));
    out.push_str(&render_sources(deck));
    out.push_str(&render_seasonal(deck));
    out.push_str(&render_windows(deck));
    out.push_str(&render_ranking(
        "Top Refugee-Hosting Countries",
        &deck.top_refugee_hosts,
    ));
    out.push_str(&render_ranking(
        "Top Asylum-Seeker Hosting Countries",
        &deck.top_asylum_hosts,
    ));
    out.push_str(&render_period_listing(&deck.refugee_map, max_lines));
    out.push_str(&render_period_listing(&deck.asylum_map, max_lines));

    out
}

fn render_header(deck: &ChartDeck) -> String {
    let mut out = String::new();
    out.push_str("\n📊 ");
    out.push_str(&"Chart Deck Summary".bold().to_string());
    out.push_str(&format!("\n{}\n", RULE));
    out.push_str(&format!("Schema:    v{}\n", deck.version));
    out.push_str(&format!("Generated: {}\n", deck.generated_at));
    out.push_str(&format!("{}\n", RULE));
    out
}

fn render_sources(deck: &ChartDeck) -> String {
    let mut out = String::from("\nSource rows:\n");
    for (table, rows) in &deck.source_rows {
        out.push_str(&format!("  {:<22} {:>8}\n", table, rows));
    }
    out
}

fn render_seasonal(deck: &ChartDeck) -> String {
    let mut out = String::from("\nSeasonal averages (global / Europe):\n");
    for point in &deck.seasonal.global {
        let europe = deck
            .seasonal
            .europe
            .iter()
            .find(|p| p.month == point.month)
            .map(|p| format!("{:.2}", p.value))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "  {:<10} {:>12.2} {:>12}\n",
            point.month.name(),
            point.value,
            europe
        ));
    }
    out
}

fn render_windows(deck: &ChartDeck) -> String {
    let mut out = String::from("\nWindows:\n");
    let three = WindowCharts::windows(&deck.windows.three_year);
    let five = WindowCharts::windows(&deck.windows.five_year);
    out.push_str(&format!("  3-year: {}\n", three.join(", ")));
    out.push_str(&format!("  5-year: {}\n", five.join(", ")));
    out
}

/// Render a ranked country list as a numbered table
pub fn render_ranking(title: &str, entries: &[CountryTotal]) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{}\n", title.bold()));

    if entries.is_empty() {
        out.push_str("  (no data)\n");
        return out;
    }

    for (i, entry) in entries.iter().enumerate() {
        out.push_str(&format!(
            "  {:>2}. {:<40} {:>15}\n",
            i + 1,
            entry.country,
            format_count(entry.total)
        ));
    }
    out
}

/// Render the selected period of a map view plus the available periods
pub fn render_period_listing(view: &PeriodView, max_lines: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n{} {}\n",
        "Period".bold(),
        view.selected.cyan()
    ));
    out.push_str(&format!("  Available: {}\n", view.periods.join(", ")));

    if view.totals.is_empty() {
        out.push_str(&format!("  {}\n", "No data for this period".yellow()));
        return out;
    }

    let mut rows: Vec<(&String, f64)> = view.totals.iter().collect();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1));

    for (country, total) in rows.iter().take(max_lines) {
        out.push_str(&format!("  {:<40} {:>15}\n", country, format_count(*total)));
    }

    if rows.len() > max_lines {
        out.push_str(&format!(
            "  (Showing top {} of {} countries)\n",
            max_lines,
            rows.len()
        ));
    }
    out
}

/// Format a count with thousands separators; fractional values keep two decimals
pub fn format_count(value: f64) -> String {
    if value.fract() != 0.0 {
        return format!("{:.2}", value);
    }

    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if value < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
