use crate::output::read_deck;
use crate::parser::schema::WindowCharts;
use crate::utils::config::{load_config, PipelineConfig, SCHEMA_VERSION};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Configuration shared by every command that reads the data directory
///
/// Loads `config_path` when given (defaults otherwise) and applies the
/// `--data-dir` override. Callers apply their own overrides and validate.
pub fn load_pipeline_config(
    config_path: Option<&Path>,
    data_dir: Option<&Path>,
) -> Result<PipelineConfig> {
    let mut config = match config_path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    if let Some(dir) = data_dir {
        config.data_dir = dir.to_path_buf();
    }

    Ok(config)
}

/// Validate a chart deck JSON file
pub fn validate_deck_file(file_path: PathBuf) -> Result<()> {
    println!("Validating chart deck: {}", file_path.display());

    let deck = read_deck(&file_path)
        .with_context(|| format!("Not a valid chart deck: {}", file_path.display()))?;

    if deck.version != SCHEMA_VERSION {
        println!(
            "⚠ Schema version {} differs from current {}",
            deck.version, SCHEMA_VERSION
        );
    }

    println!("✓ Valid chart deck JSON");
    println!("  Version: {}", deck.version);
    println!("  Generated: {}", deck.generated_at);
    println!("  Seasonal Months: {}", deck.seasonal.global.len());
    println!(
        "  Windows: {} (3-year), {} (5-year)",
        WindowCharts::windows(&deck.windows.three_year).len(),
        WindowCharts::windows(&deck.windows.five_year).len()
    );
    println!("  Age Groups: {}", deck.age_gender.len());
    println!("  Refugee Map Periods: {}", deck.refugee_map.periods.len());
    println!("  Asylum Map Periods: {}", deck.asylum_map.periods.len());

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Asylum Statistics Chart Deck Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string            - Schema version (e.g., '1.0.0')");
        println!("  generated_at: string       - RFC 3339 timestamp");
        println!("  seasonal: object           - Average applications per month");
        println!("    global: array            - {{month, value}} for every month");
        println!("    europe: array            - Same, Europe only");
        println!("  windows: object            - Monthly averages per window");
        println!("    three_year: array        - {{window, month, value}} per 3-year window");
        println!("    five_year: array         - {{window, month, value}} per 5-year window");
        println!("  age_gender: array          - {{age_group, male, female}}");
        println!("  top_refugee_hosts: array   - {{country, total}}, largest first");
        println!("  top_asylum_hosts: array    - {{country, total}}, largest first");
        println!("  refugee_map: object        - Refugees hosted per 5-year period");
        println!("  asylum_map: object         - Applications per 5-year period");
        println!("    width: number            - Period width in years");
        println!("    selected: string         - Selected period label");
        println!("    periods: array           - Every period with data");
        println!("    totals: object           - Country totals of the selected period");
        println!("    max_total: number        - Largest selected total (0 if none)");
        println!("    by_period: object        - Country totals of every period");
        println!("  source_rows: object        - Rows read per source table");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Asylum Stats v{}", env!("CARGO_PKG_VERSION"));
    println!("Chart Deck Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Chart data builder for refugee and asylum statistics.");
}
