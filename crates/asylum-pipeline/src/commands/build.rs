//! Build command implementation.
//!
//! The build command:
//! 1. Resolves configuration (file, then CLI overrides)
//! 2. Loads every source table
//! 3. Builds the chart datasets
//! 4. Writes the JSON chart deck

use super::models::BuildArgs;
use super::utils::load_pipeline_config;
use crate::aggregator::PeriodBucket;
use crate::charts::build_deck;
use crate::output::{render_deck_summary, write_deck};
use crate::parser::load_sources;
use crate::utils::config::{PipelineConfig, MAX_TOP_N};
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the build command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Build command arguments
///
/// # Errors
/// * Configuration file read or validation errors
/// * Any source table failing to load
/// * File write errors
///
/// # Example
/// ```ignore
/// let args = BuildArgs {
///     data_dir: Some(PathBuf::from("data")),
///     output_json: PathBuf::from("artifacts/charts.json"),
///     print_summary: true,
///     ..Default::default()
/// };
///
/// execute_build(args)?;
/// ```
pub fn execute_build(args: BuildArgs) -> Result<()> {
    let start_time = Instant::now();

    // Step 1: Configuration
    info!("Step 1/4: Resolving configuration...");
    let config = resolve_config(&args)?;
    debug!("Effective configuration: {:?}", config);

    // Step 2: Source tables
    info!("Step 2/4: Loading source tables...");
    let tables = load_sources(&config.data_dir, &config.sources)
        .context("Failed to load source tables")?;

    // Step 3: Chart datasets
    info!("Step 3/4: Building chart datasets...");
    let deck = build_deck(&tables, &config);

    // Step 4: Output
    info!("Step 4/4: Writing chart deck...");
    write_deck(&deck, &args.output_json).context("Failed to write chart deck")?;
    info!("✓ Chart deck written to: {}", args.output_json.display());

    if args.print_summary {
        println!("{}", render_deck_summary(&deck, config.top_n));
    }

    let elapsed = start_time.elapsed();
    info!("Build completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Load the configuration file (if any), apply CLI overrides and validate
///
/// **Public** - also used by tests to check override precedence
pub fn resolve_config(args: &BuildArgs) -> Result<PipelineConfig> {
    let mut config = load_pipeline_config(args.config_path.as_deref(), args.data_dir.as_deref())?;

    if let Some(top_n) = args.top_n {
        config.top_n = top_n;
    }
    if let Some(period) = &args.refugee_period {
        config.refugee_period = period.clone();
    }
    if let Some(period) = &args.asylum_period {
        config.asylum_period = period.clone();
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Validate build arguments
///
/// **Public** - can be called before execute_build for early validation
///
/// Only checks the flags themselves; values coming from a config file are
/// checked by `resolve_config`.
pub fn validate_args(args: &BuildArgs) -> Result<()> {
    if args.output_json.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if let Some(dir) = &args.data_dir {
        if !dir.is_dir() {
            anyhow::bail!("Data directory not found: {}", dir.display());
        }
    }

    if let Some(top_n) = args.top_n {
        if top_n == 0 {
            anyhow::bail!("top_n must be greater than 0");
        }
        if top_n > MAX_TOP_N {
            anyhow::bail!("top_n is too large (max {})", MAX_TOP_N);
        }
    }

    for period in [&args.refugee_period, &args.asylum_period].into_iter().flatten() {
        period
            .parse::<PeriodBucket>()
            .with_context(|| format!("Invalid period '{}'", period))?;
    }

    Ok(())
}
