//! Asylum Stats CLI
//!
//! Builds chart datasets from refugee and asylum statistics tables.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use asylum_pipeline::commands::{
    display_schema, display_version, execute_build, execute_periods, execute_rank, validate_args,
    validate_deck_file, BuildArgs, HostTable, PeriodsArgs, RankArgs,
};

/// Asylum Stats - chart data for refugee and asylum statistics
#[derive(Parser, Debug)]
#[command(name = "asylum-stats")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the JSON chart deck from a data directory
    Build {
        /// Directory holding the source CSV files
        #[arg(short, long, env = "ASYLUM_DATA_DIR")]
        data_dir: Option<PathBuf>,

        /// Output path for the chart deck (placed in artifacts/ by default)
        #[arg(short, long, default_value = "artifacts/charts.json")]
        output: PathBuf,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of countries in the rankings
        #[arg(long)]
        top_n: Option<usize>,

        /// Period shown on the refugee map (e.g. 2015-2019)
        #[arg(long)]
        refugee_period: Option<String>,

        /// Period shown on the asylum map (e.g. 2015-2019)
        #[arg(long)]
        asylum_period: Option<String>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Print the top hosting countries of a table
    Rank {
        /// Directory holding the source CSV files
        #[arg(short, long, env = "ASYLUM_DATA_DIR")]
        data_dir: Option<PathBuf>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Table to rank: refugees or asylum
        #[arg(short, long, default_value = "refugees")]
        table: HostTable,

        /// Number of countries to show
        #[arg(long)]
        top_n: Option<usize>,
    },

    /// Print country totals for one 5-year period
    Periods {
        /// Directory holding the source CSV files
        #[arg(short, long, env = "ASYLUM_DATA_DIR")]
        data_dir: Option<PathBuf>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Table to read: refugees or asylum
        #[arg(short, long, default_value = "refugees")]
        table: HostTable,

        /// Period label (defaults to the configured map period)
        #[arg(short, long)]
        period: Option<String>,

        /// Maximum number of countries printed
        #[arg(long, default_value = "20")]
        max_lines: usize,
    },

    /// Validate a chart deck JSON file
    Validate {
        /// Path to chart deck JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Build {
            data_dir,
            output,
            config,
            top_n,
            refugee_period,
            asylum_period,
            summary,
        } => {
            let args = BuildArgs {
                data_dir,
                output_json: output,
                config_path: config,
                top_n,
                refugee_period,
                asylum_period,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_build(args)?;
        }

        Commands::Rank {
            data_dir,
            config,
            table,
            top_n,
        } => {
            execute_rank(RankArgs {
                data_dir,
                config_path: config,
                table,
                top_n,
            })?;
        }

        Commands::Periods {
            data_dir,
            config,
            table,
            period,
            max_lines,
        } => {
            execute_periods(PeriodsArgs {
                data_dir,
                config_path: config,
                table,
                period,
                max_lines,
            })?;
        }

        Commands::Validate { file } => {
            validate_deck_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
