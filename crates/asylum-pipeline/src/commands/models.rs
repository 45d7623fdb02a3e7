use crate::parser::SourceTable;
use crate::utils::config::{PipelineConfig, APPLIED_FIELD, DEFAULT_TOP_N, REFUGEES_FIELD};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Arguments for the build command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct BuildArgs {
    /// Directory holding the source CSV files (overrides the config file)
    pub data_dir: Option<PathBuf>,

    /// Output path for the JSON chart deck
    pub output_json: PathBuf,

    /// Optional TOML configuration file
    pub config_path: Option<PathBuf>,

    /// Number of entries in the hosting-country rankings
    pub top_n: Option<usize>,

    /// Period selected on the refugee map
    pub refugee_period: Option<String>,

    /// Period selected on the asylum map
    pub asylum_period: Option<String>,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for BuildArgs {
    fn default() -> Self {
        Self {
            data_dir: None,
            output_json: PathBuf::from("charts.json"),
            config_path: None,
            top_n: None,
            refugee_period: None,
            asylum_period: None,
            print_summary: false,
        }
    }
}

/// Which country table a ranking or period listing reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostTable {
    /// Refugees hosted, from the persons-of-concern table
    Refugees,
    /// Asylum applications, from the asylum-seekers table
    Asylum,
}

impl HostTable {
    pub fn source_table(&self) -> SourceTable {
        match self {
            HostTable::Refugees => SourceTable::PersonsOfConcern,
            HostTable::Asylum => SourceTable::AsylumSeekers,
        }
    }

    /// Column summed for this table
    pub fn value_field(&self) -> &'static str {
        match self {
            HostTable::Refugees => REFUGEES_FIELD,
            HostTable::Asylum => APPLIED_FIELD,
        }
    }

    /// Map period configured for this table
    pub fn configured_period<'a>(&self, config: &'a PipelineConfig) -> &'a str {
        match self {
            HostTable::Refugees => &config.refugee_period,
            HostTable::Asylum => &config.asylum_period,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            HostTable::Refugees => "Top Refugee-Hosting Countries",
            HostTable::Asylum => "Top Asylum-Seeker Hosting Countries",
        }
    }
}

impl fmt::Display for HostTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostTable::Refugees => write!(f, "refugees"),
            HostTable::Asylum => write!(f, "asylum"),
        }
    }
}

impl FromStr for HostTable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "refugees" | "refugee" => Ok(HostTable::Refugees),
            "asylum" | "asylum-seekers" => Ok(HostTable::Asylum),
            other => Err(format!(
                "unknown table '{}' (expected 'refugees' or 'asylum')",
                other
            )),
        }
    }
}

/// Arguments for the rank command
///
/// File names, data directory and `top_n` come from the config file when
/// given; the flags here override it.
#[derive(Debug, Clone)]
pub struct RankArgs {
    pub data_dir: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub table: HostTable,
    pub top_n: Option<usize>,
}

impl Default for RankArgs {
    fn default() -> Self {
        Self {
            data_dir: None,
            config_path: None,
            table: HostTable::Refugees,
            top_n: None,
        }
    }
}

/// Arguments for the periods command
#[derive(Debug, Clone)]
pub struct PeriodsArgs {
    pub data_dir: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub table: HostTable,

    /// Period to list; the table's configured map period when absent
    pub period: Option<String>,

    /// Maximum number of countries printed
    pub max_lines: usize,
}

impl Default for PeriodsArgs {
    fn default() -> Self {
        Self {
            data_dir: None,
            config_path: None,
            table: HostTable::Refugees,
            period: None,
            max_lines: DEFAULT_TOP_N * 2,
        }
    }
}
