//! Configuration and constants for the pipeline.
//!
//! Constants describe the fixed column vocabulary of the source tables.
//! `PipelineConfig` is loaded from TOML, overridden by CLI flags, and then
//! validated before any data is read.

use crate::aggregator::bucket::PeriodBucket;
use crate::normalize::AliasTable;
use crate::utils::error::ConfigError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Default number of entries kept by the hosting-country rankings
pub const DEFAULT_TOP_N: usize = 10;
pub const MAX_TOP_N: usize = 1000;

/// Period shown on the maps when nothing else is selected
pub const DEFAULT_PERIOD: &str = "2015-2019";

/// Window width used for the choropleth maps
pub const MAP_WINDOW_WIDTH: u32 = 5;

// Column names shared by the source tables
pub const COUNTRY_FIELD: &str = "Country / territory of asylum/residence";
pub const YEAR_FIELD: &str = "Year";
pub const REFUGEES_FIELD: &str = "Refugees (incl. refugee-like situations)";
pub const APPLIED_FIELD: &str = "Applied during year";
pub const MONTH_FIELD: &str = "Month";
pub const VALUE_FIELD: &str = "Value";
pub const WINDOW_3YR_FIELD: &str = "Window_3yr";
pub const WINDOW_5YR_FIELD: &str = "Window_5yr";
pub const AGE_GROUP_FIELD: &str = "Age Group";
pub const MALE_COUNT_FIELD: &str = "Male Count";
pub const FEMALE_COUNT_FIELD: &str = "Female Count";

/// Country names as they appear in the statistics, mapped to the names used
/// by the world boundary dataset.
pub const DEFAULT_COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("United States", "United States of America"),
    ("South Korea", "Korea, Republic of"),
    ("North Korea", "Korea, Democratic People's Republic of"),
    ("Russia", "Russian Federation"),
    ("Iran", "Iran, Islamic Republic of"),
    ("Syria", "Syrian Arab Republic"),
    ("Venezuela", "Venezuela, Bolivarian Republic of"),
    ("Bolivia", "Bolivia, Plurinational State of"),
    ("Tanzania", "Tanzania, United Republic of"),
    ("Czech Republic", "Czechia"),
    ("Moldova", "Moldova, Republic of"),
    ("Laos", "Lao People's Democratic Republic"),
    ("Vietnam", "Viet Nam"),
    ("DR Congo", "Democratic Republic of the Congo"),
    ("Republic of Congo", "Congo"),
    ("Swaziland", "Eswatini"),
    ("Micronesia", "Micronesia, Federated States of"),
    ("Brunei", "Brunei Darussalam"),
    ("Cape Verde", "Cabo Verde"),
    ("Ivory Coast", "Côte d'Ivoire"),
    ("UAE", "United Arab Emirates"),
];

/// Complete pipeline configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory holding the source CSV files
    pub data_dir: PathBuf,

    /// File names of the source tables, relative to `data_dir`
    pub sources: SourceFiles,

    /// Number of entries in the hosting-country rankings
    pub top_n: usize,

    /// Period selected on the refugee hosting map
    pub refugee_period: String,

    /// Period selected on the asylum applications map
    pub asylum_period: String,

    /// Window labels hidden from the windowed charts
    pub windows: WindowsConfig,

    /// Extra or overriding country-name aliases
    pub aliases: BTreeMap<String, String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            sources: SourceFiles::default(),
            top_n: DEFAULT_TOP_N,
            refugee_period: DEFAULT_PERIOD.to_string(),
            asylum_period: DEFAULT_PERIOD.to_string(),
            windows: WindowsConfig::default(),
            aliases: BTreeMap::new(),
        }
    }
}

/// File names of the eight source tables
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceFiles {
    pub monthly_global: String,
    pub monthly_europe: String,
    pub window_3yr: String,
    pub window_5yr: String,
    pub age_gender: String,
    pub persons_of_concern: String,
    pub asylum_seekers: String,
    pub demographics: String,
}

impl Default for SourceFiles {
    fn default() -> Self {
        Self {
            monthly_global: "asylum_monthly_global_avg.csv".to_string(),
            monthly_europe: "asylum_monthly_europe_avg.csv".to_string(),
            window_3yr: "asylum_3yr_window.csv".to_string(),
            window_5yr: "asylum_5yr_window.csv".to_string(),
            age_gender: "age_gender_distribution.csv".to_string(),
            persons_of_concern: "persons_of_concern.csv".to_string(),
            asylum_seekers: "asylum_seekers.csv".to_string(),
            demographics: "demographics.csv".to_string(),
        }
    }
}

/// Window exclusion lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowsConfig {
    pub exclude_3yr: Vec<String>,
    pub exclude_5yr: Vec<String>,
}

impl PipelineConfig {
    /// Build the alias table: defaults first, configured entries on top
    pub fn alias_table(&self) -> AliasTable {
        let mut table = AliasTable::with_defaults();
        table.extend(
            self.aliases
                .iter()
                .map(|(from, to)| (from.clone(), to.clone())),
        );
        debug!(
            "Alias table: {} entries ({} configured)",
            table.len(),
            self.aliases.len()
        );
        table
    }

    /// Check values that the pipeline cannot work with
    ///
    /// # Errors
    /// * `ConfigError::InvalidValue` - top_n out of range or wrong period width
    /// * `ConfigError::InvalidPeriod` - a period label does not parse
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::InvalidValue(
                "top_n must be greater than 0".to_string(),
            ));
        }

        if self.top_n > MAX_TOP_N {
            return Err(ConfigError::InvalidValue(format!(
                "top_n is too large (max {})",
                MAX_TOP_N
            )));
        }

        for label in [&self.refugee_period, &self.asylum_period] {
            let period: PeriodBucket = label.parse()?;
            if period.width() != MAP_WINDOW_WIDTH {
                return Err(ConfigError::InvalidValue(format!(
                    "period '{}' spans {} years, maps use {}-year periods",
                    label,
                    period.width(),
                    MAP_WINDOW_WIDTH
                )));
            }
        }

        Ok(())
    }
}

/// Load pipeline configuration from a TOML file
///
/// Missing keys fall back to their defaults.
///
/// # Errors
/// * `ConfigError::Io` - If file cannot be read
/// * `ConfigError::Toml` - If TOML is invalid
///
/// # Example
/// ```ignore
/// let config = load_config("charts.toml")?;
/// config.validate()?;
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<PipelineConfig, ConfigError> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    let contents = fs::read_to_string(path)?;
    let config: PipelineConfig = toml::from_str(&contents)?;
    Ok(config)
}
