//! Rank and periods commands.
//!
//! Both read a single country table and print to the terminal instead of
//! writing a deck. They resolve configuration the same way `build` does, so
//! file names, aliases and map periods agree with the deck.

use super::models::{HostTable, PeriodsArgs, RankArgs};
use super::utils::load_pipeline_config;
use crate::charts::{period_map, period_view, top_hosts};
use crate::normalize::AliasTable;
use crate::output::{render_period_listing, render_ranking};
use crate::parser::schema::{CountryTotal, PeriodView};
use crate::parser::{load_table, RawRecord};
use crate::utils::config::PipelineConfig;
use anyhow::{Context, Result};
use log::info;

/// Print the top hosting countries of one table
pub fn execute_rank(args: RankArgs) -> Result<()> {
    let mut config = load_pipeline_config(args.config_path.as_deref(), args.data_dir.as_deref())?;
    if let Some(top_n) = args.top_n {
        config.top_n = top_n;
    }
    config.validate().context("Invalid configuration")?;

    let records = load_host_table(&config, args.table)?;
    let ranking = rank_hosts(&records, args.table, config.top_n);

    println!("{}", render_ranking(args.table.title(), &ranking));
    Ok(())
}

/// Top `top_n` countries of a loaded host table
pub fn rank_hosts(records: &[RawRecord], table: HostTable, top_n: usize) -> Vec<CountryTotal> {
    top_hosts(records, table.value_field(), top_n)
}

/// Print the country totals of one period
pub fn execute_periods(args: PeriodsArgs) -> Result<()> {
    let config = load_pipeline_config(args.config_path.as_deref(), args.data_dir.as_deref())?;
    config.validate().context("Invalid configuration")?;

    let records = load_host_table(&config, args.table)?;
    let selected = args
        .period
        .as_deref()
        .unwrap_or_else(|| args.table.configured_period(&config));
    let view = period_listing(&records, args.table, selected, &config.alias_table());

    println!("{}", render_period_listing(&view, args.max_lines));
    Ok(())
}

/// Map view of a loaded host table for one selected period
///
/// Country names are canonicalized through `aliases`, as on the maps.
pub fn period_listing(
    records: &[RawRecord],
    table: HostTable,
    selected: &str,
    aliases: &AliasTable,
) -> PeriodView {
    let map = period_map(records, table.value_field(), aliases);
    period_view(&map, selected)
}

fn load_host_table(config: &PipelineConfig, table: HostTable) -> Result<Vec<RawRecord>> {
    let path = config
        .data_dir
        .join(table.source_table().file_name(&config.sources));

    info!("Reading {} table from {}", table, path.display());

    load_table(&path).with_context(|| format!("Failed to load {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::config::{APPLIED_FIELD, COUNTRY_FIELD, YEAR_FIELD};
    use std::fs;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn asylum(country: &str, year: &str, applied: &str) -> RawRecord {
        RawRecord::from_pairs([
            (COUNTRY_FIELD, country),
            (YEAR_FIELD, year),
            (APPLIED_FIELD, applied),
        ])
    }

    #[test]
    fn test_rank_hosts_reads_table_column() {
        let records = vec![
            asylum("Germany", "2016", "700,000"),
            asylum("Sweden", "2016", "20,000"),
            asylum("Germany", "2017", "200,000"),
        ];
        let ranking = rank_hosts(&records, HostTable::Asylum, 1);

        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].country, "Germany");
        assert_eq!(ranking[0].total, 900_000.0);
    }

    #[test]
    fn test_period_listing_applies_aliases() {
        let records = vec![asylum("UAE", "2021", "12"), asylum("UAE", "2024", "3")];
        let aliases = AliasTable::with_defaults();
        let view = period_listing(&records, HostTable::Asylum, "2020-2024", &aliases);

        assert_eq!(view.totals.get("United Arab Emirates"), Some(15.0));
        assert_eq!(view.max_total, 15.0);
    }

    #[test]
    fn test_period_listing_uses_configured_aliases() {
        let mut config_file = NamedTempFile::new().unwrap();
        writeln!(config_file, "[aliases]\n\"Türkiye\" = \"Turkey\"").unwrap();
        let config = load_pipeline_config(Some(config_file.path()), None).unwrap();

        let records = vec![asylum("Türkiye", "2016", "40")];
        let view = period_listing(
            &records,
            HostTable::Asylum,
            "2015-2019",
            &config.alias_table(),
        );

        assert_eq!(view.totals.get("Turkey"), Some(40.0));
    }

    #[test]
    fn test_load_host_table_follows_configured_file_name() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("applications.csv"),
            "Year,Country / territory of asylum/residence,Applied during year\n2016,Chad,3\n",
        )
        .unwrap();

        let mut config = PipelineConfig {
            data_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        config.sources.asylum_seekers = "applications.csv".to_string();

        let records = load_host_table(&config, HostTable::Asylum).unwrap();
        assert_eq!(records.len(), 1);
        assert!(load_host_table(&config, HostTable::Refugees).is_err());
    }

    #[test]
    fn test_execute_rank_rejects_zero() {
        let args = RankArgs {
            top_n: Some(0),
            ..Default::default()
        };
        assert!(execute_rank(args).is_err());
    }

    #[test]
    fn test_execute_periods_missing_file() {
        let dir = TempDir::new().unwrap();
        let args = PeriodsArgs {
            data_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        assert!(execute_periods(args).is_err());
    }
}
