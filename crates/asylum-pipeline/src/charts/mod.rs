//! Chart datasets built from the loaded source tables.
//!
//! Each function here picks the columns, normalizer and aggregation for one
//! chart; `build_deck` runs all of them. Selection state (which map period
//! is shown, which windows are hidden) comes in through `PipelineConfig`.

pub mod filter;

pub use filter::WindowFilter;

use crate::aggregator::{
    flatten_windows, group_sum, rank_top_n, seasonal_series, select_period, windowed_series,
    MonthlyPoint, PeriodMap, Reduction, WindowPoint,
};
use crate::normalize::{AliasTable, NormalizedRecord, Normalizer};
use crate::parser::schema::{
    ChartDeck, CountryTotal, DemographicSlice, PeriodView, SeasonalCharts, WindowCharts,
};
use crate::parser::{RawRecord, SourceTable, SourceTables};
use crate::utils::config::{
    PipelineConfig, AGE_GROUP_FIELD, APPLIED_FIELD, COUNTRY_FIELD, FEMALE_COUNT_FIELD,
    MALE_COUNT_FIELD, MAP_WINDOW_WIDTH, MONTH_FIELD, REFUGEES_FIELD, SCHEMA_VERSION, VALUE_FIELD,
    WINDOW_3YR_FIELD, WINDOW_5YR_FIELD, YEAR_FIELD,
};
use chrono::Utc;
use log::{debug, info};

/// Average value per calendar month from a `Month`/`Value` table
pub fn seasonal_chart(records: &[RawRecord]) -> Vec<MonthlyPoint> {
    let normalized = Normalizer::default()
        .with_numeric_field(VALUE_FIELD)
        .normalize_all(records);

    seasonal_series(&normalized, MONTH_FIELD, VALUE_FIELD, Reduction::Mean)
}

/// Monthly averages per window from a precomputed window table
///
/// `window_field` is the column holding the window label (e.g. `Window_3yr`).
/// Excluded windows are dropped before the lines are flattened into
/// `{window, month, value}` points.
pub fn window_chart(
    records: &[RawRecord],
    window_field: &str,
    filter: &WindowFilter,
) -> Vec<WindowPoint> {
    let normalized = Normalizer::default()
        .with_numeric_field(VALUE_FIELD)
        .normalize_all(records);

    let series = windowed_series(
        &normalized,
        window_field,
        MONTH_FIELD,
        VALUE_FIELD,
        Reduction::Mean,
    );

    flatten_windows(&filter.apply(series))
}

/// Male and female counts per age group
pub fn age_gender_chart(records: &[RawRecord]) -> Vec<DemographicSlice> {
    let normalized = Normalizer::default()
        .with_numeric_field(MALE_COUNT_FIELD)
        .with_numeric_field(FEMALE_COUNT_FIELD)
        .normalize_all(records);

    let age_group = |r: &NormalizedRecord| r.text(AGE_GROUP_FIELD).map(str::to_string);
    let male = group_sum(&normalized, age_group, |r: &NormalizedRecord| {
        r.number(MALE_COUNT_FIELD)
    });
    let female = group_sum(&normalized, age_group, |r: &NormalizedRecord| {
        r.number(FEMALE_COUNT_FIELD)
    });

    male.iter()
        .map(|(group, male_total)| DemographicSlice {
            age_group: group.clone(),
            male: male_total,
            female: female.get(group).unwrap_or(0.0),
        })
        .collect()
}

/// Countries with the largest totals of `value_field` over all years
///
/// Country names are used as they appear in the table; the rankings are not
/// joined against map data.
pub fn top_hosts(records: &[RawRecord], value_field: &str, top_n: usize) -> Vec<CountryTotal> {
    let normalized = Normalizer::new(AliasTable::new())
        .with_numeric_field(value_field)
        .normalize_all(records);

    let totals = group_sum(
        &normalized,
        |r: &NormalizedRecord| r.text(COUNTRY_FIELD).map(str::to_string),
        |r: &NormalizedRecord| r.number(value_field),
    );

    rank_top_n(&totals, top_n)
        .into_iter()
        .map(|entry| CountryTotal {
            country: entry.key,
            total: entry.total,
        })
        .collect()
}

/// Build the period → country → total structure for a map
///
/// Country names go through `aliases` so they match the boundary data.
pub fn period_map(records: &[RawRecord], value_field: &str, aliases: &AliasTable) -> PeriodMap {
    let normalized = Normalizer::new(aliases.clone())
        .with_name_field(COUNTRY_FIELD)
        .with_numeric_field(value_field)
        .normalize_all(records);

    PeriodMap::build(
        &normalized,
        YEAR_FIELD,
        COUNTRY_FIELD,
        value_field,
        MAP_WINDOW_WIDTH,
    )
}

/// Map data for one selected period
pub fn period_view(map: &PeriodMap, selected: &str) -> PeriodView {
    let totals = select_period(map, selected);
    if totals.is_empty() {
        debug!("No data for period {}", selected);
    }

    PeriodView {
        width: map.width(),
        selected: selected.to_string(),
        periods: map.periods(),
        max_total: totals.max_total().unwrap_or(0.0),
        totals,
        by_period: map
            .grouped()
            .iter()
            .map(|(bucket, totals)| (bucket.label(), totals.clone()))
            .collect(),
    }
}

/// Build every chart dataset
///
/// # Arguments
/// * `tables` - Loaded source tables
/// * `config` - Validated pipeline configuration
///
/// # Example
/// ```ignore
/// let tables = load_sources(&config.data_dir, &config.sources)?;
/// let deck = build_deck(&tables, &config);
/// write_deck(&deck, "artifacts/deck.json")?;
/// ```
pub fn build_deck(tables: &SourceTables, config: &PipelineConfig) -> ChartDeck {
    info!("Building chart datasets...");

    let aliases = config.alias_table();
    let filter_3yr = WindowFilter::excluding(&config.windows.exclude_3yr);
    let filter_5yr = WindowFilter::excluding(&config.windows.exclude_5yr);

    let refugee_map = period_map(
        tables.get(SourceTable::PersonsOfConcern),
        REFUGEES_FIELD,
        &aliases,
    );
    let asylum_map = period_map(tables.get(SourceTable::AsylumSeekers), APPLIED_FIELD, &aliases);

    let deck = ChartDeck {
        version: SCHEMA_VERSION.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        seasonal: SeasonalCharts {
            global: seasonal_chart(tables.get(SourceTable::MonthlyGlobal)),
            europe: seasonal_chart(tables.get(SourceTable::MonthlyEurope)),
        },
        windows: WindowCharts {
            three_year: window_chart(
                tables.get(SourceTable::Window3yr),
                WINDOW_3YR_FIELD,
                &filter_3yr,
            ),
            five_year: window_chart(
                tables.get(SourceTable::Window5yr),
                WINDOW_5YR_FIELD,
                &filter_5yr,
            ),
        },
        age_gender: age_gender_chart(tables.get(SourceTable::AgeGender)),
        top_refugee_hosts: top_hosts(
            tables.get(SourceTable::PersonsOfConcern),
            REFUGEES_FIELD,
            config.top_n,
        ),
        top_asylum_hosts: top_hosts(
            tables.get(SourceTable::AsylumSeekers),
            APPLIED_FIELD,
            config.top_n,
        ),
        refugee_map: period_view(&refugee_map, &config.refugee_period),
        asylum_map: period_view(&asylum_map, &config.asylum_period),
        source_rows: tables
            .row_counts()
            .into_iter()
            .map(|(table, rows)| (table.name().to_string(), rows))
            .collect(),
    };

    debug!(
        "Deck: {} refugee periods, {} asylum periods, {} age groups",
        deck.refugee_map.periods.len(),
        deck.asylum_map.periods.len(),
        deck.age_gender.len()
    );

    deck
}
