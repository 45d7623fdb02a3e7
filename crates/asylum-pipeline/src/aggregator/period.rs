//! Period-sliced country totals for the choropleth maps.
//!
//! A `PeriodMap` is the period → country → total structure built once per
//! source table. Which period is shown is decided by the caller and passed
//! in; the map itself holds no selection state.

use super::bucket::{bucket, parse_year, PeriodBucket};
use super::grouping::{group_nested, Grouped, Totals};
use crate::normalize::NormalizedRecord;
use log::debug;

/// Country totals grouped by fixed-width period
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodMap {
    width: u32,
    groups: Grouped<PeriodBucket, String>,
}

impl PeriodMap {
    /// Bucket records by year and group by country
    ///
    /// Records with an unbucketable year or a blank country are skipped.
    ///
    /// # Arguments
    /// * `records` - Normalized records (country names already canonical)
    /// * `year_field` / `country_field` / `value_field` - Column names
    /// * `width` - Period width in years
    pub fn build<'a, I>(
        records: I,
        year_field: &str,
        country_field: &str,
        value_field: &str,
        width: u32,
    ) -> Self
    where
        I: IntoIterator<Item = &'a NormalizedRecord>,
    {
        let groups = group_nested(
            records,
            |r: &NormalizedRecord| parse_year(r.text(year_field)).and_then(|y| bucket(y, width)),
            |r: &NormalizedRecord| r.text(country_field).map(str::to_string),
            |r: &NormalizedRecord| r.number(value_field),
        );

        debug!("Built period map with {} periods", groups.len());

        Self::from_grouped(width, groups)
    }

    pub fn from_grouped(width: u32, groups: Grouped<PeriodBucket, String>) -> Self {
        Self { width, groups }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Periods with data, oldest first
    pub fn buckets(&self) -> Vec<PeriodBucket> {
        let mut buckets: Vec<PeriodBucket> = self.groups.outer_keys().copied().collect();
        buckets.sort();
        buckets
    }

    /// Labels of the periods with data, oldest first
    pub fn periods(&self) -> Vec<String> {
        self.buckets().iter().map(PeriodBucket::label).collect()
    }

    /// Country totals for one period
    ///
    /// A label with no data (or one that is not a period label at all)
    /// yields an empty mapping; "no data for this period" is a valid state.
    pub fn select(&self, label: &str) -> Totals<String> {
        label
            .parse::<PeriodBucket>()
            .ok()
            .and_then(|b| self.groups.get(&b))
            .cloned()
            .unwrap_or_default()
    }

    /// Largest country total in a period, 0 when the period is empty
    pub fn max_total(&self, label: &str) -> f64 {
        self.select(label).max_total().unwrap_or(0.0)
    }

    pub fn grouped(&self) -> &Grouped<PeriodBucket, String> {
        &self.groups
    }
}

/// Slice a period map by the caller's selected label
pub fn select_period(map: &PeriodMap, label: &str) -> Totals<String> {
    map.select(label)
}
