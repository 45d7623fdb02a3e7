//! Seasonal (per-month) and windowed monthly series.
//!
//! Monthly series always come out in calendar order, January first,
//! whatever order the source rows were in.

use super::grouping::{group_nested, group_sum, Reduction, Totals};
use crate::normalize::NormalizedRecord;
use crate::utils::error::MonthParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All months in canonical order
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    pub fn from_number(number: u32) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|i| Month::ALL.get(i as usize))
            .copied()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = MonthParseError;

    /// Accepts full names, three-letter abbreviations ("Sept" too) and
    /// numbers 1-12, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Ok(number) = trimmed.parse::<u32>() {
            return Month::from_number(number).ok_or_else(|| MonthParseError(s.to_string()));
        }

        let lower = trimmed.to_lowercase();
        Month::ALL
            .iter()
            .copied()
            .find(|m| {
                let name = m.name().to_lowercase();
                lower == name || lower == name[..3] || (lower == "sept" && *m == Month::September)
            })
            .ok_or_else(|| MonthParseError(s.to_string()))
    }
}

/// One point of a monthly line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub month: Month,
    pub value: f64,
}

/// A monthly line for one window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSeries {
    pub window: String,
    pub points: Vec<MonthlyPoint>,
}

/// Flattened `{window, month, value}` triple
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowPoint {
    pub window: String,
    pub month: Month,
    pub value: f64,
}

fn month_of(record: &NormalizedRecord, month_field: &str) -> Option<Month> {
    record.text(month_field).and_then(|m| m.parse().ok())
}

fn ordered_points(totals: &Totals<Month>, reduction: Reduction) -> Vec<MonthlyPoint> {
    Month::ALL
        .iter()
        .filter_map(|month| {
            totals.tally(month).map(|tally| MonthlyPoint {
                month: *month,
                value: tally.reduce(reduction),
            })
        })
        .collect()
}

/// Aggregate records into one value per calendar month
///
/// Rows whose month does not parse are skipped; months with no rows are
/// left out rather than reported as zero.
pub fn seasonal_series<'a, I>(
    records: I,
    month_field: &str,
    value_field: &str,
    reduction: Reduction,
) -> Vec<MonthlyPoint>
where
    I: IntoIterator<Item = &'a NormalizedRecord>,
{
    let totals = group_sum(
        records,
        |r: &NormalizedRecord| month_of(r, month_field),
        |r: &NormalizedRecord| r.number(value_field),
    );
    ordered_points(&totals, reduction)
}

/// Aggregate records into one monthly line per window
///
/// `window_field` holds a precomputed window label (e.g. "Window_3yr").
/// Windows appear in the order they were first seen; points inside each
/// window are in calendar order.
pub fn windowed_series<'a, I>(
    records: I,
    window_field: &str,
    month_field: &str,
    value_field: &str,
    reduction: Reduction,
) -> Vec<WindowSeries>
where
    I: IntoIterator<Item = &'a NormalizedRecord>,
{
    let grouped = group_nested(
        records,
        |r: &NormalizedRecord| r.text(window_field).map(str::to_string),
        |r: &NormalizedRecord| month_of(r, month_field),
        |r: &NormalizedRecord| r.number(value_field),
    );

    grouped
        .iter()
        .map(|(window, totals)| WindowSeries {
            window: window.clone(),
            points: ordered_points(totals, reduction),
        })
        .collect()
}

/// Flatten window lines into `{window, month, value}` triples
pub fn flatten_windows(series: &[WindowSeries]) -> Vec<WindowPoint> {
    series
        .iter()
        .flat_map(|s| {
            s.points.iter().map(move |p| WindowPoint {
                window: s.window.clone(),
                month: p.month,
                value: p.value,
            })
        })
        .collect()
}
