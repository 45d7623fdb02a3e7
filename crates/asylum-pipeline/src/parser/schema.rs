//! Output JSON schema definitions for chart data.
//!
//! This module defines the structure of the deck file we write to disk.
//! Schema is versioned to allow future evolution.

use crate::aggregator::{MonthlyPoint, Totals, WindowPoint};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level chart deck written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDeck {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the deck was generated
    pub generated_at: String,

    /// Average monthly applications, global and Europe-only
    pub seasonal: SeasonalCharts,

    /// Monthly averages per 3- and 5-year window
    pub windows: WindowCharts,

    /// Male/female counts per age group
    pub age_gender: Vec<DemographicSlice>,

    /// Countries hosting the most refugees over all years
    pub top_refugee_hosts: Vec<CountryTotal>,

    /// Countries receiving the most asylum applications over all years
    pub top_asylum_hosts: Vec<CountryTotal>,

    /// Refugees hosted per country, by 5-year period
    pub refugee_map: PeriodView,

    /// Asylum applications per country, by 5-year period
    pub asylum_map: PeriodView,

    /// Number of rows read from each source table
    pub source_rows: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonalCharts {
    pub global: Vec<MonthlyPoint>,
    pub europe: Vec<MonthlyPoint>,
}

/// `{window, month, value}` points, windows in first-seen order and months
/// in calendar order within each window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowCharts {
    pub three_year: Vec<WindowPoint>,
    pub five_year: Vec<WindowPoint>,
}

impl WindowCharts {
    /// Distinct window labels of a set of points, in order
    pub fn windows(points: &[WindowPoint]) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for point in points {
            if labels.last() != Some(&point.window.as_str()) {
                labels.push(&point.window);
            }
        }
        labels
    }
}

/// One pie of the age/gender chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicSlice {
    pub age_group: String,
    pub male: f64,
    pub female: f64,
}

impl DemographicSlice {
    pub fn total(&self) -> f64 {
        self.male + self.female
    }
}

/// A bar of a hosting-country ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryTotal {
    pub country: String,
    pub total: f64,
}

/// Map data: one selected period plus every period for switching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodView {
    /// Period width in years
    pub width: u32,

    /// Currently selected period label
    pub selected: String,

    /// Every period with data, oldest first
    pub periods: Vec<String>,

    /// Country totals of the selected period (empty when it has no data)
    pub totals: Totals<String>,

    /// Largest total of the selected period, 0 when empty (colour scale domain)
    pub max_total: f64,

    /// Country totals of every period
    pub by_period: BTreeMap<String, Totals<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::Month;

    fn point(window: &str, month: Month) -> WindowPoint {
        WindowPoint {
            window: window.to_string(),
            month,
            value: 1.0,
        }
    }

    #[test]
    fn test_window_labels_in_order() {
        let points = vec![
            point("2018-2020", Month::January),
            point("2018-2020", Month::May),
            point("2015-2017", Month::January),
        ];
        assert_eq!(WindowCharts::windows(&points), vec!["2018-2020", "2015-2017"]);
        assert!(WindowCharts::windows(&[]).is_empty());
    }
}
