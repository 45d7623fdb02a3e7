//! Aggregation of normalized records into chart series.
//!
//! This module transforms normalized records into:
//! - Fixed-width period buckets (3- and 5-year windows)
//! - Grouped totals (single- and two-level)
//! - Top-N rankings
//! - Seasonal and windowed monthly series
//! - Period-sliced country totals

pub mod bucket;
pub mod grouping;
pub mod period;
pub mod ranking;
pub mod seasonal;

// Re-export main types and functions
pub use bucket::{bucket, parse_year, PeriodBucket, MAX_YEAR};
pub use grouping::{group_nested, group_sum, AggregateEntry, Grouped, Reduction, Tally, Totals};
pub use period::{select_period, PeriodMap};
pub use ranking::rank_top_n;
pub use seasonal::{
    flatten_windows, seasonal_series, windowed_series, Month, MonthlyPoint, WindowPoint,
    WindowSeries,
};
