//! Source table loading and schema definitions.
//!
//! This module handles:
//! - Reading CSV tables into raw text records
//! - Loading every source table of a data directory
//! - Defining the chart deck output schema

pub mod loader;
pub mod record;
pub mod schema;

// Re-export main types
pub use loader::{load_sources, load_table, read_records, SourceTable, SourceTables};
pub use record::RawRecord;
pub use schema::{ChartDeck, CountryTotal, DemographicSlice, PeriodView, SeasonalCharts, WindowCharts};
