//! CSV loading for the source tables.
//!
//! All tables are read concurrently and collected together. The load only
//! succeeds if every table loads; otherwise one `LoadError::Sources` names
//! every table that failed.

use super::record::RawRecord;
use crate::utils::config::SourceFiles;
use crate::utils::error::{LoadError, SourceFailure};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::thread;

/// The source tables the charts are built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceTable {
    MonthlyGlobal,
    MonthlyEurope,
    Window3yr,
    Window5yr,
    AgeGender,
    PersonsOfConcern,
    AsylumSeekers,
    Demographics,
}

impl SourceTable {
    pub const ALL: [SourceTable; 8] = [
        SourceTable::MonthlyGlobal,
        SourceTable::MonthlyEurope,
        SourceTable::Window3yr,
        SourceTable::Window5yr,
        SourceTable::AgeGender,
        SourceTable::PersonsOfConcern,
        SourceTable::AsylumSeekers,
        SourceTable::Demographics,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SourceTable::MonthlyGlobal => "monthly_global",
            SourceTable::MonthlyEurope => "monthly_europe",
            SourceTable::Window3yr => "window_3yr",
            SourceTable::Window5yr => "window_5yr",
            SourceTable::AgeGender => "age_gender",
            SourceTable::PersonsOfConcern => "persons_of_concern",
            SourceTable::AsylumSeekers => "asylum_seekers",
            SourceTable::Demographics => "demographics",
        }
    }

    /// Configured file name of this table
    pub fn file_name<'a>(&self, files: &'a SourceFiles) -> &'a str {
        match self {
            SourceTable::MonthlyGlobal => &files.monthly_global,
            SourceTable::MonthlyEurope => &files.monthly_europe,
            SourceTable::Window3yr => &files.window_3yr,
            SourceTable::Window5yr => &files.window_5yr,
            SourceTable::AgeGender => &files.age_gender,
            SourceTable::PersonsOfConcern => &files.persons_of_concern,
            SourceTable::AsylumSeekers => &files.asylum_seekers,
            SourceTable::Demographics => &files.demographics,
        }
    }
}

/// Every loaded table, keyed by table
#[derive(Debug, Clone, Default)]
pub struct SourceTables {
    tables: HashMap<SourceTable, Vec<RawRecord>>,
}

impl SourceTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, table: SourceTable, records: Vec<RawRecord>) {
        self.tables.insert(table, records);
    }

    /// Records of a table; a table that was never inserted reads as empty
    pub fn get(&self, table: SourceTable) -> &[RawRecord] {
        self.tables.get(&table).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Row count per table, in `SourceTable::ALL` order
    pub fn row_counts(&self) -> Vec<(SourceTable, usize)> {
        SourceTable::ALL
            .iter()
            .map(|t| (*t, self.get(*t).len()))
            .collect()
    }
}

/// Read CSV text into raw records
///
/// The first row is the header. Rows shorter than the header simply lack the
/// trailing fields. Unreadable rows are logged and skipped.
///
/// # Errors
/// * `LoadError::Csv` - The header row cannot be read
pub fn read_records<R: Read>(reader: R) -> Result<Vec<RawRecord>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut records = Vec::new();

    for (index, result) in csv_reader.records().enumerate() {
        match result {
            Ok(row) => records.push(RawRecord::from_pairs(
                headers.iter().map(String::as_str).zip(row.iter()),
            )),
            Err(e) => {
                // Log but don't fail - one bad row should not sink the table
                warn!("Skipping unreadable row {}: {}", index + 2, e);
            }
        }
    }

    Ok(records)
}

/// Load one CSV file
///
/// # Errors
/// * `LoadError::Io` - File cannot be opened
/// * `LoadError::Csv` - Header row cannot be read
pub fn load_table(path: impl AsRef<Path>) -> Result<Vec<RawRecord>, LoadError> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = read_records(file)?;
    debug!("Loaded {} rows from {}", records.len(), path.display());

    Ok(records)
}

/// Load every source table from `data_dir`
///
/// Tables are read on scoped threads and all results are collected before
/// deciding: any failure fails the whole load.
///
/// # Errors
/// * `LoadError::Sources` - One or more tables failed, all of them listed
pub fn load_sources(data_dir: &Path, files: &SourceFiles) -> Result<SourceTables, LoadError> {
    info!("Loading {} source tables from {}", SourceTable::ALL.len(), data_dir.display());

    let results: Vec<(SourceTable, Result<Vec<RawRecord>, String>)> = thread::scope(|scope| {
        let handles: Vec<_> = SourceTable::ALL
            .iter()
            .map(|&table| {
                let path = data_dir.join(table.file_name(files));
                (table, scope.spawn(move || load_table(path)))
            })
            .collect();

        handles
            .into_iter()
            .map(|(table, handle)| {
                let result = match handle.join() {
                    Ok(loaded) => loaded.map_err(|e| e.to_string()),
                    Err(_) => Err("loader thread panicked".to_string()),
                };
                (table, result)
            })
            .collect()
    });

    let mut tables = SourceTables::new();
    let mut failures = Vec::new();

    for (table, result) in results {
        match result {
            Ok(records) => tables.insert(table, records),
            Err(reason) => failures.push(SourceFailure {
                table: table.name().to_string(),
                reason,
            }),
        }
    }

    if !failures.is_empty() {
        return Err(LoadError::Sources(failures));
    }

    info!("All source tables loaded");
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_records() {
        let csv = "Country,Year,Count\nKenya,2016,\"1,000\"\n  Chad , 2017 ,5\nShort\n";
        let records = read_records(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].get("Count"), Some("1,000"));
        assert_eq!(records[1].get("Country"), Some("Chad"));
        assert_eq!(records[1].get("Year"), Some("2017"));
        assert_eq!(records[2].get("Country"), Some("Short"));
        assert_eq!(records[2].get("Year"), None);
    }

    #[test]
    fn test_read_records_strips_bom() {
        let csv = "\u{feff}Month,Value\nJanuary,3\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records[0].get("Month"), Some("January"));
    }

    #[test]
    fn test_read_records_header_only() {
        let records = read_records("Month,Value\n".as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_source_tables_missing_table_is_empty() {
        let tables = SourceTables::new();
        assert!(tables.get(SourceTable::AgeGender).is_empty());
        assert_eq!(tables.row_counts().len(), 8);
    }

    #[test]
    fn test_file_names_follow_config() {
        let files = SourceFiles {
            demographics: "demo.csv".to_string(),
            ..Default::default()
        };
        assert_eq!(SourceTable::Demographics.file_name(&files), "demo.csv");
        assert_eq!(SourceTable::AsylumSeekers.file_name(&files), "asylum_seekers.csv");
    }
}
