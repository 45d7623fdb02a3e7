use asylum_pipeline::aggregator::{Month, MonthlyPoint, Totals, WindowPoint};
use asylum_pipeline::output::{read_deck, validate_path, write_deck};
use asylum_pipeline::utils::error::OutputError;
use asylum_pipeline::parser::schema::{
    ChartDeck, CountryTotal, DemographicSlice, PeriodView, SeasonalCharts, WindowCharts,
};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

fn create_test_view() -> PeriodView {
    let mut totals = Totals::new();
    totals.add("Canada".to_string(), 2000.0);
    totals.add("United States of America".to_string(), 1500.0);

    let mut by_period = BTreeMap::new();
    by_period.insert("2015-2019".to_string(), totals.clone());

    PeriodView {
        width: 5,
        selected: "2015-2019".to_string(),
        periods: vec!["2015-2019".to_string()],
        totals,
        max_total: 2000.0,
        by_period,
    }
}

fn create_test_deck() -> ChartDeck {
    ChartDeck {
        version: "1.0.0".to_string(),
        generated_at: "2024-01-01T00:00:00+00:00".to_string(),
        seasonal: SeasonalCharts {
            global: vec![MonthlyPoint {
                month: Month::January,
                value: 200.0,
            }],
            europe: Vec::new(),
        },
        windows: WindowCharts {
            three_year: vec![WindowPoint {
                window: "2015-2017".to_string(),
                month: Month::March,
                value: 30.0,
            }],
            five_year: Vec::new(),
        },
        age_gender: vec![DemographicSlice {
            age_group: "0-4".to_string(),
            male: 10.0,
            female: 12.0,
        }],
        top_refugee_hosts: vec![CountryTotal {
            country: "Canada".to_string(),
            total: 2000.0,
        }],
        top_asylum_hosts: Vec::new(),
        refugee_map: create_test_view(),
        asylum_map: create_test_view(),
        source_rows: BTreeMap::new(),
    }
}

#[test]
fn test_write_and_read_deck() {
    let deck = create_test_deck();
    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    write_deck(&deck, path).unwrap();
    let loaded = read_deck(path).unwrap();

    assert_eq!(loaded, deck);
}

#[test]
fn test_write_deck_creates_parent_dirs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("artifacts").join("nested").join("charts.json");

    write_deck(&create_test_deck(), &path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_deck_json_shape() {
    let json = serde_json::to_value(create_test_deck()).unwrap();

    assert_eq!(json["refugee_map"]["totals"]["Canada"], 2000.0);
    assert_eq!(json["seasonal"]["global"][0]["month"], "January");
    assert_eq!(json["top_refugee_hosts"][0]["country"], "Canada");
    assert_eq!(json["windows"]["three_year"][0]["window"], "2015-2017");
    assert_eq!(json["windows"]["three_year"][0]["month"], "March");
    assert_eq!(json["windows"]["three_year"][0]["value"], 30.0);
}

#[test]
fn test_validate_output_path_empty() {
    assert!(validate_path(Path::new("")).is_err());
}

#[test]
fn test_validate_output_path_directory() {
    let dir = TempDir::new().unwrap();
    assert!(validate_path(dir.path()).is_err());
}

#[test]
fn test_read_deck_missing_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("charts.json");

    match read_deck(&missing) {
        Err(OutputError::ReadFailed { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected read error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_read_deck_rejects_garbage() {
    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), "{ not json").unwrap();
    assert!(read_deck(temp_file.path()).is_err());
}
