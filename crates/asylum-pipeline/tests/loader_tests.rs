use asylum_pipeline::aggregator::Month;
use asylum_pipeline::charts::build_deck;
use asylum_pipeline::parser::{load_sources, load_table, SourceTable};
use asylum_pipeline::utils::config::{PipelineConfig, SourceFiles, WindowsConfig};
use asylum_pipeline::utils::error::LoadError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const MONTHLY: &str = "Month,Value\nJanuary,100\nFebruary,\"1,200\"\nJanuary,300\n";
const WINDOW_3YR: &str =
    "Window_3yr,Month,Value\n2015-2017,January,10\n2018-2020,January,20\n2015-2017,March,30\n";
const WINDOW_5YR: &str = "Window_5yr,Month,Value\n2015-2019,May,7\n";
const AGE_GENDER: &str = "Age Group,Male Count,Female Count\n0-4,10,12\n18-59,40,35\n";
const PERSONS: &str = "Year,Country / territory of asylum/residence,Origin,Refugees (incl. refugee-like situations)\n\
2016,United States,Various,\"1,000\"\n\
2018,United States,Various,500\n\
2016,Canada,Various,\"2,000\"\n";
const ASYLUM: &str = "Year,Country / territory of asylum/residence,Origin,Applied during year\n\
2016,Germany,Syria,\"700,000\"\n\
2011,Sweden,Syria,20\n";
const DEMOGRAPHICS: &str = "Year,Country / territory of asylum/residence,Total\n2016,Chad,5\n";

fn write_data_dir(dir: &Path, files: &SourceFiles) {
    let contents = [
        (SourceTable::MonthlyGlobal, MONTHLY),
        (SourceTable::MonthlyEurope, MONTHLY),
        (SourceTable::Window3yr, WINDOW_3YR),
        (SourceTable::Window5yr, WINDOW_5YR),
        (SourceTable::AgeGender, AGE_GENDER),
        (SourceTable::PersonsOfConcern, PERSONS),
        (SourceTable::AsylumSeekers, ASYLUM),
        (SourceTable::Demographics, DEMOGRAPHICS),
    ];
    for (table, csv) in contents {
        fs::write(dir.join(table.file_name(files)), csv).unwrap();
    }
}

#[test]
fn test_load_sources_reads_every_table() {
    let dir = TempDir::new().unwrap();
    let files = SourceFiles::default();
    write_data_dir(dir.path(), &files);

    let tables = load_sources(dir.path(), &files).unwrap();

    assert_eq!(tables.get(SourceTable::PersonsOfConcern).len(), 3);
    assert_eq!(tables.get(SourceTable::AsylumSeekers).len(), 2);
    assert_eq!(tables.get(SourceTable::Demographics).len(), 1);
}

#[test]
fn test_load_sources_reports_every_missing_table() {
    let dir = TempDir::new().unwrap();
    let files = SourceFiles::default();
    write_data_dir(dir.path(), &files);
    fs::remove_file(dir.path().join(&files.age_gender)).unwrap();
    fs::remove_file(dir.path().join(&files.demographics)).unwrap();

    match load_sources(dir.path(), &files) {
        Err(LoadError::Sources(failures)) => {
            let mut names: Vec<&str> = failures.iter().map(|f| f.table.as_str()).collect();
            names.sort();
            assert_eq!(names, vec!["age_gender", "demographics"]);
        }
        other => panic!("expected aggregate load error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_load_table_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = load_table(dir.path().join("nope.csv"));
    assert!(matches!(result, Err(LoadError::Io { .. })));
}

#[test]
fn test_build_deck_from_data_dir() {
    let dir = TempDir::new().unwrap();
    let config = PipelineConfig {
        data_dir: dir.path().to_path_buf(),
        top_n: 1,
        asylum_period: "2010-2014".to_string(),
        windows: WindowsConfig {
            exclude_3yr: vec!["2018-2020".to_string()],
            exclude_5yr: Vec::new(),
        },
        ..Default::default()
    };
    write_data_dir(dir.path(), &config.sources);

    let tables = load_sources(&config.data_dir, &config.sources).unwrap();
    let deck = build_deck(&tables, &config);

    // January averages (100 + 300) / 2
    assert_eq!(deck.seasonal.global[0].value, 200.0);
    assert_eq!(deck.seasonal.global.len(), 2);

    // 2018-2020 is excluded; the rest comes out as {window, month, value}
    assert_eq!(deck.windows.three_year.len(), 2);
    assert!(deck.windows.three_year.iter().all(|p| p.window == "2015-2017"));
    assert_eq!(deck.windows.three_year[0].month, Month::January);
    assert_eq!(deck.windows.three_year[1].value, 30.0);
    assert_eq!(deck.windows.five_year.len(), 1);

    assert_eq!(deck.age_gender.len(), 2);

    assert_eq!(deck.top_refugee_hosts.len(), 1);
    assert_eq!(deck.top_refugee_hosts[0].country, "Canada");

    // Rankings keep the names from the table; maps use canonical names
    assert_eq!(
        deck.refugee_map.totals.get("United States of America"),
        Some(1500.0)
    );
    assert_eq!(deck.refugee_map.max_total, 2000.0);

    assert_eq!(deck.asylum_map.selected, "2010-2014");
    assert_eq!(deck.asylum_map.totals.get("Sweden"), Some(20.0));
    assert_eq!(deck.asylum_map.periods, vec!["2010-2014", "2015-2019"]);

    assert_eq!(deck.source_rows.get("persons_of_concern"), Some(&3));
}
