use asylum_pipeline::aggregator::{rank_top_n, select_period, PeriodBucket, Totals};
use asylum_pipeline::charts::{period_map, period_view, top_hosts};
use asylum_pipeline::normalize::AliasTable;
use asylum_pipeline::parser::RawRecord;
use asylum_pipeline::utils::config::{COUNTRY_FIELD, REFUGEES_FIELD, YEAR_FIELD};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

fn poc(country: &str, year: &str, refugees: &str) -> RawRecord {
    RawRecord::from_pairs([
        (COUNTRY_FIELD, country),
        (YEAR_FIELD, year),
        (REFUGEES_FIELD, refugees),
    ])
}

fn scenario() -> Vec<RawRecord> {
    vec![
        poc("United States", "2016", "1,000"),
        poc("United States", "2018", "500"),
        poc("Canada", "2016", "2,000"),
    ]
}

fn sorted(totals: &Totals<String>) -> BTreeMap<String, f64> {
    totals.iter().map(|(k, v)| (k.clone(), v)).collect()
}

#[test]
fn test_end_to_end_period_selection() {
    let map = period_map(&scenario(), REFUGEES_FIELD, &AliasTable::with_defaults());
    let selected = select_period(&map, "2015-2019");

    let expected: BTreeMap<String, f64> = [
        ("Canada".to_string(), 2000.0),
        ("United States of America".to_string(), 1500.0),
    ]
    .into_iter()
    .collect();

    assert_eq!(sorted(&selected), expected);
    assert_eq!(map.periods(), vec!["2015-2019".to_string()]);
}

#[test]
fn test_end_to_end_top_one() {
    let map = period_map(&scenario(), REFUGEES_FIELD, &AliasTable::with_defaults());
    let top = rank_top_n(&select_period(&map, "2015-2019"), 1);

    assert_eq!(top.len(), 1);
    assert_eq!(top[0].key, "Canada");
    assert_eq!(top[0].total, 2000.0);
}

#[test]
fn test_absent_period_is_empty() {
    let map = period_map(&scenario(), REFUGEES_FIELD, &AliasTable::with_defaults());
    assert!(select_period(&map, "1990-1994").is_empty());
    assert!(select_period(&map, "not a period").is_empty());
    assert_eq!(map.max_total("1990-1994"), 0.0);
}

#[test]
fn test_aggregation_ignores_input_order() {
    let forward = scenario();
    let mut reversed = scenario();
    reversed.reverse();

    let aliases = AliasTable::with_defaults();
    let a = period_map(&forward, REFUGEES_FIELD, &aliases);
    let b = period_map(&reversed, REFUGEES_FIELD, &aliases);

    assert_eq!(
        sorted(&select_period(&a, "2015-2019")),
        sorted(&select_period(&b, "2015-2019"))
    );
}

#[test]
fn test_records_without_keys_are_excluded() {
    let mut records = scenario();
    let baseline = period_map(&records, REFUGEES_FIELD, &AliasTable::with_defaults());

    records.push(poc("", "2016", "999"));
    records.push(poc("Chad", "", "999"));
    records.push(poc("Chad", "abc", "999"));
    records.push(poc("Chad", "0", "999"));
    records.push(RawRecord::from_pairs([(REFUGEES_FIELD, "5")]));

    let with_junk = period_map(&records, REFUGEES_FIELD, &AliasTable::with_defaults());

    assert_eq!(
        sorted(&select_period(&with_junk, "2015-2019")),
        sorted(&select_period(&baseline, "2015-2019"))
    );
    assert_eq!(with_junk.periods(), baseline.periods());
}

#[test]
fn test_out_of_range_years_are_excluded() {
    let records = vec![
        poc("Chad", "2016", "10"),
        poc("Chad", "1e30", "999"),
        poc("Chad", "99999999999999999999", "999"),
    ];
    let map = period_map(&records, REFUGEES_FIELD, &AliasTable::new());
    let view = period_view(&map, "2015-2019");

    assert_eq!(view.periods, vec!["2015-2019"]);
    assert_eq!(view.totals.get("Chad"), Some(10.0));
    assert_eq!(view.by_period.len(), 1);
}

#[test]
fn test_adjacent_periods() {
    let records = vec![
        poc("Kenya", "2019", "10"),
        poc("Kenya", "2020", "20"),
        poc("Kenya", "2024", "5"),
    ];
    let map = period_map(&records, REFUGEES_FIELD, &AliasTable::new());

    assert_eq!(map.periods(), vec!["2015-2019", "2020-2024"]);
    assert_eq!(select_period(&map, "2020-2024").get("Kenya"), Some(25.0));

    let first: PeriodBucket = "2015-2019".parse().unwrap();
    let second: PeriodBucket = "2020-2024".parse().unwrap();
    assert_eq!(second.start(), first.end() + 1);
}

#[test]
fn test_top_hosts_ties_keep_first_seen_order() {
    let records = vec![
        poc("A", "2016", "10"),
        poc("B", "2016", "10"),
        poc("C", "2016", "5"),
    ];

    let names = |n| {
        top_hosts(&records, REFUGEES_FIELD, n)
            .into_iter()
            .map(|h| h.country)
            .collect::<Vec<_>>()
    };

    assert_eq!(names(10), vec!["A", "B", "C"]);
    assert_eq!(names(2), vec!["A", "B"]);
    assert!(names(0).is_empty());
}

#[test]
fn test_malformed_numbers_count_as_zero() {
    let records = vec![
        poc("Peru", "2016", "abc"),
        poc("Peru", "2017", ""),
        poc("Peru", "2018", "12,345"),
    ];
    let map = period_map(&records, REFUGEES_FIELD, &AliasTable::new());
    assert_eq!(select_period(&map, "2015-2019").get("Peru"), Some(12345.0));
}
