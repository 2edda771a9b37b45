//! End-to-end tests of load, validation and metric derivation.

use chrono::{NaiveDate, NaiveDateTime};
use epi_dashboard::config::{DataSource, Thresholds};
use epi_dashboard::data::{DataLoader, Dataset, FailureKind, LoadError, REQUIRED_COLUMNS};
use epi_dashboard::stats::{MetricsCalculator, MetricsOutcome};
use epi_dashboard::validate::{Finding, Validator};

const HEADER: &str = "iso_code,continent,location,date,total_cases,total_deaths,population";

fn loader() -> DataLoader {
    DataLoader::new(DataSource::File("owid.csv".into()), Thresholds::default())
}

fn load(body: &str) -> Result<Dataset, LoadError> {
    loader().parse_csv(format!("{HEADER}\n{body}").into_bytes())
}

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 3)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

#[test]
fn us_mortality_and_cases_per_million() {
    let dataset = load(
        "USA,North America,United States,2024-01-01,100,5,1000000\n\
         USA,North America,United States,2024-01-02,120,6,1000000\n",
    )
    .unwrap();

    let outcome = MetricsCalculator::default().derive(&dataset, "United States");
    let metrics = outcome.metrics().expect("metrics for United States");

    assert_eq!(metrics.iso_code, "USA");
    assert_eq!(metrics.max_cases, 120.0);
    assert_eq!(metrics.max_deaths, 6.0);
    assert_eq!(metrics.mortality_rate.format_percent(2), "5.00%");
    assert_eq!(metrics.cases_per_million.format_count(), "120");

    let displays = metrics.displays();
    assert_eq!(displays[0].value, "120");
    assert_eq!(displays[2].value, "5.00%");
    assert_eq!(displays[3].value, "120");
}

#[test]
fn inconsistent_row_is_reported_and_kept() {
    let dataset = load("PER,South America,Peru,2024-01-01,10,15,\n").unwrap();

    let report = Validator::default().validate_at(&dataset, now());
    assert_eq!(report.consistency.inconsistent_rows, 1);
    assert!(report.findings.contains(&Finding::Consistency {
        rows: 1,
        percent: 100.0
    }));

    let outcome = MetricsCalculator::default().derive(&dataset, "Peru");
    let metrics = outcome.metrics().unwrap();
    assert_eq!(metrics.max_deaths, 15.0);
    assert_eq!(metrics.mortality_rate.format_percent(2), "150.00%");
    assert!(metrics.is_high_mortality());
    assert!(metrics.cases_per_million.is_missing());
}

#[test]
fn empty_selection_leaves_other_countries_usable() {
    let dataset = load(
        "PER,South America,Peru,2024-01-01,,,\n\
         PER,South America,Peru,2024-01-02,5,,\n\
         CHL,South America,Chile,2024-01-01,7,1,\n",
    )
    .unwrap();
    let calculator = MetricsCalculator::default();

    assert_eq!(
        calculator.derive(&dataset, "Peru"),
        MetricsOutcome::Empty {
            location: "Peru".to_string(),
            source_rows: 2
        }
    );
    assert!(calculator.derive(&dataset, "Chile").metrics().is_some());
    assert_eq!(dataset.locations(), vec!["Chile", "Peru"]);
}

#[test]
fn every_required_column_is_enforced() {
    for missing in REQUIRED_COLUMNS {
        let header: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| *c != missing)
            .collect();
        let row = vec!["1"; header.len()].join(",");
        let csv = format!("{}\n{}\n", header.join(","), row);

        let err = loader().parse_csv(csv.into_bytes()).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Structure, "missing {missing}");
        assert!(err.to_string().contains(missing));
    }
}

#[test]
fn pre_outbreak_dates_are_a_load_warning() {
    let dataset = load(
        "CHN,Asia,China,2019-11-30,1,0,\n\
         CHN,Asia,China,2020-01-05,10,1,\n",
    )
    .unwrap();
    let report = Validator::default().validate_at(&dataset, now());

    assert!(!report.dates_in_range());
    assert_eq!(
        report.findings[0],
        Finding::Freshness {
            earliest: NaiveDate::from_ymd_opt(2019, 11, 30).unwrap(),
            rows: 1
        }
    );
    // Still usable downstream.
    assert!(MetricsCalculator::default()
        .derive(&dataset, "China")
        .metrics()
        .is_some());
}

#[test]
fn stale_dataset_is_flagged() {
    let dataset = load("USA,North America,United States,2023-12-01,1,0,\n").unwrap();
    let report = Validator::default().validate_at(&dataset, now());
    assert_eq!(report.freshness.days_since_update, Some(33));
    assert!(report.is_stale());
}

#[test]
fn report_serializes_to_json() {
    let dataset = load("USA,North America,United States,2024-01-01,100,5,\n").unwrap();
    let report = Validator::default().validate_at(&dataset, now());
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["total_rows"], 1);
    assert_eq!(json["completeness"]["cases_pct"], 100.0);
    assert_eq!(json["freshness"]["latest"], "2024-01-01");
    assert_eq!(json["findings"][0]["kind"], "consistency_ok");
}
