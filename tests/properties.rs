//! Property tests for the validation and metric invariants.

use chrono::{Days, NaiveDate, NaiveDateTime};
use epi_dashboard::data::{Dataset, Measure, Record};
use epi_dashboard::stats::MetricsCalculator;
use epi_dashboard::validate::{Finding, Validator};
use proptest::prelude::*;

type Counts = Vec<(Option<f64>, Option<f64>)>;

fn counts(max_len: usize) -> impl Strategy<Value = Counts> {
    prop::collection::vec(
        (
            prop::option::of(0.0..1.0e6f64),
            prop::option::of(0.0..1.0e6f64),
        ),
        0..max_len,
    )
}

fn dataset(counts: &[(Option<f64>, Option<f64>)]) -> Dataset {
    let start = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
    let records = counts
        .iter()
        .enumerate()
        .map(|(i, &(cases, deaths))| {
            Record::new(
                "Peru",
                start + Days::new(i as u64),
                Measure::from_option(cases),
                Measure::from_option(deaths),
            )
        })
        .collect();
    Dataset::new(records, false)
}

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

proptest! {
    #[test]
    fn validate_is_idempotent(c in counts(60)) {
        let dataset = dataset(&c);
        let validator = Validator::default();
        prop_assert_eq!(validator.validate_at(&dataset, now()), validator.validate_at(&dataset, now()));
    }

    #[test]
    fn inconsistent_rows_stay_in_aggregates(c in counts(40)) {
        let dataset = dataset(&c);
        let complete: Vec<(f64, f64)> = c
            .iter()
            .filter_map(|&(cases, deaths)| Some((cases?, deaths?)))
            .collect();

        let report = Validator::default().validate_at(&dataset, now());
        let expected_inconsistent = complete.iter().filter(|(cases, deaths)| deaths > cases).count();
        prop_assert_eq!(report.consistency.inconsistent_rows, expected_inconsistent);
        prop_assert_eq!(report.total_rows, c.len());

        let outcome = MetricsCalculator::default().derive(&dataset, "Peru");
        match outcome.metrics() {
            None => prop_assert!(complete.is_empty()),
            Some(metrics) => {
                let max_deaths = complete.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
                let max_cases = complete.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
                prop_assert_eq!(metrics.slice.len(), complete.len());
                prop_assert_eq!(metrics.max_deaths, max_deaths);
                prop_assert_eq!(metrics.max_cases, max_cases);
            }
        }
    }

    #[test]
    fn zero_cases_never_divides(deaths in prop::collection::vec(0.0..1.0e3f64, 1..10)) {
        let c: Counts = deaths.iter().map(|&d| (Some(0.0), Some(d))).collect();
        let outcome = MetricsCalculator::default().derive(&dataset(&c), "Peru");
        let metrics = outcome.metrics().unwrap();
        prop_assert!(metrics.mortality_rate.is_missing());
        let displays = metrics.displays();
        prop_assert_eq!(displays[2].value.as_str(), "N/A");
    }

    #[test]
    fn charts_need_six_rows(n in 1usize..20) {
        let c: Counts = (0..n).map(|i| (Some(i as f64 * 10.0), Some(i as f64))).collect();
        let outcome = MetricsCalculator::default().derive(&dataset(&c), "Peru");
        let metrics = outcome.metrics().unwrap();
        let warned = metrics.findings.contains(&Finding::InsufficientHistory { rows: n });

        if n <= 5 {
            prop_assert!(metrics.time_series().is_none());
            prop_assert!(warned);
        } else {
            let series = metrics.time_series().unwrap();
            prop_assert_eq!(series.cases.len(), n);
            prop_assert_eq!(series.deaths.len(), n);
            prop_assert!(!warned);
        }
    }
}
