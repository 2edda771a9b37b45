//! Dataset Validator Module
//! Completeness, consistency and freshness checks over a loaded dataset.
//!
//! Every check is advisory: the report discloses what it found and the
//! dataset is used unchanged downstream.

use crate::config::Thresholds;
use crate::data::{Dataset, Measure};
use crate::validate::Finding;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Share of rows carrying each cumulative count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Completeness {
    pub cases_pct: Measure,
    pub deaths_pct: Measure,
}

/// Rows where deaths exceed cases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Consistency {
    pub inconsistent_rows: usize,
    pub percent: Measure,
}

impl Consistency {
    pub fn is_consistent(&self) -> bool {
        self.inconsistent_rows == 0
    }
}

/// Age of the most recent observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Freshness {
    pub latest: Option<NaiveDate>,
    pub days_since_update: Option<i64>,
}

/// Outcome of all dataset-level checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub total_rows: usize,
    pub completeness: Completeness,
    pub consistency: Consistency,
    pub freshness: Freshness,
    /// Load-time findings followed by validation findings.
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_warning())
    }

    pub fn is_stale(&self) -> bool {
        self.findings
            .iter()
            .any(|f| matches!(f, Finding::Staleness { .. }))
    }

    /// No observation precedes the pandemic start.
    pub fn dates_in_range(&self) -> bool {
        !self
            .findings
            .iter()
            .any(|f| matches!(f, Finding::Freshness { .. }))
    }
}

/// Runs the dataset checks with a fixed set of thresholds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    thresholds: Thresholds,
}

impl Validator {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Validate against the local wall-clock time.
    pub fn validate(&self, dataset: &Dataset) -> ValidationReport {
        self.validate_at(dataset, Local::now().naive_local())
    }

    /// Validate against a given instant.
    pub fn validate_at(&self, dataset: &Dataset, now: NaiveDateTime) -> ValidationReport {
        let completeness = Self::completeness(dataset);
        let consistency = Self::consistency(dataset);
        let freshness = Self::freshness(dataset, now);

        let mut findings = dataset.load_findings().to_vec();

        if consistency.is_consistent() {
            findings.push(Finding::ConsistencyOk);
        } else {
            let percent = consistency.percent.value().unwrap_or_default();
            warn!(
                rows = consistency.inconsistent_rows,
                "deaths exceed cases in {:.2}% of records",
                percent
            );
            findings.push(Finding::Consistency {
                rows: consistency.inconsistent_rows,
                percent,
            });
        }

        if let (Some(latest), Some(days)) = (freshness.latest, freshness.days_since_update) {
            if days > self.thresholds.stale_after_days {
                warn!(%latest, days, "dataset is stale");
                findings.push(Finding::Staleness { latest, days });
            }
        }

        info!(
            rows = dataset.len(),
            cases_pct = %completeness.cases_pct.format_percent(1),
            deaths_pct = %completeness.deaths_pct.format_percent(1),
            "validation complete"
        );

        ValidationReport {
            total_rows: dataset.len(),
            completeness,
            consistency,
            freshness,
            findings,
        }
    }

    /// Percentage of non-null case and death values.
    pub fn completeness(dataset: &Dataset) -> Completeness {
        let total = Measure::new(dataset.len() as f64);
        let cases = dataset
            .records()
            .iter()
            .filter(|r| r.total_cases.is_known())
            .count();
        let deaths = dataset
            .records()
            .iter()
            .filter(|r| r.total_deaths.is_known())
            .count();

        Completeness {
            cases_pct: Measure::new(cases as f64).percent_of(total),
            deaths_pct: Measure::new(deaths as f64).percent_of(total),
        }
    }

    /// Count of rows with deaths greater than cases.
    pub fn consistency(dataset: &Dataset) -> Consistency {
        let inconsistent_rows = dataset
            .records()
            .iter()
            .filter(|r| r.is_inconsistent())
            .count();
        debug!(inconsistent_rows, "consistency check");

        Consistency {
            inconsistent_rows,
            percent: Measure::new(inconsistent_rows as f64)
                .percent_of(Measure::new(dataset.len() as f64)),
        }
    }

    /// Whole days from the latest observation (at midnight) to `now`.
    pub fn freshness(dataset: &Dataset, now: NaiveDateTime) -> Freshness {
        let latest = dataset.max_date();
        let days_since_update = latest.map(|d| (now - d.and_time(NaiveTime::MIN)).num_days());
        Freshness {
            latest,
            days_since_update,
        }
    }
}
