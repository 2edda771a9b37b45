//! Metrics Calculator Module
//! Summary metrics and secondary warnings for a selected country.

use crate::config::Thresholds;
use crate::data::{CategorySlice, DataProcessor, Dataset, Measure};
use crate::stats::{SeriesExtractor, TimeSeries};
use crate::validate::Finding;
use tracing::{debug, info};

/// A labelled, formatted value for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDisplay {
    pub label: &'static str,
    pub value: String,
}

/// Metrics of one country with at least one usable row.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMetrics {
    pub location: String,
    pub iso_code: String,
    pub slice: CategorySlice,
    pub max_cases: f64,
    pub max_deaths: f64,
    /// Deaths per 100 cases, missing when cases are zero.
    pub mortality_rate: Measure,
    /// Largest known population over the slice.
    pub population: Measure,
    pub cases_per_million: Measure,
    pub findings: Vec<Finding>,
    min_chart_rows: usize,
}

impl CategoryMetrics {
    /// Enough rows to chart the history.
    pub fn has_chart_history(&self) -> bool {
        self.slice.len() >= self.min_chart_rows
    }

    /// Chart series, `None` when the history is too short.
    pub fn time_series(&self) -> Option<TimeSeries> {
        SeriesExtractor::extract(&self.slice, self.min_chart_rows)
    }

    pub fn is_high_mortality(&self) -> bool {
        self.findings
            .iter()
            .any(|f| matches!(f, Finding::HighMortality { .. }))
    }

    /// The four headline metrics.
    pub fn displays(&self) -> [MetricDisplay; 4] {
        [
            MetricDisplay {
                label: "😷 Total cases",
                value: Measure::new(self.max_cases).format_count(),
            },
            MetricDisplay {
                label: "💀 Total deaths",
                value: Measure::new(self.max_deaths).format_count(),
            },
            MetricDisplay {
                label: "📈 Mortality rate",
                value: self.mortality_rate.format_percent(2),
            },
            MetricDisplay {
                label: "👥 Cases per million",
                value: self.cases_per_million.format_count(),
            },
        ]
    }
}

/// Result of deriving metrics for a selection.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricsOutcome {
    Available(Box<CategoryMetrics>),
    /// No row of the country has both case and death data.
    Empty { location: String, source_rows: usize },
}

impl MetricsOutcome {
    pub fn metrics(&self) -> Option<&CategoryMetrics> {
        match self {
            MetricsOutcome::Available(metrics) => Some(metrics),
            MetricsOutcome::Empty { .. } => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, MetricsOutcome::Empty { .. })
    }
}

/// Computes per-country metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsCalculator {
    thresholds: Thresholds,
}

impl MetricsCalculator {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Derive metrics for `location`. Inconsistent rows are kept.
    pub fn derive(&self, dataset: &Dataset, location: &str) -> MetricsOutcome {
        let slice = DataProcessor::category_slice(dataset, location);
        if slice.is_empty() {
            info!(location, rows = slice.source_rows, "no usable rows");
            return MetricsOutcome::Empty {
                location: location.to_string(),
                source_rows: slice.source_rows,
            };
        }

        let max_cases = slice
            .points
            .iter()
            .map(|p| p.cases)
            .fold(f64::NEG_INFINITY, f64::max);
        let max_deaths = slice
            .points
            .iter()
            .map(|p| p.deaths)
            .fold(f64::NEG_INFINITY, f64::max);

        let mortality_rate = Measure::new(max_deaths).percent_of(Measure::new(max_cases));

        let population = if dataset.has_population() {
            slice
                .points
                .iter()
                .fold(Measure::MISSING, |acc, p| acc.max_known(p.population))
        } else {
            Measure::MISSING
        };
        let cases_per_million = Measure::new(max_cases).per_million(population);

        let mut findings = Vec::new();
        if let Some(rate) = mortality_rate.value() {
            if rate > self.thresholds.high_mortality_pct {
                findings.push(Finding::HighMortality { rate });
            }
        }
        if slice.len() < self.thresholds.min_chart_rows {
            findings.push(Finding::InsufficientHistory { rows: slice.len() });
        }

        let iso_code = dataset
            .rows_for(location)
            .map(|r| r.iso_code.as_str())
            .find(|code| !code.is_empty())
            .unwrap_or_default()
            .to_string();

        debug!(
            location,
            rows = slice.len(),
            max_cases,
            max_deaths,
            mortality = %mortality_rate,
            "derived metrics"
        );

        MetricsOutcome::Available(Box::new(CategoryMetrics {
            location: location.to_string(),
            iso_code,
            slice,
            max_cases,
            max_deaths,
            mortality_rate,
            population,
            cases_per_million,
            findings,
            min_chart_rows: self.thresholds.min_chart_rows,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Record;
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn rows(location: &str, counts: &[(f64, f64)]) -> Vec<Record> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &(c, d))| Record::new(location, date(i as u32 + 1), c.into(), d.into()))
            .collect()
    }

    #[test]
    fn zero_cases_has_no_mortality_rate() {
        let dataset = Dataset::new(rows("Tuvalu", &[(0.0, 0.0)]), false);
        let outcome = MetricsCalculator::default().derive(&dataset, "Tuvalu");
        let metrics = outcome.metrics().unwrap();
        assert!(metrics.mortality_rate.is_missing());
        assert_eq!(metrics.displays()[2].value, "N/A");
        assert!(!metrics.is_high_mortality());
    }

    #[test]
    fn high_mortality_above_ten_percent() {
        let dataset = Dataset::new(rows("Yemen", &[(100.0, 11.0)]), false);
        let metrics = MetricsCalculator::default().derive(&dataset, "Yemen");
        assert!(metrics.metrics().unwrap().is_high_mortality());

        let dataset = Dataset::new(rows("Yemen", &[(100.0, 10.0)]), false);
        let metrics = MetricsCalculator::default().derive(&dataset, "Yemen");
        assert!(!metrics.metrics().unwrap().is_high_mortality());
    }

    #[test]
    fn short_history_suppresses_charts() {
        let five = Dataset::new(rows("Fiji", &[(1.0, 0.0); 5]), false);
        let metrics = MetricsCalculator::default().derive(&five, "Fiji");
        let metrics = metrics.metrics().unwrap();
        assert!(!metrics.has_chart_history());
        assert!(metrics.time_series().is_none());
        assert!(metrics
            .findings
            .contains(&Finding::InsufficientHistory { rows: 5 }));

        let six = Dataset::new(rows("Fiji", &[(1.0, 0.0); 6]), false);
        let metrics = MetricsCalculator::default().derive(&six, "Fiji");
        let metrics = metrics.metrics().unwrap();
        assert!(metrics.has_chart_history());
        assert_eq!(metrics.time_series().unwrap().len(), 6);
        assert!(metrics.findings.is_empty());
    }

    #[test]
    fn population_ignored_without_column() {
        let records = rows("Peru", &[(10.0, 1.0)])
            .into_iter()
            .map(|r| r.with_population(1000.0.into()))
            .collect();
        let dataset = Dataset::new(records, false);
        let metrics = MetricsCalculator::default().derive(&dataset, "Peru");
        assert!(metrics.metrics().unwrap().cases_per_million.is_missing());
    }

    #[test]
    fn iso_code_from_first_coded_row() {
        let mut records = rows("Kosovo", &[(10.0, 1.0), (12.0, 1.0)]);
        records[1] = records[1].clone().with_iso_code("OWID_KOS");
        let dataset = Dataset::new(records, false);
        let outcome = MetricsCalculator::default().derive(&dataset, "Kosovo");
        assert_eq!(outcome.metrics().unwrap().iso_code, "OWID_KOS");
    }

    #[test]
    fn empty_selection() {
        let dataset = Dataset::new(
            vec![Record::new("Peru", date(1), Measure::MISSING, 1.0.into())],
            false,
        );
        assert_eq!(
            MetricsCalculator::default().derive(&dataset, "Peru"),
            MetricsOutcome::Empty {
                location: "Peru".to_string(),
                source_rows: 1
            }
        );
    }
}
