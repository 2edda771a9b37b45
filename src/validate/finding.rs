//! Tagged advisory findings produced by loading, validation and metrics.

use chrono::NaiveDate;
use serde::Serialize;

/// How a finding is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// A detected condition. None of these block processing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// Observations dated before the outbreak.
    Freshness { earliest: NaiveDate, rows: usize },
    /// Rows where deaths exceed cases. Rows are kept as-is.
    Consistency { rows: usize, percent: f64 },
    ConsistencyOk,
    /// Latest observation is older than the staleness limit.
    Staleness { latest: NaiveDate, days: i64 },
    HighMortality { rate: f64 },
    /// Too few rows for time-series charts.
    InsufficientHistory { rows: usize },
}

impl Finding {
    pub fn severity(&self) -> Severity {
        match self {
            Finding::ConsistencyOk => Severity::Success,
            Finding::Consistency { .. } => Severity::Error,
            Finding::Freshness { .. }
            | Finding::Staleness { .. }
            | Finding::HighMortality { .. }
            | Finding::InsufficientHistory { .. } => Severity::Warning,
        }
    }

    pub fn is_warning(&self) -> bool {
        self.severity() >= Severity::Warning
    }

    /// Banner text.
    pub fn message(&self) -> String {
        match self {
            Finding::Freshness { earliest, rows } => format!(
                "⚠ Dates before the start of the pandemic detected ({rows} rows, earliest {earliest})"
            ),
            Finding::Consistency { rows, percent } => {
                format!("⚠ {rows} inconsistent records ({percent:.2}% of total)")
            }
            Finding::ConsistencyOk => "✓ Data is consistent".to_string(),
            Finding::Staleness { days, .. } => {
                format!("⚠ Data may be out of date ({days} days since last update)")
            }
            Finding::HighMortality { rate } => format!("⚠ High mortality rate ({rate:.2}%)"),
            Finding::InsufficientHistory { rows } => {
                format!("⚠ Insufficient data for detailed charts ({rows} records)")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities() {
        assert_eq!(Finding::ConsistencyOk.severity(), Severity::Success);
        assert_eq!(
            Finding::Consistency { rows: 1, percent: 100.0 }.severity(),
            Severity::Error
        );
        assert!(Finding::HighMortality { rate: 12.0 }.is_warning());
        assert!(!Finding::ConsistencyOk.is_warning());
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(Finding::InsufficientHistory { rows: 3 }).unwrap();
        assert_eq!(json["kind"], "insufficient_history");
        assert_eq!(json["rows"], 3);
    }

    #[test]
    fn consistency_message_has_percentage() {
        let msg = Finding::Consistency { rows: 4, percent: 0.5 }.message();
        assert!(msg.contains("4 inconsistent"));
        assert!(msg.contains("0.50%"));
    }
}
