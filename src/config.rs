//! Dashboard Configuration Module
//! Data source location and the thresholds used by validation and metrics.

use chrono::NaiveDate;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Our World in Data COVID-19 dataset.
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/owid/covid-19-data/master/public/data/owid-covid-data.csv";

/// Public repository of the dataset, linked from the panel footer.
pub const SOURCE_REPOSITORY_URL: &str = "https://github.com/owid/covid-19-data";

/// Environment variable overriding the data source (URL or local path).
pub const SOURCE_ENV_VAR: &str = "EPIDASH_SOURCE";

/// Earliest plausible observation date.
pub const PANDEMIC_START: NaiveDate = match NaiveDate::from_ymd_opt(2019, 12, 1) {
    Some(date) => date,
    None => panic!("invalid pandemic start date"),
};

/// Where the CSV is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// HTTP(S) resource fetched with a blocking request.
    Remote(String),
    /// CSV file on the local filesystem.
    File(PathBuf),
}

impl DataSource {
    /// Interpret a user-supplied location: `http://` and `https://` prefixes
    /// are remote, anything else is a file path.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            DataSource::Remote(location.to_string())
        } else {
            DataSource::File(PathBuf::from(location))
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Remote(DEFAULT_SOURCE_URL.to_string())
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Remote(url) => f.write_str(url),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Limits applied by the validator and the metric calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Observations before this date raise a freshness warning.
    pub pandemic_start: NaiveDate,
    /// More days than this since the latest observation is stale.
    pub stale_after_days: i64,
    /// Mortality rate (percent) above which a warning is shown.
    pub high_mortality_pct: f64,
    /// Minimum slice rows needed to draw time-series charts.
    pub min_chart_rows: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            pandemic_start: PANDEMIC_START,
            stale_after_days: 7,
            high_mortality_pct: 10.0,
            min_chart_rows: 6,
        }
    }
}

/// Process-wide settings, built once in `main`.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub source: DataSource,
    pub thresholds: Thresholds,
    pub request_timeout: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: DataSource::default(),
            thresholds: Thresholds::default(),
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl DashboardConfig {
    /// Defaults, with the source replaced by `EPIDASH_SOURCE` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(location) = std::env::var(SOURCE_ENV_VAR) {
            if !location.trim().is_empty() {
                config.source = DataSource::parse(&location);
            }
        }
        config
    }
}
