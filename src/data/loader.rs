//! CSV Data Loader Module
//! Fetches the dataset, checks its structure and parses it using Polars.

use crate::config::{DashboardConfig, DataSource, Thresholds};
use crate::data::{Dataset, Measure, Record};
use crate::validate::Finding;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use reqwest::blocking::Client;
use std::io::Cursor;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const ISO_CODE_COL: &str = "iso_code";
pub const LOCATION_COL: &str = "location";
pub const DATE_COL: &str = "date";
pub const TOTAL_CASES_COL: &str = "total_cases";
pub const TOTAL_DEATHS_COL: &str = "total_deaths";
pub const POPULATION_COL: &str = "population";

/// Columns that must be present for the dataset to be usable.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    ISO_CODE_COL,
    LOCATION_COL,
    DATE_COL,
    TOTAL_CASES_COL,
    TOTAL_DEATHS_COL,
];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Category of a fatal load failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Fetch,
    Structure,
    Parse,
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to fetch dataset: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Incorrect data structure, missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Unparseable date {value:?} in data row {row}")]
    InvalidDate { row: usize, value: String },
}

impl LoadError {
    pub fn kind(&self) -> FailureKind {
        match self {
            LoadError::Http(_) | LoadError::Io { .. } | LoadError::Csv(_) => FailureKind::Fetch,
            LoadError::MissingColumns(_) => FailureKind::Structure,
            LoadError::InvalidDate { .. } => FailureKind::Parse,
        }
    }
}

/// Fetches and parses the source CSV into a [`Dataset`].
#[derive(Debug, Clone)]
pub struct DataLoader {
    source: DataSource,
    thresholds: Thresholds,
    timeout: Duration,
}

impl DataLoader {
    pub fn new(source: DataSource, thresholds: Thresholds) -> Self {
        Self {
            source,
            thresholds,
            timeout: DashboardConfig::default().request_timeout,
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            source: config.source.clone(),
            thresholds: config.thresholds,
            timeout: config.request_timeout,
        }
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Fetch the source and parse it. Blocks until the fetch completes.
    pub fn load(&self) -> Result<Dataset, LoadError> {
        info!(source = %self.source, "loading dataset");
        let bytes = self.fetch()?;
        debug!(bytes = bytes.len(), "fetched dataset");
        self.parse_csv(bytes)
    }

    fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        match &self.source {
            DataSource::Remote(url) => {
                let client = Client::builder().timeout(self.timeout).build()?;
                let response = client.get(url).send()?.error_for_status()?;
                Ok(response.bytes()?.to_vec())
            }
            DataSource::File(path) => std::fs::read(path).map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            }),
        }
    }

    /// Parse raw CSV bytes into a dataset.
    pub fn parse_csv(&self, bytes: Vec<u8>) -> Result<Dataset, LoadError> {
        // Full schema inference: count columns stay empty for the first months.
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .with_ignore_errors(true)
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        Self::check_structure(&df)?;

        let iso_codes = text_column(&df, ISO_CODE_COL)?;
        let locations = text_column(&df, LOCATION_COL)?;
        let dates = parse_dates(&text_column(&df, DATE_COL)?)?;
        let cases = measure_column(&df, TOTAL_CASES_COL)?;
        let deaths = measure_column(&df, TOTAL_DEATHS_COL)?;

        let has_population = df.get_column_index(POPULATION_COL).is_some();
        let population = if has_population {
            measure_column(&df, POPULATION_COL)?
        } else {
            vec![Measure::MISSING; df.height()]
        };

        let records: Vec<Record> = (0..df.height())
            .map(|i| Record {
                iso_code: iso_codes[i].clone().unwrap_or_default(),
                location: locations[i].clone().unwrap_or_default(),
                date: dates[i],
                total_cases: cases[i],
                total_deaths: deaths[i],
                population: population[i],
            })
            .collect();

        let findings = self.date_range_findings(&records);
        info!(
            rows = records.len(),
            columns = df.width(),
            has_population,
            "dataset parsed"
        );

        Ok(Dataset::new(records, has_population).with_load_findings(findings))
    }

    /// Fail when any required column is absent.
    pub fn check_structure(df: &DataFrame) -> Result<(), LoadError> {
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| df.get_column_index(name).is_none())
            .map(|name| name.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(LoadError::MissingColumns(missing))
        }
    }

    /// Warn about observations dated before the outbreak.
    fn date_range_findings(&self, records: &[Record]) -> Vec<Finding> {
        let start = self.thresholds.pandemic_start;
        let early: Vec<NaiveDate> = records
            .iter()
            .map(|r| r.date)
            .filter(|d| *d < start)
            .collect();

        match early.iter().min() {
            Some(&earliest) => {
                warn!(%earliest, rows = early.len(), "observations before {start}");
                vec![Finding::Freshness {
                    earliest,
                    rows: early.len(),
                }]
            }
            None => Vec::new(),
        }
    }
}

fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, LoadError> {
    let column = df.column(name)?.cast(&DataType::String)?;
    Ok(column
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.trim().to_string()))
        .collect())
}

fn measure_column(df: &DataFrame, name: &str) -> Result<Vec<Measure>, LoadError> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    Ok(column.f64()?.into_iter().map(Measure::from_option).collect())
}

fn parse_dates(values: &[Option<String>]) -> Result<Vec<NaiveDate>, LoadError> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let raw = value.as_deref().unwrap_or_default();
            parse_date(raw).ok_or_else(|| LoadError::InvalidDate {
                row: i + 1,
                value: raw.to_string(),
            })
        })
        .collect()
}

/// Parse an ISO-8601 date or date-time, keeping only the calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        return Some(dt.date());
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.date_naive())
}
