//! Data Processor Module
//! Builds the per-country slice used by metrics and charts.

use crate::data::{Dataset, Measure};
use chrono::NaiveDate;

/// One usable observation of a country: both counts present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlicePoint {
    pub date: NaiveDate,
    pub cases: f64,
    pub deaths: f64,
    pub population: Measure,
}

/// Rows of one country with case and death data, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorySlice {
    pub location: String,
    pub points: Vec<SlicePoint>,
    /// Rows of the country before dropping incomplete ones.
    pub source_rows: usize,
    /// Larger of the missing-cases and missing-deaths counts over all rows.
    pub missing_values: usize,
}

impl CategorySlice {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First and last observation date.
    pub fn period(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.points.iter().map(|p| p.date).min()?;
        let last = self.points.iter().map(|p| p.date).max()?;
        Some((first, last))
    }
}

/// Handles filtering of the dataset down to a single country.
pub struct DataProcessor;

impl DataProcessor {
    /// Rows for `location`, dropping those without case or death data.
    pub fn category_slice(dataset: &Dataset, location: &str) -> CategorySlice {
        let mut missing_cases = 0;
        let mut missing_deaths = 0;
        let mut source_rows = 0;
        let mut points = Vec::new();

        for record in dataset.rows_for(location) {
            source_rows += 1;
            missing_cases += usize::from(record.total_cases.is_missing());
            missing_deaths += usize::from(record.total_deaths.is_missing());

            if let (Some(cases), Some(deaths)) =
                (record.total_cases.value(), record.total_deaths.value())
            {
                points.push(SlicePoint {
                    date: record.date,
                    cases,
                    deaths,
                    population: record.population,
                });
            }
        }

        CategorySlice {
            location: location.to_string(),
            points,
            source_rows,
            missing_values: missing_cases.max(missing_deaths),
        }
    }
}
