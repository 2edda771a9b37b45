//! Time-Series Extractor
//! Ordered (date, count) pairs for the trend charts.

use crate::data::CategorySlice;
use chrono::NaiveDate;

/// Parallel cases and deaths series of one country, as stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    pub location: String,
    pub cases: Vec<(NaiveDate, f64)>,
    pub deaths: Vec<(NaiveDate, f64)>,
}

impl TimeSeries {
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

pub struct SeriesExtractor;

impl SeriesExtractor {
    /// Series for a slice with at least `min_rows` points, else `None`.
    ///
    /// No resampling or gap filling: one pair per slice row, in slice order.
    pub fn extract(slice: &CategorySlice, min_rows: usize) -> Option<TimeSeries> {
        if slice.is_empty() || slice.len() < min_rows {
            return None;
        }

        let (cases, deaths): (Vec<_>, Vec<_>) = slice
            .points
            .iter()
            .map(|p| ((p.date, p.cases), (p.date, p.deaths)))
            .unzip();

        Some(TimeSeries {
            location: slice.location.clone(),
            cases,
            deaths,
        })
    }
}
