//! Dataset Records
//! Typed rows of the source table and the immutable dataset built from them.

use crate::data::Measure;
use crate::validate::Finding;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// One row of the source table.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub iso_code: String,
    pub location: String,
    pub date: NaiveDate,
    pub total_cases: Measure,
    pub total_deaths: Measure,
    pub population: Measure,
}

impl Record {
    pub fn new(location: &str, date: NaiveDate, cases: Measure, deaths: Measure) -> Self {
        Self {
            iso_code: String::new(),
            location: location.to_string(),
            date,
            total_cases: cases,
            total_deaths: deaths,
            population: Measure::MISSING,
        }
    }

    pub fn with_iso_code(mut self, iso_code: &str) -> Self {
        self.iso_code = iso_code.to_string();
        self
    }

    pub fn with_population(mut self, population: Measure) -> Self {
        self.population = population;
        self
    }

    /// Deaths exceed cases (both known).
    pub fn is_inconsistent(&self) -> bool {
        self.total_deaths.exceeds(self.total_cases)
    }

    /// Both cumulative counts are present.
    pub fn has_counts(&self) -> bool {
        self.total_cases.is_known() && self.total_deaths.is_known()
    }
}

/// Ordered, immutable collection of records loaded from the source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
    has_population: bool,
    load_findings: Vec<Finding>,
}

impl Dataset {
    pub fn new(records: Vec<Record>, has_population: bool) -> Self {
        Self {
            records,
            has_population,
            load_findings: Vec::new(),
        }
    }

    pub(crate) fn with_load_findings(mut self, findings: Vec<Finding>) -> Self {
        self.load_findings = findings;
        self
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the source carried a `population` column.
    pub fn has_population(&self) -> bool {
        self.has_population
    }

    /// Advisory findings raised while loading (pre-outbreak dates).
    pub fn load_findings(&self) -> &[Finding] {
        &self.load_findings
    }

    pub fn min_date(&self) -> Option<NaiveDate> {
        self.records.iter().map(|r| r.date).min()
    }

    pub fn max_date(&self) -> Option<NaiveDate> {
        self.records.iter().map(|r| r.date).max()
    }

    /// Distinct country names in sorted order.
    pub fn locations(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| !r.location.is_empty())
            .map(|r| r.location.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Rows whose country name equals `location`, in source order.
    pub fn rows_for<'a>(&'a self, location: &'a str) -> impl Iterator<Item = &'a Record> + 'a {
        self.records.iter().filter(move |r| r.location == location)
    }
}
