//! Nullable Numeric Module
//! A numeric value that may be missing, with arithmetic that never faults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Div, Mul};

/// Text shown wherever a value is undefined.
pub const NOT_AVAILABLE: &str = "N/A";

/// A possibly-missing numeric value.
///
/// Any operation with a missing operand yields a missing result. Division by
/// zero and non-finite results are also missing, so formatting a `Measure`
/// always produces either a number or `N/A`.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Measure(Option<f64>);

impl Measure {
    pub const MISSING: Measure = Measure(None);

    /// Wrap a raw value. NaN and infinities are treated as missing.
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Measure(Some(value))
        } else {
            Measure(None)
        }
    }

    pub fn from_option(value: Option<f64>) -> Self {
        value.map(Self::new).unwrap_or(Self::MISSING)
    }

    pub fn value(self) -> Option<f64> {
        self.0
    }

    pub fn is_known(self) -> bool {
        self.0.is_some()
    }

    pub fn is_missing(self) -> bool {
        self.0.is_none()
    }

    /// Keep the value only when it satisfies `predicate`.
    pub fn filter(self, predicate: impl FnOnce(f64) -> bool) -> Self {
        Measure(self.0.filter(|v| predicate(*v)))
    }

    /// `self / other * 100`, missing when `other` is not positive.
    pub fn percent_of(self, other: Measure) -> Measure {
        (self / other.filter(|v| v > 0.0)) * 100.0
    }

    /// `self / other * 1e6`, missing when `other` is not positive.
    pub fn per_million(self, other: Measure) -> Measure {
        (self / other.filter(|v| v > 0.0)) * 1e6
    }

    /// True only when both values are known and `self > other`.
    pub fn exceeds(self, other: Measure) -> bool {
        matches!((self.0, other.0), (Some(a), Some(b)) if a > b)
    }

    /// Larger of two measures, ignoring missing operands.
    pub fn max_known(self, other: Measure) -> Measure {
        match (self.0, other.0) {
            (Some(a), Some(b)) => Measure(Some(a.max(b))),
            (Some(a), None) | (None, Some(a)) => Measure(Some(a)),
            (None, None) => Measure(None),
        }
    }

    /// Thousands-separated integer, e.g. `1,234,567`.
    pub fn format_count(self) -> String {
        self.0
            .map(format_thousands)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    /// Percentage with the given number of decimals, e.g. `5.00%`.
    pub fn format_percent(self, decimals: usize) -> String {
        self.0
            .map(|v| format!("{:.*}%", decimals, v))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}

impl From<f64> for Measure {
    fn from(value: f64) -> Self {
        Measure::new(value)
    }
}

impl From<Option<f64>> for Measure {
    fn from(value: Option<f64>) -> Self {
        Measure::from_option(value)
    }
}

impl Mul<f64> for Measure {
    type Output = Measure;

    fn mul(self, rhs: f64) -> Measure {
        Measure::from_option(self.0.map(|v| v * rhs))
    }
}

impl Div for Measure {
    type Output = Measure;

    fn div(self, rhs: Measure) -> Measure {
        match (self.0, rhs.0) {
            (Some(_), Some(d)) if d == 0.0 => Measure::MISSING,
            (Some(n), Some(d)) => Measure::new(n / d),
            _ => Measure::MISSING,
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v}"),
            None => f.write_str(NOT_AVAILABLE),
        }
    }
}

/// Round to an integer and insert `,` every three digits.
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    if negative {
        format!("-{out}")
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn division_by_zero_is_missing() {
        let cases = Measure::new(0.0);
        let deaths = Measure::new(3.0);
        assert!(deaths.percent_of(cases).is_missing());
        assert!((deaths / cases).is_missing());
    }

    #[test]
    fn missing_operand_propagates() {
        assert!((Measure::MISSING * 100.0).is_missing());
        assert!((Measure::new(4.0) / Measure::MISSING).is_missing());
        assert!(Measure::new(4.0).per_million(Measure::MISSING).is_missing());
    }

    #[test]
    fn nan_is_missing() {
        assert!(Measure::new(f64::NAN).is_missing());
        assert!(Measure::from_option(Some(f64::INFINITY)).is_missing());
    }

    #[test]
    fn percent_and_per_million() {
        let rate = Measure::new(6.0).percent_of(Measure::new(120.0));
        assert_eq!(rate.format_percent(2), "5.00%");

        let per_million = Measure::new(120.0).per_million(Measure::new(1_000_000.0));
        assert_eq!(per_million.format_count(), "120");
    }

    #[test]
    fn exceeds_needs_both_values() {
        assert!(Measure::new(15.0).exceeds(Measure::new(10.0)));
        assert!(!Measure::new(10.0).exceeds(Measure::new(10.0)));
        assert!(!Measure::new(15.0).exceeds(Measure::MISSING));
        assert!(!Measure::MISSING.exceeds(Measure::new(1.0)));
    }

    #[test]
    fn thousands_separator() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(1234567.4), "1,234,567");
        assert_eq!(format_thousands(-12345.0), "-12,345");
        assert_eq!(Measure::MISSING.format_count(), "N/A");
    }
}
