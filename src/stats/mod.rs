//! Stats module - Per-country metrics and time series

mod calculator;
mod series;

pub use calculator::{CategoryMetrics, MetricDisplay, MetricsCalculator, MetricsOutcome};
pub use series::{SeriesExtractor, TimeSeries};
