//! Charts module - Trend chart rendering

mod plotter;
mod renderer;

pub use plotter::{axis_mark_label, date_to_x, x_to_label, ChartKind, ChartPlotter, CASES_COLOR, DEATHS_COLOR};
pub use renderer::{ExportError, StaticChartRenderer};
