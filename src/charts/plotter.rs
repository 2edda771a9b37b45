//! Chart Plotter Module
//! Interactive trend charts using egui_plot.

use crate::data::format_thousands;
use crate::stats::TimeSeries;
use chrono::{Datelike, NaiveDate};
use egui::Color32;
use egui_plot::{Legend, Line, Plot, PlotPoints};

pub const CASES_COLOR: Color32 = Color32::from_rgb(231, 76, 60); // Red
pub const DEATHS_COLOR: Color32 = Color32::from_rgb(44, 62, 80); // Dark blue

/// Which cumulative count a chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Cases,
    Deaths,
}

impl ChartKind {
    pub fn tab_label(self) -> &'static str {
        match self {
            ChartKind::Cases => "Cases",
            ChartKind::Deaths => "Deaths",
        }
    }

    pub fn title(self, location: &str) -> String {
        match self {
            ChartKind::Cases => format!("Evolution of cases in {location}"),
            ChartKind::Deaths => format!("Evolution of deaths in {location}"),
        }
    }

    pub fn y_label(self) -> &'static str {
        match self {
            ChartKind::Cases => "Total cases",
            ChartKind::Deaths => "Total deaths",
        }
    }

    pub fn color(self) -> Color32 {
        match self {
            ChartKind::Cases => CASES_COLOR,
            ChartKind::Deaths => DEATHS_COLOR,
        }
    }

    pub fn points(self, series: &TimeSeries) -> &[(NaiveDate, f64)] {
        match self {
            ChartKind::Cases => &series.cases,
            ChartKind::Deaths => &series.deaths,
        }
    }
}

/// Plot x coordinate of a date (days since the common era).
pub fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// Axis label for a plot x coordinate.
pub fn x_to_label(x: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Grid mark label: whole days only, so zoomed-in axes do not repeat a date.
pub fn axis_mark_label(x: f64) -> String {
    if x.fract() != 0.0 {
        return String::new();
    }
    x_to_label(x)
}

/// Draws trend charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw one cumulative-count line chart.
    /// X-axis: observation date, Y-axis: count
    pub fn draw_line_chart(ui: &mut egui::Ui, series: &TimeSeries, kind: ChartKind, height: f32) {
        let color = kind.color();
        let points: PlotPoints = kind
            .points(series)
            .iter()
            .map(|&(date, value)| [date_to_x(date), value])
            .collect();

        Plot::new(format!("trend_{}_{}", kind.tab_label(), series.location))
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("Date")
            .y_axis_label(kind.y_label())
            .x_axis_formatter(|mark, _range| axis_mark_label(mark.value))
            .y_axis_formatter(|mark, _range| format_thousands(mark.value))
            .label_formatter(|_name, value| {
                format!("{}\n{}", x_to_label(value.x), format_thousands(value.y))
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(points)
                        .color(color)
                        .width(2.0)
                        .name(kind.y_label()),
                );
            });
    }
}
