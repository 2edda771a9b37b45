//! Static Chart Renderer
//! Writes a country's trend charts to a PNG file with plotters.
//!
//! Layout:
//! 1. Top half: cumulative cases over time
//! 2. Bottom half: cumulative deaths over time

use crate::charts::plotter::{date_to_x, x_to_label, ChartKind};
use crate::data::format_thousands;
use crate::stats::TimeSeries;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::info;

const CASES_RGB: RGBColor = RGBColor(231, 76, 60);
const DEATHS_RGB: RGBColor = RGBColor(44, 62, 80);
const GRID_RGB: RGBColor = RGBColor(225, 225, 225);

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to draw chart: {0}")]
    Draw(String),
    #[error("No chart data for {0}")]
    NoSeries(String),
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render both trend charts into one PNG at `path`.
    pub fn render_to_file(
        series: &TimeSeries,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), ExportError> {
        if series.is_empty() {
            return Err(ExportError::NoSeries(series.location.clone()));
        }

        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        let (top, bottom) = root.split_vertically(height / 2);
        Self::draw_panel(&top, series, ChartKind::Cases, CASES_RGB)?;
        Self::draw_panel(&bottom, series, ChartKind::Deaths, DEATHS_RGB)?;

        root.present().map_err(draw_error)?;
        info!(path = %path.display(), location = %series.location, "chart exported");
        Ok(())
    }

    fn draw_panel<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        series: &TimeSeries,
        kind: ChartKind,
        color: RGBColor,
    ) -> Result<(), ExportError> {
        let points = kind.points(series);
        let (x_min, x_max) = Self::x_range(points.iter().map(|(d, _)| date_to_x(*d)));
        let y_max = Self::y_max(points.iter().map(|(_, v)| *v));

        let mut chart = ChartBuilder::on(area)
            .caption(kind.title(&series.location), ("sans-serif", 22))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(90)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)
            .map_err(draw_error)?;

        chart
            .configure_mesh()
            .light_line_style(GRID_RGB.stroke_width(1))
            .x_labels(6)
            .x_desc("Date")
            .y_desc(kind.y_label())
            .x_label_formatter(&|x| x_to_label(*x))
            .y_label_formatter(&|y| format_thousands(*y))
            .draw()
            .map_err(draw_error)?;

        chart
            .draw_series(LineSeries::new(
                points.iter().map(|&(d, v)| (date_to_x(d), v)),
                color.stroke_width(2),
            ))
            .map_err(draw_error)?;

        Ok(())
    }

    /// X bounds, widened by a day when all points share one date.
    fn x_range(xs: impl Iterator<Item = f64>) -> (f64, f64) {
        let (min, max) = xs.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
            (lo.min(x), hi.max(x))
        });
        if !min.is_finite() {
            return (0.0, 1.0);
        }
        if min == max {
            (min - 1.0, max + 1.0)
        } else {
            (min, max)
        }
    }

    /// Upper y bound with 5% headroom; never zero.
    fn y_max(ys: impl Iterator<Item = f64>) -> f64 {
        let max = ys.fold(0.0_f64, f64::max);
        if max > 0.0 {
            max * 1.05
        } else {
            1.0
        }
    }
}

fn draw_error<E: std::fmt::Display>(err: E) -> ExportError {
    ExportError::Draw(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_date_range_is_widened() {
        assert_eq!(StaticChartRenderer::x_range([5.0].into_iter()), (4.0, 6.0));
        assert_eq!(StaticChartRenderer::x_range([3.0, 9.0].into_iter()), (3.0, 9.0));
        assert_eq!(StaticChartRenderer::x_range(std::iter::empty()), (0.0, 1.0));
    }

    #[test]
    fn y_headroom() {
        assert_eq!(StaticChartRenderer::y_max([0.0, 0.0].into_iter()), 1.0);
        assert!((StaticChartRenderer::y_max([10.0, 100.0].into_iter()) - 105.0).abs() < 1e-9);
    }

    #[test]
    fn empty_series_is_rejected() {
        let series = TimeSeries {
            location: "Peru".to_string(),
            ..Default::default()
        };
        let path = std::env::temp_dir().join("epi_dashboard_empty.png");
        let err = StaticChartRenderer::render_to_file(&series, &path, 800, 600).unwrap_err();
        assert!(matches!(err, ExportError::NoSeries(location) if location == "Peru"));
    }
}
