//! Country View Widget
//! Central panel: headline metrics, trend charts and the validation summary
//! of the selected country.

use crate::charts::{ChartKind, ChartPlotter};
use crate::data::format_thousands;
use crate::gui::widgets::{banner, finding_banner, metric, section_header, ERROR_COLOR, SUCCESS_COLOR};
use crate::stats::{CategoryMetrics, MetricsOutcome};
use crate::validate::{Finding, Severity, ValidationReport};
use egui::{RichText, ScrollArea};

const CHART_HEIGHT: f32 = 380.0;

/// Scrollable view of one country.
#[derive(Default)]
pub struct CountryView {
    /// Chart tab currently shown.
    pub tab: ChartKind,
}

impl CountryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, ui: &mut egui::Ui, outcome: &MetricsOutcome, report: &ValidationReport) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| match outcome {
                MetricsOutcome::Empty { location, .. } => {
                    ui.heading(format!("📊 Data for: {location}"));
                    ui.add_space(8.0);
                    banner(
                        ui,
                        Severity::Error,
                        "❌ Not enough data for the selected country",
                    );
                }
                MetricsOutcome::Available(metrics) => self.show_metrics(ui, metrics, report),
            });
    }

    fn show_metrics(&mut self, ui: &mut egui::Ui, metrics: &CategoryMetrics, report: &ValidationReport) {
        let title = if metrics.iso_code.is_empty() {
            format!("📊 Data for: {}", metrics.location)
        } else {
            format!("📊 Data for: {} ({})", metrics.location, metrics.iso_code)
        };
        ui.heading(title);
        ui.add_space(8.0);

        // Headline metrics
        let displays = metrics.displays();
        ui.columns(displays.len(), |columns| {
            for (column, display) in columns.iter_mut().zip(displays.iter()) {
                metric(column, display.label, &display.value);
            }
        });

        for finding in &metrics.findings {
            if matches!(finding, Finding::HighMortality { .. }) {
                finding_banner(ui, finding);
            }
        }

        // Trend charts
        section_header(ui, "📈 Evolution Over Time");
        match metrics.time_series() {
            Some(series) => {
                ui.horizontal(|ui| {
                    for kind in [ChartKind::Cases, ChartKind::Deaths] {
                        ui.selectable_value(&mut self.tab, kind, kind.tab_label());
                    }
                });
                ui.label(RichText::new(self.tab.title(&metrics.location)).strong());
                ChartPlotter::draw_line_chart(ui, &series, self.tab, CHART_HEIGHT);
            }
            None => {
                for finding in &metrics.findings {
                    if matches!(finding, Finding::InsufficientHistory { .. }) {
                        finding_banner(ui, finding);
                    }
                }
            }
        }

        // Validation report
        section_header(ui, "🔍 Validation Report");
        ui.columns(2, |columns| {
            Self::show_quality(&mut columns[0], metrics);
            Self::show_checks(&mut columns[1], report);
        });
    }

    fn show_quality(ui: &mut egui::Ui, metrics: &CategoryMetrics) {
        banner(ui, Severity::Info, "📋 Quality metrics:");
        ui.label(format!(
            "- Total records: {}",
            format_thousands(metrics.slice.len() as f64)
        ));
        if let Some((first, last)) = metrics.slice.period() {
            ui.label(format!(
                "- Period covered: {} to {}",
                first.format("%Y-%m-%d"),
                last.format("%Y-%m-%d")
            ));
        }
        ui.label(format!(
            "- Missing data: {}",
            format_thousands(metrics.slice.missing_values as f64)
        ));
    }

    fn show_checks(ui: &mut egui::Ui, report: &ValidationReport) {
        let checks = [
            ("Correct data structure", true),
            ("Dates within expected range", report.dates_in_range()),
            ("Cases ≥ deaths consistency", report.consistency.is_consistent()),
            ("Data up to date", !report.is_stale()),
        ];
        let passed = checks.iter().all(|(_, ok)| *ok);

        banner(
            ui,
            if passed { Severity::Success } else { Severity::Warning },
            if passed { "✅ Checks passed:" } else { "⚠ Checks:" },
        );
        for (label, ok) in checks {
            let (mark, color) = if ok {
                ("✓", SUCCESS_COLOR)
            } else {
                ("✗", ERROR_COLOR)
            };
            ui.label(RichText::new(format!("- {mark} {label}")).color(color));
        }
        ui.label("- ℹ Source: Our World in Data (Oxford)");
    }
}
