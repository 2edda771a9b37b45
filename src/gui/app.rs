//! Dashboard Main Application
//! Main window with the validation panel and the country view.

use crate::charts::StaticChartRenderer;
use crate::config::Thresholds;
use crate::data::DatasetCache;
use crate::gui::widgets::{banner, ERROR_COLOR};
use crate::gui::{CountryView, PanelAction, ValidationPanel};
use crate::stats::{MetricsCalculator, MetricsOutcome};
use crate::validate::{Severity, ValidationReport, Validator};
use anyhow::{bail, Context};
use chrono::Local;
use egui::{RichText, SidePanel};
use serde::Serialize;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{error, info, warn};

const EXPORT_WIDTH: u32 = 1400;
const EXPORT_HEIGHT: u32 = 1000;

/// JSON document written by the report export.
#[derive(Serialize)]
struct ReportExport<'a> {
    generated_at: String,
    source: String,
    report: &'a ValidationReport,
}

/// State of a run whose dataset loaded successfully.
struct Dashboard {
    cache: Rc<DatasetCache>,
    calculator: MetricsCalculator,
    report: ValidationReport,
    panel: ValidationPanel,
    view: CountryView,
    outcome: Option<MetricsOutcome>,
}

enum AppState {
    /// Load failed; only the message is shown.
    Fatal(String),
    Ready(Box<Dashboard>),
}

/// Main application window.
pub struct DashboardApp {
    state: AppState,
}

impl DashboardApp {
    /// Load and validate the dataset. Blocks until the fetch completes.
    pub fn load(cache: Rc<DatasetCache>, thresholds: Thresholds) -> Self {
        let dataset = match cache.get() {
            Ok(dataset) => dataset,
            Err(err) => {
                error!(kind = ?err.kind(), "{err}");
                return Self {
                    state: AppState::Fatal(format!("❌ Error loading data: {err}")),
                };
            }
        };

        let report = Validator::new(thresholds).validate(dataset);
        for finding in report.warnings() {
            warn!("{}", finding.message());
        }

        let panel = ValidationPanel::new(dataset.locations());
        info!(countries = panel.locations.len(), "dashboard ready");

        let mut dashboard = Dashboard {
            cache: Rc::clone(&cache),
            calculator: MetricsCalculator::new(thresholds),
            report,
            panel,
            view: CountryView::new(),
            outcome: None,
        };
        dashboard.select_country();

        Self {
            state: AppState::Ready(Box::new(dashboard)),
        }
    }

    /// Validation report of a successful load.
    pub fn report(&self) -> Option<&ValidationReport> {
        match &self.state {
            AppState::Ready(dashboard) => Some(&dashboard.report),
            AppState::Fatal(_) => None,
        }
    }

    /// Message of a failed load.
    pub fn fatal_error(&self) -> Option<&str> {
        match &self.state {
            AppState::Fatal(message) => Some(message),
            AppState::Ready(_) => None,
        }
    }
}

impl Dashboard {
    /// Recompute metrics for the country selected in the panel.
    fn select_country(&mut self) {
        let Some(dataset) = self.cache.cached() else {
            return;
        };
        let location = self.panel.selected.clone();
        if location.is_empty() {
            self.outcome = None;
            return;
        }
        info!(%location, "country selected");
        self.outcome = Some(self.calculator.derive(dataset, &location));
    }

    fn handle_export_chart(&mut self) {
        match self.export_chart() {
            Ok(Some(path)) => {
                self.panel
                    .set_status(&format!("Charts exported: {}", path.display()));
                self.panel.last_export = Some(path);
            }
            Ok(None) => {}
            Err(err) => {
                error!("{err:#}");
                self.panel.set_status(&format!("Error: {err:#}"));
            }
        }
    }

    fn export_chart(&self) -> anyhow::Result<Option<PathBuf>> {
        let Some(metrics) = self.outcome.as_ref().and_then(MetricsOutcome::metrics) else {
            bail!("no data for the selected country");
        };
        let Some(series) = metrics.time_series() else {
            bail!("not enough records to chart {}", metrics.location);
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .set_file_name(format!("{}_trends.png", file_slug(&metrics.location)))
            .save_file()
        else {
            return Ok(None);
        };
        let path = with_png_extension(path);

        StaticChartRenderer::render_to_file(&series, &path, EXPORT_WIDTH, EXPORT_HEIGHT)
            .with_context(|| format!("exporting charts to {}", path.display()))?;
        Ok(Some(path))
    }

    fn handle_export_report(&mut self) {
        match self.export_report() {
            Ok(Some(path)) => {
                self.panel
                    .set_status(&format!("Report exported: {}", path.display()));
                self.panel.last_export = Some(path);
            }
            Ok(None) => {}
            Err(err) => {
                error!("{err:#}");
                self.panel.set_status(&format!("Error: {err:#}"));
            }
        }
    }

    fn export_report(&self) -> anyhow::Result<Option<PathBuf>> {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("validation_report.json")
            .save_file()
        else {
            return Ok(None);
        };

        let export = ReportExport {
            generated_at: Local::now().to_rfc3339(),
            source: self.cache.loader().source().to_string(),
            report: &self.report,
        };
        let json = serde_json::to_string_pretty(&export).context("serializing report")?;
        std::fs::write(&path, json)
            .with_context(|| format!("writing report to {}", path.display()))?;
        info!(path = %path.display(), "report exported");
        Ok(Some(path))
    }

    fn handle_open_export(&mut self) {
        let Some(path) = self.panel.last_export.clone() else {
            return;
        };
        if let Err(err) = open::that(&path) {
            error!(path = %path.display(), "{err}");
            self.panel.set_status(&format!("Error: cannot open {}", path.display()));
        }
    }

    fn show(&mut self, ctx: &egui::Context) {
        // Left panel - Validation Panel
        SidePanel::left("validation_panel")
            .min_width(300.0)
            .max_width(360.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.panel.show(ui, &self.report);

                    match action {
                        PanelAction::CountryChanged => self.select_country(),
                        PanelAction::ExportChart => self.handle_export_chart(),
                        PanelAction::ExportReport => self.handle_export_report(),
                        PanelAction::OpenExport => self.handle_open_export(),
                        PanelAction::None => {}
                    }
                });
            });

        // Central panel - Country View
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(RichText::new("🌍 COVID-19 Dashboard with Validations").size(24.0));
            ui.label("Verified and validated data");
            ui.add_space(10.0);

            match &self.outcome {
                Some(outcome) => self.view.show(ui, outcome, &self.report),
                None => banner(ui, Severity::Error, "❌ No country available in the dataset"),
            }
        });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match &mut self.state {
            AppState::Ready(dashboard) => dashboard.show(ctx),
            AppState::Fatal(message) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new(message.as_str()).size(20.0).color(ERROR_COLOR));
                    });
                });
            }
        }
    }
}

/// The bitmap encoder is picked from the extension, so force `.png`.
fn with_png_extension(mut path: PathBuf) -> PathBuf {
    let is_png = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if !is_png {
        let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".png");
        path.set_file_name(name);
    }
    path
}

/// File-name friendly form of a country name.
fn file_slug(location: &str) -> String {
    location
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}
