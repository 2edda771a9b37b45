//! Validation Panel Widget
//! Left side panel with dataset checks, country selection and exports.

use crate::config::SOURCE_REPOSITORY_URL;
use crate::gui::widgets::{banner, finding_banner, metric, section_header};
use crate::validate::{Finding, Severity, ValidationReport};
use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

const CONSISTENCY_EXPLANATION: &str = "\
Records were found where reported deaths exceed reported cases.

This is common in real-world data because of:
- 📅 Corrections to historical data
- 🔄 Different reporting dates between countries
- ✍️ Typing errors that are corrected later
- 📊 Different reporting methodologies

Transparency: these inconsistencies are shown rather than hidden. \
They are kept in every figure on this dashboard.";

const METRICS_EXPLANATION: &str = "\
✅ Data integrity:
- Share of records with the value present
- Ideal is 100%, some countries report less

📊 Consistency:
- Checks that cases ≥ deaths
- Inconsistencies are normal in global data

🕐 Freshness:
- Days since the latest observation
- More than 7 days: possibly out of date
- Normal in late phases of a pandemic

🔍 Transparency: everything is shown, imperfections included";

/// Left side panel with validation results and user selections.
pub struct ValidationPanel {
    pub locations: Vec<String>,
    pub selected: String,
    pub status: String,
    pub last_export: Option<PathBuf>,
}

impl ValidationPanel {
    /// Panel offering `locations` (sorted); the first one starts selected.
    pub fn new(locations: Vec<String>) -> Self {
        let selected = locations.first().cloned().unwrap_or_default();
        Self {
            locations,
            selected,
            status: String::new(),
            last_export: None,
        }
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the validation panel
    pub fn show(&mut self, ui: &mut egui::Ui, report: &ValidationReport) -> PanelAction {
        let mut action = PanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🔍 Validation Panel")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(5.0);
        ui.separator();

        // ===== Data Integrity =====
        section_header(ui, "✅ Data Integrity");
        metric(
            ui,
            "Complete cases",
            &report.completeness.cases_pct.format_percent(1),
        );
        metric(
            ui,
            "Complete deaths",
            &report.completeness.deaths_pct.format_percent(1),
        );

        // ===== Data Consistency =====
        section_header(ui, "📊 Data Consistency");
        for finding in &report.findings {
            match finding {
                Finding::Consistency { percent, .. } => {
                    finding_banner(ui, finding);
                    ui.collapsing("💡 What does this mean?", |ui| {
                        ui.label(CONSISTENCY_EXPLANATION);
                        ui.label(format!("They represent {percent:.2}% of all records."));
                    });
                }
                Finding::ConsistencyOk => finding_banner(ui, finding),
                _ => {}
            }
        }

        ui.add_space(8.0);
        ui.separator();
        section_header(ui, "📝 Metric Explanations");
        ui.collapsing("🧠 Understanding the data...", |ui| {
            ui.label(METRICS_EXPLANATION);
        });
        ui.separator();

        // ===== Freshness =====
        section_header(ui, "🕐 Freshness");
        let latest = report
            .freshness
            .latest
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "N/A".to_string());
        metric(ui, "Last update", &latest);
        let days = report
            .freshness
            .days_since_update
            .map(|d| d.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        metric(ui, "Days since update", &days);

        for finding in &report.findings {
            if matches!(
                finding,
                Finding::Staleness { .. } | Finding::Freshness { .. }
            ) {
                finding_banner(ui, finding);
            }
        }

        // ===== Country Selection =====
        section_header(ui, "🌎 Country Selection");
        ui.label("Select a country:");
        ComboBox::from_id_salt("country")
            .width(ui.available_width() - 10.0)
            .selected_text(self.selected.as_str())
            .show_ui(ui, |ui| {
                for location in &self.locations {
                    if ui
                        .selectable_label(self.selected == *location, location.as_str())
                        .clicked()
                        && self.selected != *location
                    {
                        self.selected = location.clone();
                        action = PanelAction::CountryChanged;
                    }
                }
            });

        // ===== Export =====
        section_header(ui, "💾 Export");
        ui.horizontal(|ui| {
            if ui.button("📈 Charts (PNG)").clicked() {
                action = PanelAction::ExportChart;
            }
            if ui.button("📋 Report (JSON)").clicked() {
                action = PanelAction::ExportReport;
            }
        });
        if self.last_export.is_some() && ui.small_button("📂 Open last export").clicked() {
            action = PanelAction::OpenExport;
        }
        if !self.status.is_empty() {
            let color = if self.status.contains("Error") {
                Color32::from_rgb(220, 53, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(color));
        }

        // ===== Source and Methods =====
        ui.add_space(8.0);
        ui.separator();
        section_header(ui, "📚 Source and Methods");
        banner(
            ui,
            Severity::Info,
            &format!(
                "Source: Our World in Data - University of Oxford\n\n\
                 Validation methods:\n\
                 - Data integrity check\n\
                 - Internal consistency (cases ≥ deaths)\n\
                 - Valid date range\n\
                 - Freshness of the latest observation\n\n\
                 Last update: {latest}"
            ),
        );
        ui.hyperlink_to("🔗 View official repository", SOURCE_REPOSITORY_URL);

        action
    }
}

/// Actions triggered by the validation panel
#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    None,
    CountryChanged,
    ExportChart,
    ExportReport,
    OpenExport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_location_is_selected() {
        let panel = ValidationPanel::new(vec!["Afghanistan".into(), "Albania".into()]);
        assert_eq!(panel.selected, "Afghanistan");
        assert!(ValidationPanel::new(Vec::new()).selected.is_empty());
    }
}
