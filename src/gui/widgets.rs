//! Small display helpers shared by the panels.

use crate::validate::{Finding, Severity};
use egui::{Color32, RichText};

pub const SUCCESS_COLOR: Color32 = Color32::from_rgb(40, 167, 69);
pub const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);
pub const WARNING_COLOR: Color32 = Color32::from_rgb(243, 156, 18);
pub const INFO_COLOR: Color32 = Color32::from_rgb(52, 152, 219);

pub fn severity_color(severity: Severity) -> Color32 {
    match severity {
        Severity::Success => SUCCESS_COLOR,
        Severity::Info => INFO_COLOR,
        Severity::Warning => WARNING_COLOR,
        Severity::Error => ERROR_COLOR,
    }
}

/// Label above a large value.
pub fn metric(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.vertical(|ui| {
        ui.label(RichText::new(label).size(12.0).color(Color32::GRAY));
        ui.label(RichText::new(value).size(22.0).strong());
    });
    ui.add_space(4.0);
}

/// Colored message box.
pub fn banner(ui: &mut egui::Ui, severity: Severity, message: &str) {
    let color = severity_color(severity);
    egui::Frame::none()
        .fill(color.gamma_multiply(0.15))
        .stroke(egui::Stroke::new(1.0, color))
        .rounding(5.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(message).size(13.0).color(color));
        });
    ui.add_space(4.0);
}

pub fn finding_banner(ui: &mut egui::Ui, finding: &Finding) {
    banner(ui, finding.severity(), &finding.message());
}

pub fn section_header(ui: &mut egui::Ui, text: &str) {
    ui.add_space(8.0);
    ui.label(RichText::new(text).size(14.0).strong());
    ui.add_space(4.0);
}
