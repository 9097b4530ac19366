//! Reusable UI components
//!
//! Status and error paragraphs shown in the chart region, plus the
//! loading indicator.

use crate::theme;
use eframe::egui;

/// Vertically center a short block of content in the remaining space.
fn vertically_centered(
    ui: &mut egui::Ui,
    content_height: f32,
    add_contents: impl FnOnce(&mut egui::Ui),
) {
    let top = ((ui.available_height() - content_height) / 2.0).max(0.0);
    ui.add_space(top);
    ui.vertical_centered(add_contents);
}

/// Centered status paragraph (e.g. the no-data notice)
pub fn status_notice(ui: &mut egui::Ui, text: &str) {
    vertically_centered(ui, 20.0, |ui| {
        ui.label(
            egui::RichText::new(text)
                .size(theme::FONT_BODY)
                .color(theme::TEXT_MUTED),
        );
    });
}

/// Centered error paragraph for failed loads
pub fn error_notice(ui: &mut egui::Ui, text: &str) {
    vertically_centered(ui, 48.0, |ui| {
        ui.label(
            egui::RichText::new(egui_phosphor::regular::WARNING)
                .size(28.0)
                .color(theme::STATUS_ERROR),
        );
        ui.add_space(theme::SPACING_MD);
        ui.label(
            egui::RichText::new(text)
                .size(theme::FONT_BODY)
                .color(theme::STATUS_ERROR),
        );
    });
}

/// Spinner with a caption while the fetch is in flight
pub fn loading_indicator(ui: &mut egui::Ui, text: &str) {
    vertically_centered(ui, 56.0, |ui| {
        ui.spinner();
        ui.add_space(theme::SPACING_MD);
        ui.label(
            egui::RichText::new(text)
                .size(theme::FONT_BODY)
                .color(theme::TEXT_DIM),
        );
    });
}
