//! Context menu for the rendered chart (export menu entries)

use super::App;
use crate::chart::{ChartConfig, ExportMenuItem};
use crate::theme;
use eframe::egui;

fn item_icon(item: ExportMenuItem) -> &'static str {
    match item {
        ExportMenuItem::ViewFullscreen => egui_phosphor::regular::FRAME_CORNERS,
        ExportMenuItem::DownloadSvg => egui_phosphor::regular::DOWNLOAD_SIMPLE,
        ExportMenuItem::DownloadPng => egui_phosphor::regular::IMAGE,
    }
}

impl App {
    /// Renders the chart's export menu; returns the clicked item, if any.
    pub(crate) fn chart_context_menu(
        &mut self,
        ui: &mut egui::Ui,
        config: &ChartConfig,
    ) -> Option<ExportMenuItem> {
        let mut action = None;
        ui.spacing_mut().item_spacing.y = 2.0;

        let labels: Vec<&str> = config.export_menu.iter().map(|item| item.label()).collect();
        theme::set_menu_width(ui, &labels);

        let first_download = config.export_menu.iter().position(|item| {
            matches!(
                item,
                ExportMenuItem::DownloadSvg | ExportMenuItem::DownloadPng
            )
        });

        for (idx, item) in config.export_menu.iter().enumerate() {
            if Some(idx) == first_download && idx > 0 {
                ui.separator();
            }
            if theme::menu_item(ui, item_icon(*item), item.label()) {
                action = Some(*item);
                ui.close_menu();
            }
        }

        action
    }
}
