//! App module - contains the application state and logic

mod context_menu;
mod export;
mod load;

use crate::chart::ChartState;
use crate::settings::Settings;
use crate::theme;
use eframe::egui;
use std::path::PathBuf;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    // Chart display region
    pub(crate) chart_state: ChartState,
    pub(crate) load_started: bool,
    pub(crate) endpoint: String,
    pub(crate) runtime: tokio::runtime::Runtime,
    // Export
    pub(crate) export_dir: Option<PathBuf>,
    // Toast notification
    pub(crate) toast_message: Option<String>,
    pub(crate) toast_start: Option<std::time::Instant>,
    pub(crate) central_panel_rect: Option<egui::Rect>,
    // Window tracking
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, data_dir: PathBuf) -> Self {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        // Apply theme from theme.rs
        theme::apply_visuals(&cc.egui_ctx);

        Self {
            chart_state: ChartState::Loading,
            load_started: false,
            endpoint: settings.endpoint_or_default(),
            runtime: tokio::runtime::Runtime::new().unwrap(),
            export_dir: settings.export_dir.as_ref().map(PathBuf::from),
            toast_message: None,
            toast_start: None,
            central_panel_rect: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            endpoint_url: Some(self.endpoint.clone()),
            export_dir: self
                .export_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        };
        settings.save(&self.data_dir);
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast_message = Some(message.into());
        self.toast_start = Some(std::time::Instant::now());
    }
}
