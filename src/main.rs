#![windows_subsystem = "windows"]
//! Word Cloud Viewer - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod chart;
mod cloud;
mod constants;
mod fetch;
mod settings;
mod theme;
mod types;
mod ui;
mod utils;

use app::App;
use chart::ChartState;
use cloud::WordCloud;
use constants::*;
use eframe::egui;
use std::path::PathBuf;
use tracing::info;
use ui::components;

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "word-cloud-viewer.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,word_cloud_viewer=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Word Cloud Viewer");

    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Word Cloud Viewer starting");

    // Load saved window position/size
    let settings = settings::Settings::load(&data_dir);
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(1100.0, 720.0)))
        .with_min_inner_size([640.0, 480.0])
        .with_title("Word Cloud Viewer");

    let needs_center = win_pos.is_none();

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Word Cloud Viewer",
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, settings, data_dir);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        // Kick off the initial fetch once the update loop is running
        self.load_chart_data(ctx);

        // Check for a fetch result from the background task
        self.poll_chart_result(ctx);

        self.render_header(ctx);
        self.render_chart_region(ctx);
        self.render_toast(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Shutting down, saving settings");
        self.save_settings();
    }
}

impl App {
    fn render_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header")
            .exact_height(52.0)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::symmetric(16, 0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "{}  WORD CLOUD VIEWER",
                            egui_phosphor::regular::CLOUD
                        ))
                        .size(theme::FONT_HEADING)
                        .strong()
                        .color(theme::TEXT_PRIMARY),
                    );
                    ui.add_space(theme::SPACING_MD);
                    ui.label(
                        egui::RichText::new(&self.endpoint)
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_DIM),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let can_reload = !matches!(self.chart_state, ChartState::Loading);
                        let reload_btn = ui.add_enabled(
                            can_reload,
                            theme::button_accent(format!(
                                "{}  Reload",
                                egui_phosphor::regular::ARROWS_CLOCKWISE
                            )),
                        );
                        if reload_btn.clicked() {
                            self.reload_chart_data(ctx);
                        }

                        // Export menu only makes sense with a rendered chart
                        let ready_config = match &self.chart_state {
                            ChartState::Ready(config) => Some(config.clone()),
                            _ => None,
                        };
                        if let Some(config) = ready_config {
                            ui.add_space(theme::SPACING_MD);
                            let menu_response = ui.menu_button(
                                format!("{}  Export", egui_phosphor::regular::EXPORT),
                                |ui| self.chart_context_menu(ui, &config),
                            );
                            if let Some(Some(item)) = menu_response.inner {
                                self.run_export_action(item, &config, ctx);
                            }
                        }
                    });
                });
            });
    }

    fn render_chart_region(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(16)),
            )
            .show(ctx, |ui| {
                self.central_panel_rect = Some(ui.max_rect());

                theme::card_frame().show(ui, |ui| {
                    ui.set_min_size(ui.available_size());

                    match self.chart_state.clone() {
                        ChartState::Loading => {
                            components::loading_indicator(ui, "Loading chart data...");
                        }
                        ChartState::NoData => {
                            components::status_notice(ui, NO_DATA_NOTICE);
                        }
                        ChartState::Failed(message) => {
                            components::error_notice(ui, &message);
                            ui.add_space(theme::SPACING_LG);
                            ui.vertical_centered(|ui| {
                                let retry_btn = ui.add(theme::button(format!(
                                    "{}  Try again",
                                    egui_phosphor::regular::ARROWS_CLOCKWISE
                                )));
                                if retry_btn.clicked() {
                                    self.reload_chart_data(ctx);
                                }
                            });
                        }
                        ChartState::Ready(config) => {
                            let response = WordCloud::new(&config).show(ui);
                            let mut clicked = None;
                            response.context_menu(|ui| {
                                clicked = self.chart_context_menu(ui, &config);
                            });
                            if let Some(item) = clicked {
                                self.run_export_action(item, &config, ctx);
                            }
                        }
                    }
                });
            });
    }

    // Toast notification (bottom-right of central panel, 3s visible then fade,
    // pause on hover)
    fn render_toast(&mut self, ctx: &egui::Context) {
        let (Some(msg), Some(panel_rect)) = (self.toast_message.clone(), self.central_panel_rect)
        else {
            return;
        };

        let visible_duration = 3.0;
        let fade_duration = 0.5;
        let total_duration = visible_duration + fade_duration;
        let margin = 12.0;

        let toast_pos = egui::pos2(panel_rect.right() - margin, panel_rect.bottom() - margin);

        let response = egui::Area::new(egui::Id::new("export_toast"))
            .fixed_pos(toast_pos)
            .pivot(egui::Align2::RIGHT_BOTTOM)
            .show(ctx, |ui| {
                let elapsed = self
                    .toast_start
                    .map(|t| t.elapsed().as_secs_f32())
                    .unwrap_or(0.0);
                let alpha = if elapsed > visible_duration {
                    (total_duration - elapsed) / fade_duration
                } else {
                    1.0
                };

                egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(
                        0x1a,
                        0x1a,
                        0x1e,
                        (230.0 * alpha) as u8,
                    ))
                    .stroke(egui::Stroke::new(
                        1.0,
                        egui::Color32::from_rgba_unmultiplied(
                            theme::ACCENT.r(),
                            theme::ACCENT.g(),
                            theme::ACCENT.b(),
                            (100.0 * alpha) as u8,
                        ),
                    ))
                    .corner_radius(6.0)
                    .inner_margin(egui::Margin::symmetric(16, 10))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(&msg).color(
                            egui::Color32::from_rgba_unmultiplied(
                                255,
                                255,
                                255,
                                (255.0 * alpha) as u8,
                            ),
                        ));
                    });
            });

        // Pause timer while hovering
        if response.response.hovered() {
            self.toast_start = Some(std::time::Instant::now());
        }

        let elapsed = self
            .toast_start
            .map(|t| t.elapsed().as_secs_f32())
            .unwrap_or(0.0);
        if elapsed >= total_duration {
            self.toast_message = None;
            self.toast_start = None;
        } else {
            ctx.request_repaint();
        }
    }
}
