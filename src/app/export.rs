//! Chart export actions (fullscreen, SVG, PNG)

use super::App;
use crate::chart::{ChartConfig, ExportMenuItem};
use crate::cloud;
use crate::utils;
use eframe::egui;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const EXPORT_WIDTH: u32 = 1200;
pub const EXPORT_HEIGHT: u32 = 800;

impl App {
    pub fn run_export_action(
        &mut self,
        item: ExportMenuItem,
        config: &ChartConfig,
        ctx: &egui::Context,
    ) {
        match item {
            ExportMenuItem::ViewFullscreen => {
                let fullscreen = ctx.input(|i| i.viewport().fullscreen.unwrap_or(false));
                ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(!fullscreen));
            }
            ExportMenuItem::DownloadSvg => self.export_svg(config),
            ExportMenuItem::DownloadPng => self.export_png(config),
        }
    }

    fn export_svg(&mut self, config: &ChartConfig) {
        let Some(path) = self.pick_save_path("svg", "SVG image") else {
            return;
        };
        let svg = cloud::render_svg(config, EXPORT_WIDTH, EXPORT_HEIGHT);
        match std::fs::write(&path, svg) {
            Ok(()) => {
                info!(path = %path.display(), "Chart exported as SVG");
                self.remember_export_dir(&path);
                self.show_toast(format!("Saved {}", path.display()));
            }
            Err(e) => {
                error!(error = %e, path = %path.display(), "SVG export failed");
                self.show_toast(format!("Export failed: {}", e));
            }
        }
    }

    fn export_png(&mut self, config: &ChartConfig) {
        let Some(path) = self.pick_save_path("png", "PNG image") else {
            return;
        };
        let svg = cloud::render_svg(config, EXPORT_WIDTH, EXPORT_HEIGHT);
        let result = rasterize_svg(&svg).and_then(|(pixels, w, h)| {
            let img = image::RgbaImage::from_raw(w, h, pixels)
                .ok_or_else(|| "pixel buffer size mismatch".to_string())?;
            img.save(&path).map_err(|e| e.to_string())
        });
        match result {
            Ok(()) => {
                info!(path = %path.display(), "Chart exported as PNG");
                self.remember_export_dir(&path);
                self.show_toast(format!("Saved {}", path.display()));
            }
            Err(e) => {
                error!(error = %e, path = %path.display(), "PNG export failed");
                self.show_toast(format!("Export failed: {}", e));
            }
        }
    }

    fn pick_save_path(&self, extension: &str, filter_name: &str) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new()
            .set_file_name(format!("{}.{}", utils::export_file_stem(), extension))
            .add_filter(filter_name, &[extension]);
        if let Some(dir) = &self.export_dir {
            dialog = dialog.set_directory(dir);
        }
        dialog.save_file()
    }

    fn remember_export_dir(&mut self, path: &Path) {
        self.export_dir = path.parent().map(|p| p.to_path_buf());
    }
}

/// Rasterize an SVG document at 2x scale for a crisp bitmap.
fn rasterize_svg(svg: &str) -> Result<(Vec<u8>, u32, u32), String> {
    let mut options = resvg::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = resvg::usvg::Tree::from_str(svg, &options).map_err(|e| e.to_string())?;
    let size = tree.size();
    let scale = 2.0_f32;
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| "could not allocate pixmap".to_string())?;
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    Ok((utils::premul_to_straight(&pixmap), width, height))
}
