//! Word cloud rendering
//!
//! Deterministic layout: words sorted by descending weight, font sizes
//! scaled between fixed bounds, rows flowed and centered in the display
//! region. No collision placement or rotation.

use crate::chart::ChartConfig;
use crate::theme;
use crate::types::WordEntry;
use eframe::egui;
use std::sync::Arc;

pub const MIN_FONT_SIZE: f32 = 14.0;
pub const MAX_FONT_SIZE: f32 = 52.0;
const WORD_GAP: f32 = 14.0;
const LINE_GAP: f32 = 8.0;
const TITLE_HEIGHT: f32 = 44.0;
const REGION_PADDING: f32 = 16.0;

/// Font size for a weight within `[min_w, max_w]`, square-root eased.
/// Uniform weights map to the midpoint size.
pub(crate) fn font_size_for(weight: f64, min_w: f64, max_w: f64) -> f32 {
    let span = max_w - min_w;
    if span <= f64::EPSILON {
        return (MIN_FONT_SIZE + MAX_FONT_SIZE) / 2.0;
    }
    let t = ((weight - min_w) / span).clamp(0.0, 1.0).sqrt() as f32;
    MIN_FONT_SIZE + (MAX_FONT_SIZE - MIN_FONT_SIZE) * t
}

/// Greedy row flow: pack word indices into lines no wider than `max_width`,
/// preserving input order. A single word wider than `max_width` still gets a
/// line of its own.
pub(crate) fn flow_lines(widths: &[f32], gap: f32, max_width: f32) -> Vec<Vec<usize>> {
    let mut lines: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut current_width = 0.0_f32;

    for (i, &w) in widths.iter().enumerate() {
        if current.is_empty() {
            current.push(i);
            current_width = w;
        } else if current_width + gap + w > max_width {
            lines.push(std::mem::take(&mut current));
            current.push(i);
            current_width = w;
        } else {
            current.push(i);
            current_width += gap + w;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn weight_bounds(series: &[WordEntry]) -> (f64, f64) {
    let mut min_w = f64::INFINITY;
    let mut max_w = f64::NEG_INFINITY;
    for entry in series {
        min_w = min_w.min(entry.weight);
        max_w = max_w.max(entry.weight);
    }
    if series.is_empty() {
        (0.0, 0.0)
    } else {
        (min_w, max_w)
    }
}

/// Descending-weight visual order; ties keep the backend's order.
fn display_order(series: &[WordEntry]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..series.len()).collect();
    order.sort_by(|&a, &b| {
        series[b]
            .weight
            .partial_cmp(&series[a].weight)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order
}

/// The word cloud widget consuming a prepared `ChartConfig`.
pub struct WordCloud<'a> {
    config: &'a ChartConfig,
}

impl<'a> WordCloud<'a> {
    pub fn new(config: &'a ChartConfig) -> Self {
        Self { config }
    }

    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click());
        if !ui.is_rect_visible(rect) || self.config.series.is_empty() {
            return response;
        }

        let painter = ui.painter_at(rect);

        painter.text(
            egui::pos2(rect.center().x, rect.top() + TITLE_HEIGHT / 2.0),
            egui::Align2::CENTER_CENTER,
            &self.config.title,
            egui::FontId::proportional(theme::FONT_TITLE),
            theme::TEXT_PRIMARY,
        );

        let region = rect.shrink(REGION_PADDING);
        let cloud_rect = egui::Rect::from_min_max(
            egui::pos2(region.min.x, region.min.y + TITLE_HEIGHT),
            region.max,
        );
        if cloud_rect.width() <= 0.0 || cloud_rect.height() <= 0.0 {
            return response;
        }

        let order = display_order(&self.config.series);
        let (min_w, max_w) = weight_bounds(&self.config.series);
        let mut sizes: Vec<f32> = order
            .iter()
            .map(|&i| font_size_for(self.config.series[i].weight, min_w, max_w))
            .collect();

        let mut galleys = self.measure(ui, &order, &sizes);
        let mut lines = flow_lines(&widths_of(&galleys), WORD_GAP, cloud_rect.width());
        let mut total_h = block_height(&lines, &galleys);

        // One shrink pass when the flowed block does not fit vertically.
        if total_h > cloud_rect.height() && total_h > 0.0 {
            let shrink = (cloud_rect.height() / total_h).max(0.35);
            for size in &mut sizes {
                *size = (*size * shrink).max(8.0);
            }
            galleys = self.measure(ui, &order, &sizes);
            lines = flow_lines(&widths_of(&galleys), WORD_GAP, cloud_rect.width());
            total_h = block_height(&lines, &galleys);
        }

        let mut y = cloud_rect.top() + ((cloud_rect.height() - total_h).max(0.0)) / 2.0;
        for line in &lines {
            let line_h = line
                .iter()
                .map(|&k| galleys[k].size().y)
                .fold(0.0_f32, f32::max);
            let line_w: f32 = line.iter().map(|&k| galleys[k].size().x).sum::<f32>()
                + WORD_GAP * (line.len().saturating_sub(1)) as f32;

            let mut x = cloud_rect.center().x - line_w / 2.0;
            for &k in line {
                let galley = &galleys[k];
                let pos = egui::pos2(x, y + (line_h - galley.size().y) / 2.0);
                painter.galley(pos, galley.clone(), theme::TEXT_PRIMARY);

                let entry = &self.config.series[order[k]];
                let word_rect = egui::Rect::from_min_size(pos, galley.size());
                let word_response =
                    ui.interact(word_rect, ui.id().with(("cloud-word", k)), egui::Sense::hover());
                if self.config.accessibility.enabled {
                    let description =
                        format!("{} {}", entry.name, self.config.value_description(entry));
                    word_response.widget_info(|| {
                        egui::WidgetInfo::labeled(egui::WidgetType::Label, true, description.clone())
                    });
                }
                word_response.on_hover_text(self.config.tooltip_text(entry));

                x += galley.size().x + WORD_GAP;
            }
            y += line_h + LINE_GAP;
        }

        response
    }

    fn measure(
        &self,
        ui: &egui::Ui,
        order: &[usize],
        sizes: &[f32],
    ) -> Vec<Arc<egui::Galley>> {
        order
            .iter()
            .zip(sizes)
            .enumerate()
            .map(|(slot, (&i, &size))| {
                ui.fonts(|f| {
                    f.layout_no_wrap(
                        self.config.series[i].name.clone(),
                        egui::FontId::proportional(size),
                        theme::cloud_color(slot),
                    )
                })
            })
            .collect()
    }
}

fn widths_of(galleys: &[Arc<egui::Galley>]) -> Vec<f32> {
    galleys.iter().map(|g| g.size().x).collect()
}

fn block_height(lines: &[Vec<usize>], galleys: &[Arc<egui::Galley>]) -> f32 {
    let line_heights: f32 = lines
        .iter()
        .map(|line| {
            line.iter()
                .map(|&k| galleys[k].size().y)
                .fold(0.0_f32, f32::max)
        })
        .sum();
    line_heights + LINE_GAP * (lines.len().saturating_sub(1)) as f32
}

// ============================================================================
// SVG EXPORT
// ============================================================================

/// Render the configured cloud as a standalone SVG document.
///
/// Uses approximate proportional text metrics; the exported layout matches
/// the on-screen one in structure, not pixel-for-pixel.
pub fn render_svg(config: &ChartConfig, width: u32, height: u32) -> String {
    let approx_width =
        |name: &str, size: f32| name.chars().count().max(1) as f32 * size * 0.58;

    let order = display_order(&config.series);
    let (min_w, max_w) = weight_bounds(&config.series);
    let sizes: Vec<f32> = order
        .iter()
        .map(|&i| font_size_for(config.series[i].weight, min_w, max_w))
        .collect();
    let widths: Vec<f32> = order
        .iter()
        .zip(&sizes)
        .map(|(&i, &size)| approx_width(&config.series[i].name, size))
        .collect();

    let usable_width = width as f32 - 2.0 * REGION_PADDING;
    let lines = flow_lines(&widths, WORD_GAP, usable_width);
    let line_height = |line: &[usize]| {
        line.iter().map(|&k| sizes[k] * 1.25).fold(0.0_f32, f32::max)
    };
    let total_h: f32 = lines.iter().map(|l| line_height(l)).sum::<f32>()
        + LINE_GAP * (lines.len().saturating_sub(1)) as f32;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = width,
        h = height
    ));
    svg.push_str(&format!("<desc>{}</desc>\n", xml_escape(&config.series_name)));
    svg.push_str(&format!(
        "<rect width=\"{}\" height=\"{}\" fill=\"{}\"/>\n",
        width,
        height,
        theme::color_hex(theme::BG_BASE)
    ));
    svg.push_str(&format!(
        "<text x=\"{}\" y=\"{}\" font-size=\"{}\" font-family=\"{}\" fill=\"{}\" text-anchor=\"middle\">{}</text>\n",
        width / 2,
        TITLE_HEIGHT / 2.0 + REGION_PADDING,
        theme::FONT_TITLE,
        xml_escape(&config.font_family),
        theme::color_hex(theme::TEXT_PRIMARY),
        xml_escape(&config.title)
    ));

    let cloud_top = TITLE_HEIGHT + REGION_PADDING;
    let cloud_height = height as f32 - cloud_top - REGION_PADDING;
    let mut y = cloud_top + ((cloud_height - total_h).max(0.0)) / 2.0;
    for line in &lines {
        let line_h = line_height(line);
        let line_w: f32 = line.iter().map(|&k| widths[k]).sum::<f32>()
            + WORD_GAP * (line.len().saturating_sub(1)) as f32;

        let mut x = width as f32 / 2.0 - line_w / 2.0;
        for &k in line {
            let entry = &config.series[order[k]];
            svg.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"{:.1}\" font-family=\"{}\" fill=\"{}\">{}</text>\n",
                x,
                y + line_h * 0.8,
                sizes[k],
                xml_escape(&config.font_family),
                theme::color_hex(theme::cloud_color(k)),
                xml_escape(&entry.name)
            ));
            x += widths[k] + WORD_GAP;
        }
        y += line_h + LINE_GAP;
    }

    svg.push_str("</svg>\n");
    svg
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartConfig;

    fn entry(name: &str, weight: f64) -> WordEntry {
        WordEntry {
            name: name.to_string(),
            weight,
        }
    }

    #[test]
    fn font_size_is_monotone_and_bounded() {
        let low = font_size_for(1.0, 1.0, 10.0);
        let mid = font_size_for(5.0, 1.0, 10.0);
        let high = font_size_for(10.0, 1.0, 10.0);

        assert!(low < mid && mid < high);
        assert_eq!(low, MIN_FONT_SIZE);
        assert_eq!(high, MAX_FONT_SIZE);
    }

    #[test]
    fn uniform_weights_map_to_the_midpoint_size() {
        let size = font_size_for(3.0, 3.0, 3.0);
        assert_eq!(size, (MIN_FONT_SIZE + MAX_FONT_SIZE) / 2.0);
    }

    #[test]
    fn out_of_range_weights_are_clamped() {
        assert_eq!(font_size_for(0.0, 1.0, 10.0), MIN_FONT_SIZE);
        assert_eq!(font_size_for(99.0, 1.0, 10.0), MAX_FONT_SIZE);
    }

    #[test]
    fn flow_respects_max_width_and_preserves_order() {
        let widths = vec![40.0, 40.0, 40.0, 40.0];
        let lines = flow_lines(&widths, 10.0, 100.0);

        // 40 + 10 + 40 = 90 fits, adding a third word would need 140.
        assert_eq!(lines, vec![vec![0, 1], vec![2, 3]]);
    }

    #[test]
    fn oversized_word_gets_its_own_line() {
        let widths = vec![30.0, 500.0, 30.0];
        let lines = flow_lines(&widths, 10.0, 100.0);

        assert_eq!(lines, vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn flow_of_nothing_is_no_lines() {
        assert!(flow_lines(&[], 10.0, 100.0).is_empty());
    }

    #[test]
    fn display_order_is_descending_by_weight() {
        let series = vec![entry("small", 1.0), entry("big", 9.0), entry("mid", 4.0)];
        assert_eq!(display_order(&series), vec![1, 2, 0]);
    }

    #[test]
    fn display_order_keeps_backend_order_for_ties() {
        let series = vec![entry("first", 2.0), entry("second", 2.0)];
        assert_eq!(display_order(&series), vec![0, 1]);
    }

    #[test]
    fn svg_contains_every_word_and_the_title() {
        let config = ChartConfig::for_series(vec![
            entry("data", 5.0),
            entry("cloud", 2.0),
            entry("journey", 1.0),
        ])
        .unwrap();
        let svg = render_svg(&config, 1200, 800);

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(">data</text>"));
        assert!(svg.contains(">cloud</text>"));
        assert!(svg.contains(">journey</text>"));
        assert!(svg.contains(&config.title));
        assert!(svg.contains("Inter, sans-serif"));
        assert!(svg.contains("<desc>Frequency</desc>"));
    }

    #[test]
    fn svg_escapes_markup_in_names() {
        let config = ChartConfig::for_series(vec![entry("<b>&\"x\"", 1.0)]).unwrap();
        let svg = render_svg(&config, 800, 600);

        assert!(svg.contains("&lt;b&gt;&amp;&quot;x&quot;"));
        assert!(!svg.contains("<b>"));
    }

    #[test]
    fn svg_layout_is_deterministic() {
        let series = vec![entry("one", 3.0), entry("two", 7.0), entry("three", 5.0)];
        let config = ChartConfig::for_series(series).unwrap();

        assert_eq!(render_svg(&config, 1200, 800), render_svg(&config, 1200, 800));
    }
}
