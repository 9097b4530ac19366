//! Utility functions

use chrono::Local;

/// Convert a premultiplied-alpha pixmap to straight RGBA bytes.
pub fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// Format a weight for display, dropping the fraction when integral
pub fn format_weight(weight: f64) -> String {
    if weight.fract() == 0.0 && weight.abs() < 1e15 {
        format!("{}", weight as i64)
    } else {
        format!("{}", weight)
    }
}

/// Timestamped file stem for exported charts
pub fn export_file_stem() -> String {
    format!("word-cloud_{}", Local::now().format("%Y-%m-%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_weights_drop_the_fraction() {
        assert_eq!(format_weight(5.0), "5");
        assert_eq!(format_weight(0.0), "0");
        assert_eq!(format_weight(120.0), "120");
    }

    #[test]
    fn fractional_weights_keep_the_fraction() {
        assert_eq!(format_weight(2.5), "2.5");
        assert_eq!(format_weight(0.125), "0.125");
    }

    #[test]
    fn export_stem_is_prefixed() {
        assert!(export_file_stem().starts_with("word-cloud_"));
    }
}
