//! Chart configuration and display state for the word cloud

use crate::constants::*;
use crate::fetch::FetchError;
use crate::types::WordEntry;
use crate::utils::format_weight;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid series entry \"{name}\": weight {weight} is not a non-negative number")]
    InvalidEntry { name: String, weight: f64 },
}

/// Tooltip templates applied per hovered word
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipConfig {
    pub header_format: String,
    pub point_format: String,
}

/// Screen reader support for individual words
#[derive(Debug, Clone, PartialEq)]
pub struct AccessibilityConfig {
    pub enabled: bool,
    pub value_description_format: String,
}

/// Entries of the chart's export menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMenuItem {
    ViewFullscreen,
    DownloadSvg,
    DownloadPng,
}

impl ExportMenuItem {
    pub fn label(self) -> &'static str {
        match self {
            Self::ViewFullscreen => "View in full screen",
            Self::DownloadSvg => "Download SVG vector image",
            Self::DownloadPng => "Download PNG image",
        }
    }
}

/// Static rendering configuration handed to the word cloud widget.
/// Built once per render call and not mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub title: String,
    pub series_name: String,
    pub series: Vec<WordEntry>,
    pub tooltip: TooltipConfig,
    pub accessibility: AccessibilityConfig,
    pub export_menu: Vec<ExportMenuItem>,
    pub font_family: String,
}

impl ChartConfig {
    /// Build the fixed display configuration around a fetched series.
    /// Rejects entries that violate the weight invariant.
    pub fn for_series(series: Vec<WordEntry>) -> Result<Self, ChartError> {
        if let Some(bad) = series
            .iter()
            .find(|e| !e.weight.is_finite() || e.weight < 0.0)
        {
            return Err(ChartError::InvalidEntry {
                name: bad.name.clone(),
                weight: bad.weight,
            });
        }

        Ok(Self {
            title: CHART_TITLE.to_string(),
            series_name: SERIES_NAME.to_string(),
            series,
            tooltip: TooltipConfig {
                header_format: TOOLTIP_HEADER_FORMAT.to_string(),
                point_format: TOOLTIP_POINT_FORMAT.to_string(),
            },
            accessibility: AccessibilityConfig {
                enabled: true,
                value_description_format: VALUE_DESCRIPTION_FORMAT.to_string(),
            },
            export_menu: vec![
                ExportMenuItem::ViewFullscreen,
                ExportMenuItem::DownloadSvg,
                ExportMenuItem::DownloadPng,
            ],
            font_family: CLOUD_FONT_FAMILY.to_string(),
        })
    }

    pub fn tooltip_text(&self, entry: &WordEntry) -> String {
        format!(
            "{}\n{}",
            format_template(&self.tooltip.header_format, entry),
            format_template(&self.tooltip.point_format, entry)
        )
    }

    pub fn value_description(&self, entry: &WordEntry) -> String {
        format_template(&self.accessibility.value_description_format, entry)
    }
}

/// Substitute `{point.key}` and `{point.weight}` placeholders
pub fn format_template(template: &str, entry: &WordEntry) -> String {
    template
        .replace("{point.key}", &entry.name)
        .replace("{point.weight}", &format_weight(entry.weight))
}

/// Terminal states of the chart display region.
/// Every load operation ends in exactly one of the last three.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartState {
    Loading,
    Ready(ChartConfig),
    NoData,
    Failed(String),
}

impl ChartState {
    /// Resolve a fetch outcome into the display region's terminal state.
    /// Nothing propagates past this point.
    pub fn from_fetch(result: Result<Vec<WordEntry>, FetchError>) -> Self {
        match result {
            Ok(entries) if entries.is_empty() => Self::NoData,
            Ok(entries) => match ChartConfig::for_series(entries) {
                Ok(config) => Self::Ready(config),
                Err(e) => Self::Failed(format!("{}{}", CHART_ERROR_PREFIX, e)),
            },
            Err(e) => Self::Failed(format!("{}{}", CHART_ERROR_PREFIX, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<WordEntry> {
        vec![
            WordEntry {
                name: "data".to_string(),
                weight: 5.0,
            },
            WordEntry {
                name: "cloud".to_string(),
                weight: 2.0,
            },
        ]
    }

    #[test]
    fn ready_state_embeds_the_series_unchanged() {
        let state = ChartState::from_fetch(Ok(entries()));
        match state {
            ChartState::Ready(config) => {
                assert_eq!(config.series, entries());
                assert_eq!(config.title, CHART_TITLE);
                assert_eq!(config.export_menu.len(), 3);
            }
            other => panic!("expected Ready, got {:?}", other),
        }
    }

    #[test]
    fn empty_series_is_no_data_not_an_error() {
        assert_eq!(ChartState::from_fetch(Ok(Vec::new())), ChartState::NoData);
    }

    #[test]
    fn http_error_becomes_failed_with_prefix() {
        let state = ChartState::from_fetch(Err(FetchError::Http {
            message: "db unavailable".to_string(),
        }));
        match state {
            ChartState::Failed(message) => {
                assert_eq!(
                    message,
                    "Could not load chart: Error fetching data: db unavailable"
                );
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn negative_weight_is_a_render_error() {
        let state = ChartState::from_fetch(Ok(vec![WordEntry {
            name: "bogus".to_string(),
            weight: -1.0,
        }]));
        match state {
            ChartState::Failed(message) => {
                assert!(message.starts_with(CHART_ERROR_PREFIX));
                assert!(message.contains("bogus"));
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn non_finite_weight_is_a_render_error() {
        let state = ChartState::from_fetch(Ok(vec![WordEntry {
            name: "nan".to_string(),
            weight: f64::NAN,
        }]));
        assert!(matches!(state, ChartState::Failed(_)));
    }

    #[test]
    fn resolution_is_idempotent() {
        let first = ChartState::from_fetch(Ok(entries()));
        let second = ChartState::from_fetch(Ok(entries()));
        assert_eq!(first, second);

        let first_err = ChartState::from_fetch(Err(FetchError::Http {
            message: "x".to_string(),
        }));
        let second_err = ChartState::from_fetch(Err(FetchError::Http {
            message: "x".to_string(),
        }));
        assert_eq!(first_err, second_err);
    }

    #[test]
    fn templates_substitute_key_and_weight() {
        let entry = WordEntry {
            name: "journey".to_string(),
            weight: 7.0,
        };
        assert_eq!(format_template("{point.key}:", &entry), "journey:");
        assert_eq!(format_template("{point.weight}", &entry), "7");
        assert_eq!(format_template("{point.weight}.", &entry), "7.");
    }

    #[test]
    fn tooltip_text_joins_header_and_point_lines() {
        let config = ChartConfig::for_series(entries()).unwrap();
        let text = config.tooltip_text(&config.series[0]);
        assert_eq!(text, "data:\n5");
    }
}
