//! Application constants and configuration

/// Default backend endpoint serving the word frequency payload
pub const WORD_FREQUENCY_URL: &str = "http://127.0.0.1:5001/data/word_frequency";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Title rendered above the cloud
pub const CHART_TITLE: &str = "Word Cloud from Palabras_Clave";
/// Series name carried into exported charts
pub const SERIES_NAME: &str = "Frequency";

// Tooltip and accessibility templates ({point.key} / {point.weight})
pub const TOOLTIP_HEADER_FORMAT: &str = "{point.key}:";
pub const TOOLTIP_POINT_FORMAT: &str = "{point.weight}";
pub const VALUE_DESCRIPTION_FORMAT: &str = "{point.weight}.";

/// Font family stamped on exported charts
pub const CLOUD_FONT_FAMILY: &str = "Inter, sans-serif";

/// Shown in the chart region when the backend returns an empty dataset
pub const NO_DATA_NOTICE: &str = "No data available to display the chart.";
/// Prefix for every user-visible load failure
pub const CHART_ERROR_PREFIX: &str = "Could not load chart: ";
