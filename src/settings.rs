//! User settings stored as settings.json in the app data directory

use crate::constants::WORD_FREQUENCY_URL;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Backend
    pub endpoint_url: Option<String>,

    // Last directory a chart was exported to
    pub export_dir: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            endpoint_url: None,
            export_dir: None,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    pub fn endpoint_or_default(&self) -> String {
        self.endpoint_url
            .clone()
            .unwrap_or_else(|| WORD_FREQUENCY_URL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_data_dir(tag: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "word-cloud-viewer-test-{}-{}",
            tag,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn settings_round_trip() {
        let dir = temp_data_dir("roundtrip");
        let settings = Settings {
            window_x: Some(12.0),
            window_y: Some(34.0),
            window_w: Some(1024.0),
            window_h: Some(768.0),
            endpoint_url: Some("http://localhost:9999/data/word_frequency".to_string()),
            export_dir: Some("/tmp/exports".to_string()),
        };
        settings.save(&dir);

        let loaded = Settings::load(&dir);
        assert_eq!(loaded.window_w, Some(1024.0));
        assert_eq!(
            loaded.endpoint_url.as_deref(),
            Some("http://localhost:9999/data/word_frequency")
        );
        assert_eq!(loaded.export_dir.as_deref(), Some("/tmp/exports"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn unreadable_settings_fall_back_to_defaults() {
        let dir = temp_data_dir("garbage");
        std::fs::write(dir.join("settings.json"), "not json at all {{{").unwrap();

        let loaded = Settings::load(&dir);
        assert!(loaded.endpoint_url.is_none());
        assert_eq!(loaded.endpoint_or_default(), WORD_FREQUENCY_URL);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_settings_use_default_endpoint() {
        let dir = temp_data_dir("missing");
        let loaded = Settings::load(&dir);
        assert_eq!(loaded.endpoint_or_default(), WORD_FREQUENCY_URL);
        std::fs::remove_dir_all(&dir).ok();
    }
}
