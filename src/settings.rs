//! Host settings and preferences
//!
//! Presentation only: how fast ticks are driven and what a frame looks
//! like. Gameplay constants are not configurable. Persisted in LocalStorage
//! on the web, read from a JSON file by the native driver.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::TICKS_PER_SECOND;
use crate::renderer::Palette;

/// Errors from loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulation ticks per real second
    pub tick_rate_hz: f64,
    /// Most ticks simulated for a single host frame
    pub max_substeps: u32,
    /// Pixels per logical unit for software rendering
    pub render_scale: f32,
    /// Frame colors
    pub palette: Palette,
    /// Show FPS counter
    pub show_fps: bool,
    /// `log` level filter name (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate_hz: TICKS_PER_SECOND,
            max_substeps: 5,
            render_scale: 1.0,
            palette: Palette::default(),
            show_fps: false,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "dino_runner_settings";

    /// Parse and validate settings JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the host loop cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.tick_rate_hz.is_finite() && self.tick_rate_hz > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "tick_rate_hz must be positive, got {}",
                self.tick_rate_hz
            )));
        }
        if self.max_substeps == 0 {
            return Err(SettingsError::Invalid("max_substeps must be at least 1".into()));
        }
        if !(self.render_scale.is_finite() && self.render_scale > 0.0 && self.render_scale <= 8.0) {
            return Err(SettingsError::Invalid(format!(
                "render_scale must be in (0, 8], got {}",
                self.render_scale
            )));
        }
        if self.level_filter().is_none() {
            return Err(SettingsError::Invalid(format!(
                "unknown log level {:?}",
                self.log_level
            )));
        }
        Ok(())
    }

    /// Milliseconds per simulation tick
    pub fn tick_ms(&self) -> f64 {
        1000.0 / self.tick_rate_hz
    }

    /// Flip the FPS counter, returning the new state
    pub fn toggle_fps(&mut self) -> bool {
        self.show_fps = !self.show_fps;
        self.show_fps
    }

    /// Parsed log level
    pub fn level_filter(&self) -> Option<log::LevelFilter> {
        self.log_level.parse().ok()
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
        else {
            log::warn!("LocalStorage unavailable, settings not saved");
            return;
        };

        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize settings: {}", e);
                return;
            }
        };
        match storage.set_item(Self::STORAGE_KEY, &json) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {:?}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Color;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert!((settings.tick_ms() - 1000.0 / 60.0).abs() < 1e-9);
        assert_eq!(settings.level_filter(), Some(log::LevelFilter::Info));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings =
            Settings::from_json(r##"{"tick_rate_hz": 30, "palette": {"ink": "#000"}}"##).unwrap();
        assert_eq!(settings.tick_rate_hz, 30.0);
        assert_eq!(settings.max_substeps, Settings::default().max_substeps);
        assert_eq!(settings.palette.ink, Color::rgb(0, 0, 0));
        assert_eq!(settings.palette.background, Palette::default().background);
    }

    #[test]
    fn test_round_trip() {
        let mut settings = Settings::default();
        settings.show_fps = true;
        settings.log_level = "debug".into();
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Settings::from_json(r#"{"tick_rate_hz": 0}"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"max_substeps": 0}"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"log_level": "loud"}"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_toggle_fps_survives_json() {
        let mut settings = Settings::default();
        assert!(settings.toggle_fps());
        let reloaded = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert!(reloaded.show_fps);
        assert!(!settings.toggle_fps());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
