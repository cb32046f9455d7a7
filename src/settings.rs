//! Sandbox settings and preferences
//!
//! Persisted in LocalStorage on the web; natively the defaults are used.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_GRAVITY, GRAVITY_STEP};

/// Sandbox settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Downward acceleration at start-up (pixels/s²)
    pub initial_gravity: f32,
    /// Change applied per gravity button press
    pub gravity_step: f32,
    /// Show FPS readout in the sidebar
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_gravity: DEFAULT_GRAVITY,
            gravity_step: GRAVITY_STEP,
            show_fps: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "ball_drop_settings";

    /// Parse settings JSON, falling back to defaults for missing fields
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str::<Self>(json) {
            Ok(settings) => Some(settings.sanitized()),
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                None
            }
        }
    }

    /// Replace values the sandbox cannot run with by their defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.initial_gravity.is_finite() || self.initial_gravity < 0.0 {
            self.initial_gravity = defaults.initial_gravity;
        }
        if !self.gravity_step.is_finite() || self.gravity_step <= 0.0 {
            self.gravity_step = defaults.gravity_step;
        }
        self
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let settings = Settings::default();
        assert_eq!(settings.initial_gravity, 900.0);
        assert_eq!(settings.gravity_step, 100.0);
        assert!(!settings.show_fps);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            initial_gravity: 450.0,
            gravity_step: 25.0,
            show_fps: true,
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json), Some(settings));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"show_fps": true}"#).unwrap();
        assert!(settings.show_fps);
        assert_eq!(settings.initial_gravity, DEFAULT_GRAVITY);
        assert_eq!(settings.gravity_step, GRAVITY_STEP);
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert_eq!(Settings::from_json("not json"), None);
    }

    #[test]
    fn test_sanitized_replaces_unusable_values() {
        let settings = Settings::from_json(r#"{"initial_gravity": -5.0, "gravity_step": 0.0}"#)
            .unwrap();
        assert_eq!(settings.initial_gravity, DEFAULT_GRAVITY);
        assert_eq!(settings.gravity_step, GRAVITY_STEP);
    }
}
