//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web. Native builds always use defaults.

use serde::{Deserialize, Serialize};

use crate::sim::KeyAction;

/// Keyboard bindings, as `KeyboardEvent.code` values per action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub move_left: Vec<String>,
    pub move_right: Vec<String>,
    pub jump: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: vec!["ArrowLeft".into(), "KeyA".into()],
            move_right: vec!["ArrowRight".into(), "KeyD".into()],
            jump: vec!["Space".into()],
        }
    }
}

impl KeyBindings {
    /// Action bound to a key code, if any
    pub fn action_for(&self, code: &str) -> Option<KeyAction> {
        let bound = |codes: &[String]| codes.iter().any(|c| c == code);
        if bound(&self.move_left) {
            Some(KeyAction::MoveLeft)
        } else if bound(&self.move_right) {
            Some(KeyAction::MoveRight)
        } else if bound(&self.jump) {
            Some(KeyAction::Jump)
        } else {
            None
        }
    }

    /// Keys whose browser default (page scrolling) must be suppressed
    pub fn blocks_default(code: &str) -> bool {
        code == "Space" || code.starts_with("Arrow")
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Keyboard bindings
    pub bindings: KeyBindings,
    /// Upper bound on device pixel ratio used for the backbuffer
    pub pixel_ratio_cap: f64,
    /// Show the frame rate in the overlay
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bindings: KeyBindings::default(),
            pixel_ratio_cap: 2.0,
            show_fps: false,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "coin_dash_settings";

    /// Device pixel ratio after applying the cap
    pub fn effective_pixel_ratio(&self, device_ratio: f64) -> f64 {
        device_ratio.clamp(1.0, self.pixel_ratio_cap.max(1.0))
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
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
    fn test_default_bindings() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.action_for("ArrowLeft"), Some(KeyAction::MoveLeft));
        assert_eq!(bindings.action_for("KeyA"), Some(KeyAction::MoveLeft));
        assert_eq!(bindings.action_for("ArrowRight"), Some(KeyAction::MoveRight));
        assert_eq!(bindings.action_for("KeyD"), Some(KeyAction::MoveRight));
        assert_eq!(bindings.action_for("Space"), Some(KeyAction::Jump));
        assert_eq!(bindings.action_for("KeyW"), None);
    }

    #[test]
    fn test_blocks_default() {
        assert!(KeyBindings::blocks_default("Space"));
        assert!(KeyBindings::blocks_default("ArrowUp"));
        assert!(!KeyBindings::blocks_default("KeyA"));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{ "bindings": { "jump": ["KeyW"] } }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.bindings.action_for("KeyW"), Some(KeyAction::Jump));
        assert_eq!(settings.bindings.action_for("Space"), None);
        // Untouched fields fall back to defaults
        assert_eq!(
            settings.bindings.move_left,
            KeyBindings::default().move_left
        );
        assert_eq!(settings.pixel_ratio_cap, 2.0);
        assert!(!settings.show_fps);
    }

    #[test]
    fn test_show_fps_round_trips_through_json() {
        let settings = Settings {
            show_fps: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"show_fps\":true"));
        let loaded: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_effective_pixel_ratio() {
        let settings = Settings::default();
        assert_eq!(settings.effective_pixel_ratio(3.0), 2.0);
        assert_eq!(settings.effective_pixel_ratio(1.5), 1.5);
        assert_eq!(settings.effective_pixel_ratio(0.5), 1.0);
    }
}
