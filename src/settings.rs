//! Player preferences
//!
//! Persisted in LocalStorage, separate from the tuning data.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Gameplay feel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TuningPreset {
    #[default]
    Smooth,
    Classic,
}

impl TuningPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            TuningPreset::Smooth => "smooth",
            TuningPreset::Classic => "classic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "smooth" => Some(TuningPreset::Smooth),
            "classic" => Some(TuningPreset::Classic),
            _ => None,
        }
    }

    pub fn tuning(&self) -> Tuning {
        match self {
            TuningPreset::Smooth => Tuning::smooth(),
            TuningPreset::Classic => Tuning::classic(),
        }
    }
}

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub preset: TuningPreset,

    // === Audio ===
    pub muted: bool,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Hit sound volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Pause audio when the window loses focus
    pub mute_on_blur: bool,

    // === Controls ===
    /// On-screen joystick and jump button
    pub show_touch_controls: bool,

    // === Accessibility ===
    /// No floating indicators above hit blocks
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preset: TuningPreset::Smooth,

            muted: false,
            music_volume: 0.1,
            sfx_volume: 0.4,
            mute_on_blur: true,

            show_touch_controls: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Tuning for the chosen preset with preferences applied
    pub fn tuning(&self) -> Tuning {
        let mut tuning = self.preset.tuning();
        if self.reduced_motion {
            tuning.indicator.enabled = false;
        }
        tuning
    }

    /// Music volume after mute
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.music_volume.clamp(0.0, 1.0)
        }
    }

    /// Hit sound volume after mute
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.sfx_volume.clamp(0.0, 1.0)
        }
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "portfolio_platformer_settings";

    /// Settings from a stored JSON value; absent or unreadable values fall
    /// back to defaults, missing fields take their default
    pub fn from_stored(json: Option<&str>) -> Self {
        match json.map(serde_json::from_str::<Self>) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            Some(Err(e)) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = Self::local_storage().and_then(|s| s.get_item(Self::STORAGE_KEY).ok()?);
        Self::from_stored(stored.as_deref())
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = Self::local_storage() else {
            log::warn!("LocalStorage unavailable, settings not saved");
            return;
        };
        match serde_json::to_string(self) {
            Ok(json) => match storage.set_item(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Failed to save settings: {:?}", e),
            },
            Err(e) => log::warn!("Failed to encode settings: {}", e),
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::from_stored(None)
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
    fn test_preset_names() {
        assert_eq!(TuningPreset::from_str("Classic"), Some(TuningPreset::Classic));
        assert_eq!(TuningPreset::from_str("smooth"), Some(TuningPreset::Smooth));
        assert_eq!(TuningPreset::from_str("turbo"), None);
        assert_eq!(TuningPreset::Classic.as_str(), "classic");
    }

    #[test]
    fn test_reduced_motion_disables_indicators() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert!(!settings.tuning().indicator.enabled);
        assert!(Settings::default().tuning().indicator.enabled);
    }

    #[test]
    fn test_mute() {
        let mut settings = Settings::default();
        assert_eq!(settings.effective_music_volume(), 0.1);
        settings.muted = true;
        assert_eq!(settings.effective_music_volume(), 0.0);
        assert_eq!(settings.effective_sfx_volume(), 0.0);
    }

    #[test]
    fn test_unreadable_storage_falls_back_to_defaults() {
        assert_eq!(Settings::from_stored(None), Settings::default());
        assert_eq!(Settings::from_stored(Some("{not json")), Settings::default());
        assert_eq!(Settings::load(), Settings::default());
    }

    #[test]
    fn test_stored_json_fills_missing_fields() {
        let settings = Settings::from_stored(Some(r#"{"muted":true,"preset":"Classic"}"#));
        assert!(settings.muted);
        assert_eq!(settings.preset, TuningPreset::Classic);
        assert_eq!(settings.sfx_volume, 0.4);
        assert_eq!(settings.tuning(), Tuning::classic());
    }
}
