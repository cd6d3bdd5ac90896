//! Player preferences
//!
//! Persisted as JSON in LocalStorage on the web; native builds use defaults.

use serde::{Deserialize, Serialize};

use crate::sim::InputDevice;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Skip the slow-motion slam on super throws
    pub reduced_motion: bool,

    // === Input ===
    /// Force mouse or touch wording (None = detect)
    pub input_device: Option<InputDevice>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 1.0,
            muted: false,
            reduced_motion: false,
            input_device: None,
        }
    }
}

impl Settings {
    /// Effective sound effect gain (respects mute)
    pub fn sfx_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            crate::unit_clamp(self.master_volume) * crate::unit_clamp(self.sfx_volume)
        }
    }

    /// Effective music gain (respects mute)
    pub fn music_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            crate::unit_clamp(self.master_volume) * crate::unit_clamp(self.music_volume)
        }
    }

    /// Whether a super throw should slow time before impact
    pub fn slow_motion_enabled(&self) -> bool {
        !self.reduced_motion
    }

    /// Override wins over detection
    pub fn device_or(&self, detected: InputDevice) -> InputDevice {
        self.input_device.unwrap_or(detected)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "ddakji_settings";

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
