//! Page settings
//!
//! Persisted in LocalStorage, separate from the stored name. Every field has
//! a default, so a partial or missing entry still yields a working page.

use serde::{Deserialize, Serialize};

use crate::card::ConfettiParams;
use crate::consts::*;
use crate::platform::KeyValueStore;

/// Where the card page takes the greeting name from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GreetingSource {
    /// Always show `Settings::greeting_name`
    #[default]
    Fixed,
    /// Show the name stored by the name page, if any
    Stored,
}

impl GreetingSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            GreetingSource::Fixed => "Fixed",
            GreetingSource::Stored => "Stored",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fixed" => Some(GreetingSource::Fixed),
            "stored" => Some(GreetingSource::Stored),
            _ => None,
        }
    }
}

/// Card page settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Cake overlay time before the card opens (ms)
    pub reveal_delay_ms: u32,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f64,
    pub confetti: ConfettiParams,

    // === Greeting ===
    pub greeting: GreetingSource,
    /// Fixed greeting name, also the fallback for `Stored`
    pub greeting_name: String,

    /// Clicking the open secondary card closes it
    pub close_secondary_on_click: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reveal_delay_ms: REVEAL_DELAY_MS,
            music_volume: MUSIC_VOLUME,
            confetti: ConfettiParams::default(),

            greeting: GreetingSource::Fixed,
            greeting_name: GREETING_NAME.to_string(),

            close_secondary_on_click: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "birthdayCardSettings";

    /// Clamp values that would break playback or spin the scheduler
    pub fn sanitized(mut self) -> Self {
        self.music_volume = if self.music_volume.is_finite() {
            self.music_volume.clamp(0.0, 1.0)
        } else {
            MUSIC_VOLUME
        };
        self.confetti.spawn_interval_ms = self.confetti.spawn_interval_ms.max(1);
        self
    }

    /// Parse settings JSON, falling back to defaults when it is invalid
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(err) => {
                log::warn!("Ignoring invalid settings: {}", err);
                Self::default()
            }
        }
    }

    /// Name to show on the card
    pub fn greeting_name(&self, store: &dyn KeyValueStore) -> String {
        match self.greeting {
            GreetingSource::Fixed => self.greeting_name.clone(),
            GreetingSource::Stored => match store.get(NAME_KEY) {
                Ok(Some(name)) if !name.trim().is_empty() => name,
                Ok(_) => self.greeting_name.clone(),
                Err(err) => {
                    log::warn!("Could not read stored name: {}", err);
                    self.greeting_name.clone()
                }
            },
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
