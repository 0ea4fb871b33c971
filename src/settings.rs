//! Persisted preferences: scheme selection and disc offset
//!
//! Two logical sections, flat key-value style:
//! `color.scheme` (scheme id) and `circles.offset` (string-encoded float,
//! where "0" means "unset, use the H/4 default"). LocalStorage on web,
//! a JSON file on native.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_SCHEME_ID;

fn default_scheme() -> String {
    DEFAULT_SCHEME_ID.to_string()
}

fn default_offset() -> String {
    "0".to_string()
}

/// `color` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSection {
    /// Selected scheme id
    #[serde(default = "default_scheme")]
    pub scheme: String,
}

impl Default for ColorSection {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
        }
    }
}

/// `circles` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircleSection {
    /// String-encoded offset; "0" reads back as unset
    #[serde(default = "default_offset")]
    pub offset: String,
}

impl Default for CircleSection {
    fn default() -> Self {
        Self {
            offset: default_offset(),
        }
    }
}

/// The whole settings store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub color: ColorSection,
    #[serde(default)]
    pub circles: CircleSection,
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "impossible_colors_settings";

    /// The persisted offset, or None when unset or unreadable
    pub fn offset(&self) -> Option<f32> {
        match self.circles.offset.parse::<f32>() {
            Ok(value) if value > 0.0 => Some(value),
            _ => None,
        }
    }

    /// Store an offset; the string encoding round-trips the float exactly
    pub fn set_offset(&mut self, offset: f32) {
        self.circles.offset = offset.to_string();
    }

    /// Lenient parse: unknown fields are dropped, missing ones take
    /// defaults, garbage yields the default store
    pub fn from_json(text: &str) -> Self {
        match serde_json::from_str(text) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("settings unreadable, using defaults: {err}");
                Self::default()
            }
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

    /// Load settings from a JSON file; absence or garbage yields defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_json(&text),
            Err(_) => {
                log::info!("no settings file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write settings to a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.color.scheme, "yb");
        assert_eq!(settings.circles.offset, "0");
        assert_eq!(settings.offset(), None);
    }

    #[test]
    fn test_zero_offset_reads_as_unset() {
        let mut settings = Settings::default();
        settings.set_offset(0.0);
        assert_eq!(settings.offset(), None);
    }

    #[test]
    fn test_offset_string_round_trip() {
        let mut settings = Settings::default();
        settings.set_offset(137.625);
        assert_eq!(settings.offset(), Some(137.625));

        // Through the JSON encoding too
        let json = serde_json::to_string(&settings).unwrap();
        let reloaded = Settings::from_json(&json);
        assert_eq!(reloaded.offset(), Some(137.625));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings = Settings::from_json(r#"{"color": {"scheme": "rg"}}"#);
        assert_eq!(settings.color.scheme, "rg");
        assert_eq!(settings.circles.offset, "0");
    }

    #[test]
    fn test_garbage_yields_defaults() {
        let settings = Settings::from_json("not json at all");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_unparsable_offset_reads_as_unset() {
        let settings = Settings::from_json(r#"{"circles": {"offset": "banana"}}"#);
        assert_eq!(settings.offset(), None);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings.color.scheme = "rc".to_string();
        settings.set_offset(99.5);
        settings.save_to(&path).unwrap();

        let reloaded = Settings::load_from(&path);
        assert_eq!(reloaded, settings);
        assert_eq!(reloaded.offset(), Some(99.5));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("nope.json"));
        assert_eq!(settings, Settings::default());
    }
}
