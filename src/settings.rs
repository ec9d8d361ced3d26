//! Game configuration
//!
//! Fixed for the lifetime of a session. On the web it comes from the page
//! URL (`?difficulty=easy&pause=1`), then LocalStorage, then defaults. A
//! config taken from the URL is written back to LocalStorage so later visits
//! without a query keep it.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sim::Difficulty;

/// Where a loaded config came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Url,
    Storage,
    Default,
}

/// Construction-time configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    /// Whether the pause toggle is honoured
    pub allow_pause: bool,
    /// Selects spawn policy and speed cap
    pub difficulty: Difficulty,
}

impl GameConfig {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "dino_run_config";

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Apply `difficulty=` and `pause=` from a URL query string.
    ///
    /// A leading `?` is accepted and unknown keys are ignored. Returns whether
    /// any recognised key was present.
    pub fn apply_query(&mut self, query: &str) -> Result<bool> {
        let mut found = false;
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "difficulty" => {
                    self.difficulty =
                        Difficulty::from_str(value).ok_or_else(|| Error::InvalidParam {
                            key: "difficulty",
                            value: value.to_string(),
                        })?;
                    found = true;
                }
                "pause" | "allow_pause" => {
                    self.allow_pause = parse_flag(value).ok_or_else(|| Error::InvalidParam {
                        key: "pause",
                        value: value.to_string(),
                    })?;
                    found = true;
                }
                _ => {}
            }
        }
        Ok(found)
    }

    /// Pick the config from a URL query, else a stored JSON blob, else
    /// defaults. Bad values in either source are logged and skipped.
    pub fn resolve(query: &str, stored: Option<&str>) -> (Self, ConfigSource) {
        let mut config = Self::default();
        match config.apply_query(query) {
            Ok(true) => {
                log::info!("Config from URL: {:?}", config);
                return (config, ConfigSource::Url);
            }
            Ok(false) => {}
            Err(e) => log::warn!("Ignoring URL config: {}", e),
        }

        if let Some(json) = stored {
            match Self::from_json(json) {
                Ok(config) => {
                    log::info!("Loaded stored config: {:?}", config);
                    return (config, ConfigSource::Storage);
                }
                Err(e) => log::warn!("Ignoring stored config: {}", e),
            }
        }

        log::info!("Using default config");
        (Self::default(), ConfigSource::Default)
    }

    /// Load config from the page URL, then LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> (Self, ConfigSource) {
        let window = web_sys::window();
        let query = window
            .as_ref()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let stored = window
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok())
            .flatten();
        Self::resolve(&query, stored.as_deref())
    }

    /// Save config to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    if storage.set_item(Self::STORAGE_KEY, &json).is_ok() {
                        log::info!("Config saved");
                    }
                }
                Err(e) => log::warn!("Config not saved: {}", e),
            }
        }
    }

    /// Native builds have no page URL or storage
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> (Self, ConfigSource) {
        Self::resolve("", None)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "" | "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert!(!config.allow_pause);
        assert_eq!(config.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_json() {
        let config = GameConfig::from_json(r#"{"allow_pause":true,"difficulty":"easy"}"#).unwrap();
        assert_eq!(
            config,
            GameConfig {
                allow_pause: true,
                difficulty: Difficulty::Easy,
            }
        );

        // Missing fields fall back to defaults
        let partial = GameConfig::from_json(r#"{"difficulty":"easy"}"#).unwrap();
        assert!(!partial.allow_pause);

        assert!(matches!(
            GameConfig::from_json(r#"{"difficulty":"insane"}"#),
            Err(Error::Json(_))
        ));
        assert_eq!(GameConfig::from_json(&config.to_json().unwrap()).unwrap(), config);
    }

    #[test]
    fn test_query() {
        let mut config = GameConfig::default();
        assert!(config.apply_query("?difficulty=easy&pause=1&ref=abc").unwrap());
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert!(config.allow_pause);

        assert!(config.apply_query("pause=off").unwrap());
        assert!(!config.allow_pause);

        assert!(config.apply_query("pause").unwrap());
        assert!(config.allow_pause);

        assert!(!config.apply_query("").unwrap());
        assert!(!config.apply_query("?utm_source=mail").unwrap());
    }

    #[test]
    fn test_resolve_prefers_url_then_storage() {
        let stored = GameConfig {
            allow_pause: true,
            difficulty: Difficulty::Easy,
        }
        .to_json()
        .unwrap();

        let (config, source) = GameConfig::resolve("?difficulty=hard", Some(&stored));
        assert_eq!(source, ConfigSource::Url);
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert!(!config.allow_pause);

        let (config, source) = GameConfig::resolve("?ref=abc", Some(&stored));
        assert_eq!(source, ConfigSource::Storage);
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert!(config.allow_pause);

        let (config, source) = GameConfig::resolve("", Some("not json"));
        assert_eq!(source, ConfigSource::Default);
        assert_eq!(config, GameConfig::default());

        // A bad URL value falls through to storage
        let (_, source) = GameConfig::resolve("?difficulty=nightmare", Some(&stored));
        assert_eq!(source, ConfigSource::Storage);
    }

    #[test]
    fn test_url_config_survives_reload() {
        // First visit with a query; the saved blob is what a reload sees
        let (config, source) = GameConfig::resolve("?difficulty=easy&pause=1", None);
        assert_eq!(source, ConfigSource::Url);
        let saved = config.to_json().unwrap();

        let (reloaded, source) = GameConfig::resolve("", Some(&saved));
        assert_eq!(source, ConfigSource::Storage);
        assert_eq!(reloaded, config);
        assert_eq!(reloaded.difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_query_rejects_bad_values() {
        let mut config = GameConfig::default();
        let err = config.apply_query("difficulty=nightmare").unwrap_err();
        assert!(matches!(err, Error::InvalidParam { key: "difficulty", .. }));
        assert!(config.apply_query("pause=maybe").is_err());
    }
}
