use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const API_KEY_ENV: &str = "TMDB_API_KEY";
pub const LANGUAGE_ENV: &str = "TMDB_LANGUAGE";
const DEFAULT_LANGUAGE: &str = "en-US";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("could not determine config path")]
    NoConfigPath,
    #[error("config I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppSettings {
    pub api_key: String,
    #[serde(default)]
    pub language: String,
}

impl AppSettings {
    pub fn config_path() -> Option<PathBuf> {
        std::env::var("HOME").ok().map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("flixster")
                .join("config.json")
        })
    }

    /// Environment first, then the config file. Environment values override
    /// individual fields of the file.
    pub fn load() -> Option<Self> {
        let settings = Self::load_partial();
        settings.is_valid().then_some(settings)
    }

    /// Whatever the file and environment provide, even without an API key.
    pub fn load_partial() -> Self {
        Self::overlay_env(
            Self::load_file().unwrap_or_default(),
            std::env::var(API_KEY_ENV).ok(),
            std::env::var(LANGUAGE_ENV).ok(),
        )
    }

    /// Names of the variables currently overriding the config file.
    pub fn env_overrides() -> Vec<&'static str> {
        [API_KEY_ENV, LANGUAGE_ENV]
            .into_iter()
            .filter(|name| {
                std::env::var(name)
                    .map(|v| !v.trim().is_empty())
                    .unwrap_or(false)
            })
            .collect()
    }

    fn load_file() -> Option<Self> {
        let path = Self::config_path()?;
        let content = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(settings) => {
                debug!(path = %path.display(), "loaded settings file");
                Some(settings)
            }
            Err(e) => {
                info!(path = %path.display(), error = %e, "ignoring unreadable settings file");
                None
            }
        }
    }

    fn overlay_env(mut base: Self, api_key: Option<String>, language: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            base.api_key = key.trim().to_string();
        }
        if let Some(lang) = language.filter(|l| !l.trim().is_empty()) {
            base.language = lang.trim().to_string();
        }
        base
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::config_path().ok_or(SettingsError::NoConfigPath)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        info!(path = %path.display(), "saved settings");
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Accepts `ll` or `ll-CC`; blank means the default.
    pub fn is_valid_language(tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() {
            return true;
        }
        let (lang, region) = match tag.split_once('-') {
            Some((lang, region)) => (lang, Some(region)),
            None => (tag, None),
        };
        let lang_ok = lang.len() == 2 && lang.bytes().all(|b| b.is_ascii_lowercase());
        let region_ok = region
            .map_or(true, |r| r.len() == 2 && r.bytes().all(|b| b.is_ascii_uppercase()));
        lang_ok && region_ok
    }

    pub fn language_or_default(&self) -> String {
        if self.language.trim().is_empty() {
            String::from(DEFAULT_LANGUAGE)
        } else {
            self.language.trim().to_string()
        }
    }
}
