//! Configuration management

use crate::core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `api.base_url`
pub const API_URL_ENV: &str = "LINGYE_API_URL";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub i18n: I18nConfig,
}

impl Config {
    /// Directory holding the config file and the language preference
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

        let app_config_dir = config_dir.join("lingye-site");

        if !app_config_dir.exists() {
            fs::create_dir_all(&app_config_dir)?;
        }

        Ok(app_config_dir)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from disk, writing defaults on first run
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            let config = Self::default();
            config.save_to(&path)?;
            return Ok(config);
        }

        Self::load_from(&path)
    }

    /// Load and normalize a configuration file at an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse TOML text into a normalized configuration
    pub fn parse(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.normalize();
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Apply the `LINGYE_API_URL` override, if set
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                log::info!("Using API base from {}", API_URL_ENV);
                self.api.base_url = url.trim().to_string();
            }
        }
        self.normalize();
    }

    /// Enforce the invariants the rest of the crate relies on
    pub fn normalize(&mut self) {
        self.api.base_url = self.api.base_url.trim_end_matches('/').to_string();

        let mut languages: Vec<String> = Vec::new();
        for code in &self.i18n.supported_languages {
            let code = code.trim().to_ascii_lowercase();
            if !code.is_empty() && !languages.contains(&code) {
                languages.push(code);
            }
        }
        if languages.is_empty() {
            languages = default_supported_languages();
        }

        let default = self.i18n.default_language.trim().to_ascii_lowercase();
        self.i18n.default_language = if default.is_empty() {
            languages[0].clone()
        } else {
            default
        };
        if !languages.contains(&self.i18n.default_language) {
            log::warn!(
                "Default language '{}' missing from supported list, adding it",
                self.i18n.default_language
            );
            languages.insert(0, self.i18n.default_language.clone());
        }
        self.i18n.supported_languages = languages;

        if self.i18n.storage_key.trim().is_empty() {
            self.i18n.storage_key = default_storage_key();
        }
    }
}

/// REST backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String { "http://lingyealu.cn".to_string() }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Translation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nConfig {
    /// Language used when nothing else resolves
    #[serde(default = "default_language")]
    pub default_language: String,
    /// Language codes accepted in URLs, the switcher and the store
    #[serde(default = "default_supported_languages")]
    pub supported_languages: Vec<String>,
    /// Name of the persisted language preference entry
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_language() -> String { "en".to_string() }
fn default_supported_languages() -> Vec<String> {
    ["en", "zh", "es", "pt"].iter().map(|s| s.to_string()).collect()
}
fn default_storage_key() -> String { "language".to_string() }

impl I18nConfig {
    /// Check whether a code belongs to the supported set
    pub fn is_supported(&self, code: &str) -> bool {
        self.supported_languages.iter().any(|c| c == code)
    }

    /// Map a requested code onto the supported set, falling back to the default
    pub fn resolve(&self, code: &str) -> String {
        let code = code.trim().to_ascii_lowercase();
        if self.is_supported(&code) {
            code
        } else {
            self.default_language.clone()
        }
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            supported_languages: default_supported_languages(),
            storage_key: default_storage_key(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.api.base_url, "http://lingyealu.cn");
        assert_eq!(config.i18n.default_language, "en");
        assert_eq!(config.i18n.supported_languages, vec!["en", "zh", "es", "pt"]);
        assert_eq!(config.i18n.storage_key, "language");
    }

    #[test]
    fn test_normalize_trailing_slash_and_default_language() {
        let config = Config::parse(
            r#"
            [api]
            base_url = "http://localhost:9001/"

            [i18n]
            default_language = "FR"
            supported_languages = ["en", "ZH", "zh", ""]
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://localhost:9001");
        assert_eq!(config.i18n.default_language, "fr");
        assert_eq!(config.i18n.supported_languages, vec!["fr", "en", "zh"]);
    }

    #[test]
    fn test_resolve_unknown_language() {
        let i18n = I18nConfig::default();
        assert_eq!(i18n.resolve("ES"), "es");
        assert_eq!(i18n.resolve("ru"), "en");
        assert!(!i18n.is_supported("hi"));
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::parse("[api").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_save_and_load_roundtrip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.i18n.default_language = "zh".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.i18n.default_language, "zh");
        assert_eq!(loaded.api.base_url, config.api.base_url);
    }
}
