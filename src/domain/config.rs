//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Defines the structs for the chat service, the two upstream APIs, storage and system paths.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub services: ServicesConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub system: SystemConfig,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| crate::strings::logs::config_read_error(&path.display().to_string()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context(crate::strings::logs::CONFIG_PARSE_ERROR)
    }
}

/// Configuration for various connected services.
#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    pub matrix: MatrixConfig,
    #[serde(default)]
    pub dictionary: DictionaryConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
}

/// Specific configuration for the Matrix service.
#[derive(Debug, Deserialize, Clone)]
pub struct MatrixConfig {
    pub username: String,
    pub password: String,
    pub homeserver: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl MatrixConfig {
    /// Name users address the bot by in group rooms.
    pub fn mention_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DictionaryConfig {
    #[serde(default = "default_dictionary_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            base_url: default_dictionary_url(),
            timeout: default_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    #[serde(default = "default_weather_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_key_env: Option<String>, // e.g. "WEATHER_API_KEY"
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_url(),
            api_key: None,
            api_key_env: None,
            timeout: default_timeout(),
        }
    }
}

impl WeatherConfig {
    /// Resolves the API key from the inline value or the named environment variable.
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Some(key) = &self.api_key {
            return Ok(key.clone());
        }
        if let Some(env_var) = &self.api_key_env {
            return std::env::var(env_var)
                .with_context(|| format!("Weather API key env var {env_var} not set"));
        }
        anyhow::bail!("No weather API key provided - set api_key or api_key_env")
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
        }
    }
}

/// System-level settings for the bot.
#[derive(Debug, Deserialize, Clone)]
pub struct SystemConfig {
    #[serde(default = "default_audio_dir")]
    pub audio_dir: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            audio_dir: default_audio_dir(),
            log_dir: default_log_dir(),
        }
    }
}

fn default_dictionary_url() -> String {
    "https://api.dictionaryapi.dev/api/v2/entries/en/".to_string()
}

fn default_weather_url() -> String {
    "https://api.weatherapi.com/v1".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_database_url() -> String {
    "sqlite://data/almanac.db".to_string()
}

fn default_audio_dir() -> String {
    "data/words_audio_files".to_string()
}

fn default_log_dir() -> String {
    "data".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_fills_defaults() {
        let config = AppConfig::parse(
            "services:\n  matrix:\n    username: almanac\n    password: secret\n    homeserver: https://matrix.org\n",
        )
        .unwrap();

        assert_eq!(config.services.matrix.mention_name(), "almanac");
        assert_eq!(config.services.dictionary.timeout, 10);
        assert!(config.services.dictionary.base_url.contains("dictionaryapi.dev"));
        assert_eq!(config.storage.database_url, "sqlite://data/almanac.db");
        assert_eq!(config.system.audio_dir, "data/words_audio_files");
    }

    #[test]
    fn inline_weather_key_wins() {
        let config = AppConfig::parse(concat!(
            "services:\n",
            "  matrix:\n    username: a\n    password: b\n    homeserver: h\n    display_name: Almanac\n",
            "  weather:\n    api_key: abc123\n    api_key_env: ALMANAC_TEST_UNSET_KEY\n    timeout: 3\n",
        ))
        .unwrap();

        assert_eq!(config.services.matrix.mention_name(), "Almanac");
        assert_eq!(config.services.weather.timeout, 3);
        assert_eq!(config.services.weather.resolve_api_key().unwrap(), "abc123");
    }

    #[test]
    fn missing_weather_key_is_an_error() {
        assert!(WeatherConfig::default().resolve_api_key().is_err());
    }

    #[test]
    fn missing_matrix_section_fails() {
        assert!(AppConfig::parse("storage:\n  database_url: sqlite::memory:\n").is_err());
    }
}
