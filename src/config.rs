use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the Gemini API
    pub endpoint: String,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Model used for cleaning and translating the sentence
    pub translation_model: String,

    /// Model used for the word-by-word analysis
    pub analysis_model: String,

    pub translation_temperature: f32,

    pub analysis_temperature: f32,

    /// Per-request HTTP timeout
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            translation_model: "gemini-2.5-flash-lite".to_string(),
            analysis_model: "gemini-2.5-flash".to_string(),
            translation_temperature: 0.3,
            analysis_temperature: 0.0,
            request_timeout_secs: 60,
        }
    }
}

impl Config {
    /// Get the default config file path: ~/.config/sentence-lens/config.toml
    pub fn default_config_path() -> Result<PathBuf> {
        let home_dir = std::env::home_dir().context("Could not determine home directory")?;

        Ok(home_dir
            .join(".config")
            .join("sentence-lens")
            .join("config.toml"))
    }

    /// Resolve the override or fall back to the default location
    pub fn resolve_path(config_path_override: Option<PathBuf>) -> PathBuf {
        config_path_override.unwrap_or_else(|| {
            Self::default_config_path().unwrap_or_else(|_| PathBuf::from("config.toml"))
        })
    }

    /// Load config from a file path, using defaults if the file doesn't exist
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to a file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .with_context(|| {
                format!(
                    "{var} environment variable is not set\nPlease set it with: export {var}=your_api_key",
                    var = self.api_key_env
                )
            })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
