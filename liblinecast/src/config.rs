//! Configuration management for Linecast

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

pub const DEFAULT_API_BASE: &str = "https://api.line.me";
pub const DEFAULT_TOKEN_ENV: &str = "LINE_CHANNEL_ACCESS_TOKEN";
pub const DEFAULT_CONTENT_PATH: &str = "content.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub line: LineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    #[serde(default = "default_content_path")]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Name of the environment variable holding the channel access token
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

fn default_content_path() -> String {
    DEFAULT_CONTENT_PATH.to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_token_env() -> String {
    DEFAULT_TOKEN_ENV.to_string()
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            path: default_content_path(),
        }
    }
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            token_env: default_token_env(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// An explicit `LINECAST_CONFIG` path must exist. The XDG location is
    /// optional and falls back to built-in defaults when absent.
    pub fn load() -> Result<Self> {
        if let Some(path) = explicit_config_path() {
            return Self::load_from_path(&path);
        }

        match resolve_config_path() {
            Ok(path) if path.exists() => Self::load_from_path(&path),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Content file path with `~` expanded
    pub fn content_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.content.path).to_string())
    }

    /// Full URL of the broadcast endpoint
    pub fn broadcast_url(&self) -> String {
        format!(
            "{}/v2/bot/message/broadcast",
            self.line.api_base.trim_end_matches('/')
        )
    }
}

fn explicit_config_path() -> Option<PathBuf> {
    std::env::var("LINECAST_CONFIG")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(|p| PathBuf::from(shellexpand::tilde(&p).to_string()))
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Some(path) = explicit_config_path() {
        return Ok(path);
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("linecast").join("config.toml"))
}
