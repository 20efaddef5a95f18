//! Persisted application settings.
//!
//! Settings live in `.matsel/config.toml`. The prediction service base URL can
//! be overridden per launch with `MATSEL_API_BASE`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize, de::Error as SerdeDeError};
use thiserror::Error;

use crate::app_dirs;
use crate::http_client::HttpTimeouts;

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable that overrides the configured API base URL.
pub const API_BASE_ENV: &str = "MATSEL_API_BASE";
/// Base URL used when neither the environment nor the config file sets one.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";

/// Aggregate application settings loaded from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiSettings,
}

/// Where and how to reach the prediction service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL; `/predict` and `/health` are resolved against it.
    #[serde(default = "default_api_base")]
    pub base_url: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_api_base(),
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: default_read_timeout_secs(),
        }
    }
}

impl ApiSettings {
    /// HTTP timeouts derived from the configured seconds.
    pub fn timeouts(&self) -> HttpTimeouts {
        HttpTimeouts {
            connect: Duration::from_secs(self.connect_timeout_secs),
            read: Duration::from_secs(self.read_timeout_secs),
        }
    }
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    crate::http_client::DEFAULT_CONNECT_TIMEOUT.as_secs()
}

fn default_read_timeout_secs() -> u64 {
    crate::http_client::DEFAULT_READ_TIMEOUT.as_secs()
}

/// Errors that may occur while loading or saving app configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    #[error("Invalid API base URL {value:?}: {reason}")]
    InvalidApiBase { value: String, reason: String },
    #[error("No suitable config directory found")]
    NoConfigDir,
}

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from disk, returning defaults if missing.
///
/// A missing file is created with the defaults so it can be edited later.
/// `MATSEL_API_BASE` takes precedence over the file's base URL.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    load_with_api_base(None)
}

/// Like [`load_or_default`], but a non-blank `api_base` wins over
/// `MATSEL_API_BASE`, which is then neither read nor validated.
pub fn load_with_api_base(api_base: Option<&str>) -> Result<AppConfig, ConfigError> {
    let path = config_path()?;
    if !path.exists() {
        save_to_path(&AppConfig::default(), &path)?;
    }
    let explicit = api_base.filter(|value| !value.trim().is_empty());
    let env_base = match explicit {
        Some(_) => None,
        None => std::env::var(API_BASE_ENV).ok(),
    };
    load_from_path(&path, explicit.or(env_base.as_deref()))
}

/// Load configuration from a specific file, applying an optional base URL override.
pub fn load_from_path(path: &Path, api_base_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut config = load_settings_from(path)?;
    if let Some(value) = api_base_override.filter(|value| !value.trim().is_empty()) {
        tracing::info!("Using API base override: {value}");
        config.api.base_url = value.to_string();
    }
    config.api.base_url = normalize_api_base(&config.api.base_url)?;
    config.api.connect_timeout_secs = config.api.connect_timeout_secs.max(1);
    config.api.read_timeout_secs = config.api.read_timeout_secs.max(1);
    Ok(config)
}

/// Persist configuration to disk, overwriting any previous contents.
pub fn save(config: &AppConfig) -> Result<(), ConfigError> {
    let path = config_path()?;
    save_to_path(config, &path)
}

/// Save configuration to a specific path, creating parent directories as needed.
pub fn save_to_path(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let data = toml::to_string_pretty(config).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, data).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Trim and validate a base URL, dropping any trailing slashes.
pub fn normalize_api_base(value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim().trim_end_matches('/');
    let invalid = |reason: String| ConfigError::InvalidApiBase {
        value: value.to_string(),
        reason,
    };
    let parsed = url::Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme {other:?}"))),
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(trimmed.to_string())
}

fn load_settings_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let bytes = std::fs::read(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source: SerdeDeError::custom(source),
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => {
            ConfigError::CreateDir { path, source }
        }
    }
}
