//! TOML-based application configuration.
//!
//! Stores:
//! - Event provider endpoint and bearer token
//! - Refresh interval and host tick cadence
//! - Proximity thresholds and row count
//! - Indicator brightness
//!
//! Configuration is stored at `~/.config/meetlight/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{data_dir, data_dir_path};
use crate::error::ConfigError;
use crate::proximity::{ProximityConfig, DEFAULT_BRIGHTNESS};
use crate::scheduler::DEFAULT_INTERVAL_SECS;

/// Overrides `provider.token` when set.
pub const TOKEN_ENV: &str = "MEETLIGHT_TOKEN";

/// Where events come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_url: String,
    /// Sent as `Authorization: Bearer <token>`.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Fetch throttle and host tick cadence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: i64,
    #[serde(default = "default_tick_secs")]
    pub tick_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    #[serde(default = "default_brightness")]
    pub brightness: u8,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/meetlight/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub proximity: ProximityConfig,
    #[serde(default)]
    pub indicator: IndicatorConfig,
}

// Default functions
fn default_timeout_secs() -> u64 {
    10
}
fn default_interval_secs() -> i64 {
    DEFAULT_INTERVAL_SECS
}
fn default_tick_secs() -> u64 {
    60
}
fn default_brightness() -> u8 {
    DEFAULT_BRIGHTNESS
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            tick_secs: default_tick_secs(),
        }
    }
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            brightness: default_brightness(),
        }
    }
}

impl ProviderConfig {
    /// Token from the environment, falling back to the config file.
    pub fn resolved_token(&self) -> Option<String> {
        std::env::var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.is_empty())
            .or_else(|| self.token.clone())
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<i64>() {
                            serde_json::Value::Number(n.into())
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    /// Load from `path`, writing defaults there if the file is absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match Self::read_existing(path)? {
            Some(cfg) => Ok(cfg),
            None => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Like [`Config::load`], but never touches the disk beyond reading.
    pub fn read() -> Result<Self, ConfigError> {
        Self::read_from(&data_dir_path().join("config.toml"))
    }

    /// Read `path`, falling back to defaults if it is absent. Nothing is written.
    pub fn read_from(path: &Path) -> Result<Self, ConfigError> {
        Ok(Self::read_existing(path)?.unwrap_or_default())
    }

    fn read_existing(path: &Path) -> Result<Option<Self>, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config =
                    toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                cfg.validate()?;
                Ok(Some(cfg))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. Does not save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the result fails validation. `self` is untouched on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: &str| {
            Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: message.to_string(),
            })
        };
        if self.refresh.interval_secs <= 0 {
            return invalid("refresh.interval_secs", "must be positive");
        }
        if self.refresh.tick_secs == 0 {
            return invalid("refresh.tick_secs", "must be positive");
        }
        if self.proximity.soon_threshold_secs < 0 {
            return invalid("proximity.soon_threshold_secs", "must not be negative");
        }
        if self.proximity.max_rows == 0 {
            return invalid("proximity.max_rows", "must be at least 1");
        }
        if self.indicator.brightness > 100 {
            return invalid("indicator.brightness", "must be between 0 and 100");
        }
        Ok(())
    }
}
