mod config;

pub use config::{Config, IndicatorConfig, ProviderConfig, RefreshConfig, TOKEN_ENV};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/meetlight[-dev]/` based on MEETLIGHT_ENV.
///
/// Set MEETLIGHT_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = data_dir_path();
    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::SaveFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

/// Same location as [`data_dir`], without creating it.
pub fn data_dir_path() -> PathBuf {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MEETLIGHT_ENV").unwrap_or_else(|_| "production".to_string());

    if env == "dev" {
        base_dir.join("meetlight-dev")
    } else {
        base_dir.join("meetlight")
    }
}
