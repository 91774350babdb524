//! Persisted settings and API key resolution.

use crate::error::ConfigError;
use anyhow::Context;
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "checkmaa";
const FILE_NAME: Option<&str> = None;

pub const API_KEY_ENV: &str = "CHECKMAA_API_KEY";

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct UserConfig {
  pub api_key: Option<String>,
}

/// Read ~/.config/checkmaa/default-config.toml (or OS equivalent).
pub fn load() -> UserConfig {
  confy::load(APP_NAME, FILE_NAME).unwrap_or_default()
}

pub fn store(cfg: &UserConfig) -> anyhow::Result<()> {
  confy::store(APP_NAME, FILE_NAME, cfg)
    .context("Failed to write the checkmaa config file")
}

/// Picks the API key: flag first, then the environment, then the config
/// file. Empty values count as absent.
///
/// # Errors
///
/// Returns [`ConfigError::MissingApiKey`] when no source provides a key.
pub fn resolve_api_key(
  flag: Option<String>,
  env: Option<String>,
  stored: &UserConfig,
) -> Result<String, ConfigError> {
  flag
    .into_iter()
    .chain(env)
    .chain(stored.api_key.clone())
    .find(|key| !key.trim().is_empty())
    .ok_or(ConfigError::MissingApiKey)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn stored(key: Option<&str>) -> UserConfig {
    UserConfig {
      api_key: key.map(str::to_string),
    }
  }

  #[test]
  fn test_flag_overrides_env_and_file() {
    let key = resolve_api_key(
      Some("flag".into()),
      Some("env".into()),
      &stored(Some("file")),
    )
    .unwrap();
    assert_eq!(key, "flag");
  }

  #[test]
  fn test_env_overrides_file() {
    let key =
      resolve_api_key(None, Some("env".into()), &stored(Some("file"))).unwrap();
    assert_eq!(key, "env");
  }

  #[test]
  fn test_file_is_last_resort() {
    let key = resolve_api_key(None, None, &stored(Some("file"))).unwrap();
    assert_eq!(key, "file");
  }

  #[test]
  fn test_empty_values_are_skipped() {
    let key =
      resolve_api_key(Some(String::new()), Some("  ".into()), &stored(Some("file")))
        .unwrap();
    assert_eq!(key, "file");
  }

  #[test]
  fn test_missing_everywhere_is_an_error() {
    let err = resolve_api_key(None, None, &UserConfig::default()).unwrap_err();
    assert!(matches!(err, ConfigError::MissingApiKey));
  }
}
