//! Remote query configuration file
//!
//! A TOML file holding a `QueryConfig`, by default at
//! `<data dir>/gamepulse/config.toml`. Command-line flags and the
//! `GAMEPULSE_API_URL` / `GAMEPULSE_API_KEY` variables override it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gamepulse_core::QueryConfig;
use tracing::debug;

/// Default config file location
pub fn default_config_path() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.data_dir().join("gamepulse").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("gamepulse.toml"))
}

/// Load the config. An explicitly given path must exist; a missing default
/// file just means built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<QueryConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = default_config_path();
            if !path.exists() {
                debug!(path = %path.display(), "No config file, using defaults");
                return Ok(QueryConfig::default());
            }
            path
        }
    };

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: QueryConfig =
        toml::from_str(&text).with_context(|| format!("Failed to parse config file {}", path.display()))?;
    debug!(path = %path.display(), base_url = %config.base_url, "Loaded config");
    Ok(config)
}

/// Apply flag/env overrides on top of the file config.
pub fn apply_overrides(mut config: QueryConfig, api_url: Option<String>, api_key: Option<String>) -> QueryConfig {
    if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
        config.base_url = url;
    }
    if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
        config.api_key = Some(key);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
base_url = "https://db.example.com/rest/v1"
api_key = "anon"
timeout_ms = 5000
"#
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.base_url, "https://db.example.com/rest/v1");
        assert_eq!(config.api_key.as_deref(), Some("anon"));
        assert_eq!(config.timeout_ms, 5000);
        assert_eq!(config.rows_procedure, QueryConfig::default().rows_procedure);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = load_config(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_ms = \"soon\"").unwrap();
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_overrides() {
        let config = apply_overrides(QueryConfig::default(), Some("http://override".into()), Some("  ".into()));
        assert_eq!(config.base_url, "http://override");
        assert_eq!(config.api_key, None);

        let config = apply_overrides(config, None, Some("key".into()));
        assert_eq!(config.base_url, "http://override");
        assert_eq!(config.api_key.as_deref(), Some("key"));
    }
}
