//! Application settings stored in `~/.labpanel/config.json`

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn default_tick_rate_ms() -> u64 {
    100
}

fn default_error_display_ms() -> u64 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Panel definition to load; the built-in demo panel when unset
    #[serde(default)]
    pub panel_path: Option<String>,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// How long a validation error stays on screen
    #[serde(default = "default_error_display_ms")]
    pub error_display_ms: u64,
    /// tracing filter level: error, warn, info, debug or trace
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            panel_path: None,
            tick_rate_ms: default_tick_rate_ms(),
            error_display_ms: default_error_display_ms(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".labpanel"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("labpanel.log"))
    }

    /// Load the config at `path`; `Ok(None)` when there is none yet
    fn load_from(path: &Path) -> anyhow::Result<Option<Config>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::from_json(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(Some(config))
    }

    fn from_json(contents: &str) -> anyhow::Result<Config> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Load the config, writing the defaults on first run
    ///
    /// A file that cannot be read or parsed is left untouched and the
    /// defaults are used in memory; the error is returned for reporting.
    pub fn load_or_init() -> (Config, Option<anyhow::Error>) {
        match Self::config_path() {
            Some(path) => Self::load_or_init_at(&path),
            None => (
                Config::default(),
                Some(anyhow::anyhow!("Could not determine config directory")),
            ),
        }
    }

    fn load_or_init_at(path: &Path) -> (Config, Option<anyhow::Error>) {
        match Self::load_from(path) {
            Ok(Some(config)) => (config, None),
            Ok(None) => {
                let config = Config::default();
                let error = config.save_to(path).err();
                (config, error)
            }
            Err(e) => (Config::default(), Some(e)),
        }
    }

    fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(config_dir) = path.parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }

    pub fn error_display(&self) -> Duration {
        Duration::from_millis(self.error_display_ms)
    }

    /// Parsed log level; unknown names fall back to info
    pub fn level(&self) -> tracing::Level {
        self.log_level
            .parse::<tracing::Level>()
            .unwrap_or(tracing::Level::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = Config::from_json(r#"{"panel_path": "/tmp/bench.yaml"}"#).unwrap();
        assert_eq!(config.panel_path.as_deref(), Some("/tmp/bench.yaml"));
        assert_eq!(config.tick_rate(), Duration::from_millis(100));
        assert_eq!(config.error_display(), Duration::from_secs(3));
        assert_eq!(config.level(), tracing::Level::INFO);
    }

    #[test]
    fn test_level_parsing() {
        let config = Config {
            log_level: "debug".to_string(),
            ..Config::default()
        };
        assert_eq!(config.level(), tracing::Level::DEBUG);

        let config = Config {
            log_level: "chatty".to_string(),
            ..Config::default()
        };
        assert_eq!(config.level(), tracing::Level::INFO);
    }

    fn scratch_path(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("labpanel-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir.join("config.json")
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Config::from_json("{not json").is_err());
    }

    #[test]
    fn test_invalid_file_is_kept() {
        let path = scratch_path("invalid");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{bad").unwrap();

        let (config, error) = Config::load_or_init_at(&path);
        assert_eq!(config, Config::default());
        assert!(error.is_some());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{bad");
    }

    #[test]
    fn test_first_run_writes_defaults() {
        let path = scratch_path("first-run");

        let (config, error) = Config::load_or_init_at(&path);
        assert!(error.is_none());
        assert_eq!(config, Config::default());
        assert_eq!(Config::load_from(&path).unwrap(), Some(Config::default()));
    }

    #[test]
    fn test_round_trip_through_json() {
        let config = Config {
            tick_rate_ms: 50,
            ..Config::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(Config::from_json(&json).unwrap(), config);
    }
}
