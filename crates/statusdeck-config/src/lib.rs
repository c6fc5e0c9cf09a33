//! Shared configuration for the statusdeck CLI and TUI.
//!
//! TOML file at the platform config dir, `STATUSDECK_` environment
//! overrides, and translation to `statusdeck_core::TransportConfig`.
//! The backend address is fixed and deliberately not configurable here.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use statusdeck_core::TransportConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Output defaults for the CLI.
    #[serde(default)]
    pub defaults: Defaults,

    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpSettings,

    /// Terminal UI settings.
    #[serde(default)]
    pub tui: TuiSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    /// `table`, `json`, `json-compact`, `yaml` or `plain`.
    #[serde(default = "default_output")]
    pub output: String,

    /// `auto`, `always` or `never`.
    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HttpSettings {
    /// Per-request timeout. Unset means calls may hang indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TuiSettings {
    /// UI tick interval in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Log file path; defaults to the temp directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for TuiSettings {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            log_file: None,
        }
    }
}

fn default_tick_ms() -> u64 {
    250
}

impl Config {
    /// Reject values that would make the binaries misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.timeout_secs == Some(0) {
            return Err(ConfigError::Validation {
                field: "http.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.tui.tick_ms == 0 {
            return Err(ConfigError::Validation {
                field: "tui.tick_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Transport settings for the API client.
    pub fn transport(&self) -> TransportConfig {
        let transport = TransportConfig::default();
        match self.http.timeout_secs {
            Some(secs) => transport.with_timeout(Duration::from_secs(secs)),
            None => transport,
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tui.tick_ms)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "statusdeck", "statusdeck").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("statusdeck");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file path + environment.
///
/// Environment keys nest with a double underscore, e.g.
/// `STATUSDECK_HTTP__TIMEOUT_SECS=5`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("STATUSDECK_").split("__"));

    let config: Config = figment.extract()?;
    config.validate()?;
    Ok(config)
}

/// Load config, returning a default if the file is missing or invalid.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

/// Serialize config to TOML and write it to `path`, creating parents.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    cfg.validate()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.defaults.output, "table");
        assert_eq!(cfg.defaults.color, "auto");
        assert_eq!(cfg.http.timeout_secs, None);
        assert_eq!(cfg.tui.tick_ms, 250);
    }

    #[test]
    fn partial_file_merges_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[http]\ntimeout_secs = 5\n").unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.http.timeout_secs, Some(5));
        assert_eq!(cfg.defaults.output, "table");
        assert_eq!(cfg.transport().timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config {
            defaults: Defaults {
                output: "yaml".into(),
                color: "never".into(),
            },
            http: HttpSettings {
                timeout_secs: Some(10),
            },
            tui: TuiSettings {
                tick_ms: 100,
                log_file: Some(PathBuf::from("/tmp/statusdeck.log")),
            },
        };

        save_config_to(&cfg, &path).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), cfg);
    }

    #[test]
    fn default_config_omits_unset_options() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(text.contains("[defaults]"));
        assert!(!text.contains("timeout_secs"));
        assert!(!text.contains("log_file"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[http]\ntimeout_secs = 0\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn default_transport_has_no_timeout() {
        assert_eq!(Config::default().transport().timeout, None);
    }
}
