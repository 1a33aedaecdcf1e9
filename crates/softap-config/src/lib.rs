//! Configuration for the soft AP backup tools.
//!
//! One TOML file holds two things: the device settings a restore falls back
//! on when a backup predates them, and output defaults for the CLI. Values
//! layer as built-in defaults, then the file, then `SOFTAP_` environment
//! variables (`__` separates nested keys, e.g.
//! `SOFTAP_DEVICE__AUTO_SHUTDOWN_ENABLED=false`).

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use softap_core::{CoreError, DefaultsProvider};

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

/// Top-level TOML configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Live device settings consulted when restoring old backups.
    #[serde(default)]
    pub device: DeviceSettings,

    /// CLI output defaults.
    #[serde(default)]
    pub defaults: Defaults,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.defaults.output.as_str() {
            "json" | "json-compact" | "yaml" => Ok(()),
            other => Err(ConfigError::Validation {
                field: "defaults.output".into(),
                reason: format!("expected 'json', 'json-compact' or 'yaml', got '{other}'"),
            }),
        }
    }
}

/// Settings the device currently runs with.
///
/// A snapshot: once loaded it answers every restore with the same values.
/// Use [`SettingsFileProvider`] when restores must see edits made between
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeviceSettings {
    #[serde(default = "default_auto_shutdown")]
    pub auto_shutdown_enabled: bool,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            auto_shutdown_enabled: default_auto_shutdown(),
        }
    }
}

impl DefaultsProvider for DeviceSettings {
    fn is_auto_shutdown_enabled(&self) -> Result<bool, CoreError> {
        Ok(self.auto_shutdown_enabled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    /// Format for decoded configurations: "json", "json-compact" or "yaml".
    #[serde(default = "default_output")]
    pub output: String,

    /// Treat payload files as hex text rather than raw bytes.
    #[serde(default)]
    pub hex: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            hex: false,
        }
    }
}

fn default_auto_shutdown() -> bool {
    true
}
fn default_output() -> String {
    "json".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "softap", "softap").map_or_else(
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
    p.push("softap");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from `path` + environment. A missing file is not an
/// error; its values just come from the defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SOFTAP_").split("__"));

    let config: Config = figment.extract()?;
    config.validate()?;
    debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// Load config, falling back to defaults if it cannot be read.
pub fn load_config_or_default(path: &Path) -> Config {
    load_config_from(path).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "ignoring unreadable config");
        Config::default()
    })
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`, creating parent dirs.
pub fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Live device settings ────────────────────────────────────────────

/// Reads device settings from a config file every time a restore asks.
///
/// Two restores through the same provider see whatever the file says at
/// the moment each one runs.
#[derive(Debug, Clone)]
pub struct SettingsFileProvider {
    path: PathBuf,
}

impl SettingsFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn current(&self) -> Result<DeviceSettings, ConfigError> {
        load_config_from(&self.path).map(|config| config.device)
    }
}

impl DefaultsProvider for SettingsFileProvider {
    fn is_auto_shutdown_enabled(&self) -> Result<bool, CoreError> {
        self.current()
            .map(|settings| settings.auto_shutdown_enabled)
            .map_err(|e| CoreError::DefaultsUnavailable {
                setting: "auto_shutdown_enabled".into(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.device.auto_shutdown_enabled);
        assert_eq!(config.defaults.output, "json");
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "[device]\nauto_shutdown_enabled = false\n\n[defaults]\noutput = \"yaml\"\n",
        );
        let config = load_config_from(&path).unwrap();
        assert!(!config.device.auto_shutdown_enabled);
        assert_eq!(config.defaults.output, "yaml");
        assert!(!config.defaults.hex);
    }

    #[test]
    fn unknown_output_format_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "[defaults]\noutput = \"table\"\n");
        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn broken_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "[defaults\n");
        assert!(load_config_from(&path).is_err());
        assert_eq!(load_config_or_default(&path), Config::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            device: DeviceSettings {
                auto_shutdown_enabled: false,
            },
            defaults: Defaults {
                output: "yaml".into(),
                hex: true,
            },
        };
        save_config(&config, &path).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[test]
    fn snapshot_settings_answer_from_memory() {
        let settings = DeviceSettings {
            auto_shutdown_enabled: false,
        };
        assert!(!settings.is_auto_shutdown_enabled().unwrap());
    }

    #[test]
    fn file_provider_sees_edits_between_calls() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "[device]\nauto_shutdown_enabled = true\n");
        let provider = SettingsFileProvider::new(&path);
        assert!(provider.is_auto_shutdown_enabled().unwrap());

        write(&dir, "[device]\nauto_shutdown_enabled = false\n");
        assert!(!provider.is_auto_shutdown_enabled().unwrap());
    }

    #[test]
    fn unreadable_settings_are_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "[device\nauto_shutdown_enabled = ");
        let err = SettingsFileProvider::new(&path)
            .is_auto_shutdown_enabled()
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::DefaultsUnavailable { ref setting, .. } if setting == "auto_shutdown_enabled"
        ));
    }
}
