//! CLI config layer: `GlobalOpts`-aware wrappers over `softap_config`.

use std::path::PathBuf;

use softap_config::{Config, SettingsFileProvider};
use softap_core::{DefaultsProvider, FixedDefaults};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// The config file in effect: `--config` / `SOFTAP_CONFIG`, else the
/// platform default.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(softap_config::config_path)
}

pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(softap_config::load_config_from(&config_path(global))?)
}

/// Load config for output defaults only. An unreadable file is logged and
/// ignored here; restores that need device settings still report it.
pub fn load_or_default(global: &GlobalOpts) -> Config {
    softap_config::load_config_or_default(&config_path(global))
}

/// `--output` wins over the config file's `defaults.output`.
pub fn output_format(global: &GlobalOpts, cfg: &Config) -> OutputFormat {
    global.output.unwrap_or(match cfg.defaults.output.as_str() {
        "yaml" => OutputFormat::Yaml,
        "json-compact" => OutputFormat::JsonCompact,
        _ => OutputFormat::Json,
    })
}

/// Where restores of old backups get the device's auto-shutdown setting.
///
/// An explicit `--auto-shutdown` pins the answer; otherwise the config file
/// is read at the moment the decoder asks.
pub fn defaults_provider(
    global: &GlobalOpts,
    auto_shutdown: Option<bool>,
) -> Box<dyn DefaultsProvider> {
    match auto_shutdown {
        Some(enabled) => Box::new(FixedDefaults::new(enabled)),
        None => Box::new(SettingsFileProvider::new(config_path(global))),
    }
}
