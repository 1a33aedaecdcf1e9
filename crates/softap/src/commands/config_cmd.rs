//! Config subcommand handlers.

use softap_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

fn parse_bool(field: &str, value: &str) -> Result<bool, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: "must be 'true' or 'false'".into(),
    })
}

/// Apply one `key = value` edit to `cfg`.
fn set_key(cfg: &mut Config, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "device.auto_shutdown_enabled" | "auto_shutdown_enabled" | "auto-shutdown" => {
            cfg.device.auto_shutdown_enabled = parse_bool(key, &value)?;
        }
        "defaults.output" | "output" => cfg.defaults.output = value,
        "defaults.hex" | "hex" => cfg.defaults.hex = parse_bool(key, &value)?,
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: \
                     device.auto_shutdown_enabled, defaults.output, defaults.hex"
                ),
            });
        }
    }
    cfg.validate()?;
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load(global)?;
            let out = output::render_single(config::output_format(global, &cfg), &cfg)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", config::config_path(global).display());
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let path = config::config_path(global);
            let mut cfg = config::load(global)?;
            set_key(&mut cfg, &key, value)?;
            softap_config::save_config(&cfg, &path)?;
            if !global.quiet {
                eprintln!("✓ Set {key} in {}", path.display());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn set_known_keys() {
        let mut cfg = Config::default();
        set_key(&mut cfg, "device.auto_shutdown_enabled", "false".into()).unwrap();
        set_key(&mut cfg, "output", "yaml".into()).unwrap();
        set_key(&mut cfg, "defaults.hex", "true".into()).unwrap();
        assert!(!cfg.device.auto_shutdown_enabled);
        assert_eq!(cfg.defaults.output, "yaml");
        assert!(cfg.defaults.hex);
    }

    #[test]
    fn reject_unknown_key_and_bad_values() {
        let mut cfg = Config::default();
        assert!(matches!(
            set_key(&mut cfg, "profile", "home".into()),
            Err(CliError::Validation { .. })
        ));
        assert!(matches!(
            set_key(&mut cfg, "defaults.hex", "maybe".into()),
            Err(CliError::Validation { .. })
        ));
        assert!(matches!(
            set_key(&mut cfg, "defaults.output", "table".into()),
            Err(CliError::Config(_))
        ));
    }
}
