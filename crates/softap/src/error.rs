//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a stable exit code each.

use miette::Diagnostic;
use thiserror::Error;

use softap_config::ConfigError;
use softap_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const MALFORMED: i32 = 4;
    pub const UNSUPPORTED_VERSION: i32 = 5;
    pub const DEFAULTS_UNAVAILABLE: i32 = 6;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Payload ──────────────────────────────────────────────────────

    #[error("Malformed backup payload: {reason}")]
    #[diagnostic(
        code(softap::malformed),
        help(
            "The bytes do not form a complete backup.\n\
             If the file holds hex text, pass --hex. If it is a bare legacy\n\
             record without a version tag, pass --legacy."
        )
    )]
    Malformed { reason: String },

    #[error("Unsupported backup format version {version}")]
    #[diagnostic(
        code(softap::unsupported_version),
        help("Restorable versions: 3, 5, 6, 7, 8, 9. Run: softap inspect <file>")
    )]
    UnsupportedVersion { version: i32 },

    #[error("Device setting '{setting}' is unavailable: {reason}")]
    #[diagnostic(
        code(softap::defaults_unavailable),
        help(
            "Backups older than version 6 take this setting from the device.\n\
             Fix the config file, or pass --auto-shutdown true|false."
        )
    )]
    DefaultsUnavailable { setting: String, reason: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(softap::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(
        code(softap::config),
        help("Check the file printed by: softap config path")
    )]
    Config(#[from] ConfigError),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(softap::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("YAML rendering failed: {0}")]
    #[diagnostic(code(softap::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Malformed { .. } => exit_code::MALFORMED,
            Self::UnsupportedVersion { .. } => exit_code::UNSUPPORTED_VERSION,
            Self::DefaultsUnavailable { .. } => exit_code::DEFAULTS_UNAVAILABLE,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MalformedPayload { reason } => CliError::Malformed { reason },

            CoreError::UnsupportedVersion { version } => CliError::UnsupportedVersion { version },

            CoreError::DefaultsUnavailable { setting, reason } => {
                CliError::DefaultsUnavailable { setting, reason }
            }

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "configuration".into(),
                reason: message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_keep_distinct_exit_codes() {
        let cases = [
            (
                CoreError::MalformedPayload {
                    reason: "short".into(),
                },
                exit_code::MALFORMED,
            ),
            (
                CoreError::UnsupportedVersion { version: 4 },
                exit_code::UNSUPPORTED_VERSION,
            ),
            (
                CoreError::DefaultsUnavailable {
                    setting: "auto_shutdown_enabled".into(),
                    reason: "offline".into(),
                },
                exit_code::DEFAULTS_UNAVAILABLE,
            ),
            (
                CoreError::ValidationFailed {
                    message: "ssid too long".into(),
                },
                exit_code::USAGE,
            ),
        ];
        for (core, code) in cases {
            assert_eq!(CliError::from(core).exit_code(), code);
        }
    }
}
