// ── Core error types ──
//
// Every failure the model or the backup codec can report. Decoding never
// recovers internally: a rejected payload surfaces here and the caller
// decides whether to try different bytes.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Payload errors ───────────────────────────────────────────────
    #[error("Malformed backup payload: {reason}")]
    MalformedPayload { reason: String },

    #[error("Unsupported backup format version {version}")]
    UnsupportedVersion { version: i32 },

    // ── Collaborator errors ──────────────────────────────────────────
    #[error("Device default for {setting} is unavailable: {reason}")]
    DefaultsUnavailable { setting: String, reason: String },

    // ── Model errors ─────────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },
}

impl CoreError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            reason: reason.into(),
        }
    }

    /// True for every error that means "these bytes are not a backup we can
    /// restore", whether the buffer is damaged or simply from an unknown
    /// format version.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::MalformedPayload { .. } | Self::UnsupportedVersion { .. }
        )
    }
}
