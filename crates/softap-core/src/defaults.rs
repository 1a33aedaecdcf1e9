// ── Device defaults seam ──
//
// Some fields postdate older backup formats and cannot be recovered from
// the bytes. The one that is environment dependent (auto shutdown) is
// answered by whoever owns the device's live settings, passed explicitly
// into every decode call.

use crate::error::CoreError;

/// Source of device-level settings consulted while restoring old backups.
///
/// Implementations are queried at restore time, so the same payload can
/// restore differently if the device setting changed in between.
pub trait DefaultsProvider {
    /// The device's current auto-shutdown preference.
    ///
    /// An `Err` aborts the restore: callers never get a guessed value.
    fn is_auto_shutdown_enabled(&self) -> Result<bool, CoreError>;
}

impl<P: DefaultsProvider + ?Sized> DefaultsProvider for &P {
    fn is_auto_shutdown_enabled(&self) -> Result<bool, CoreError> {
        (**self).is_auto_shutdown_enabled()
    }
}

/// A provider with fixed answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDefaults {
    pub auto_shutdown_enabled: bool,
}

impl FixedDefaults {
    pub const fn new(auto_shutdown_enabled: bool) -> Self {
        Self {
            auto_shutdown_enabled,
        }
    }
}

impl Default for FixedDefaults {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DefaultsProvider for FixedDefaults {
    fn is_auto_shutdown_enabled(&self) -> Result<bool, CoreError> {
        Ok(self.auto_shutdown_enabled)
    }
}
