// ── Security and privacy enums ──
//
// Discriminants are the integer codes written into backups.

use serde::{Deserialize, Serialize};
use strum::{Display, FromRepr};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, FromRepr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[repr(i32)]
pub enum SecurityType {
    #[default]
    Open = 0,
    Wpa2Psk = 1,
    Wpa3SaeTransition = 2,
    Wpa3Sae = 3,
    Wpa3OweTransition = 4,
    Wpa3Owe = 5,
}

impl SecurityType {
    #[allow(clippy::as_conversions)]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Whether this security type is keyed by a user passphrase.
    pub const fn uses_passphrase(self) -> bool {
        matches!(self, Self::Wpa2Psk | Self::Wpa3SaeTransition | Self::Wpa3Sae)
    }

    /// Security types that must stay interoperable with WPA2 clients limit
    /// the passphrase to the WPA2 PSK length range.
    pub const fn requires_wpa2_passphrase_length(self) -> bool {
        matches!(self, Self::Wpa2Psk | Self::Wpa3SaeTransition)
    }
}

/// How the access point chooses the MAC address it beacons from.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, FromRepr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[repr(i32)]
pub enum MacRandomization {
    #[default]
    None = 0,
    Persistent = 1,
    NonPersistent = 2,
}

impl MacRandomization {
    #[allow(clippy::as_conversions)]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_from_repr() {
        for code in 0..=5 {
            let security = SecurityType::from_repr(code);
            assert_eq!(security.map(SecurityType::code), Some(code));
        }
        assert_eq!(SecurityType::from_repr(6), None);
        assert_eq!(SecurityType::from_repr(-1), None);
    }

    #[test]
    fn passphrase_requirements() {
        assert!(!SecurityType::Open.uses_passphrase());
        assert!(!SecurityType::Wpa3Owe.uses_passphrase());
        assert!(!SecurityType::Wpa3OweTransition.uses_passphrase());
        assert!(SecurityType::Wpa3Sae.uses_passphrase());
        assert!(!SecurityType::Wpa3Sae.requires_wpa2_passphrase_length());
        assert!(SecurityType::Wpa3SaeTransition.requires_wpa2_passphrase_length());
    }

    #[test]
    fn randomization_codes() {
        assert_eq!(MacRandomization::NonPersistent.code(), 2);
        assert_eq!(MacRandomization::from_repr(1), Some(MacRandomization::Persistent));
        assert_eq!(MacRandomization::from_repr(3), None);
    }

    #[test]
    fn display_is_snake_case() {
        assert_eq!(SecurityType::Wpa3SaeTransition.to_string(), "wpa3_sae_transition");
        assert_eq!(MacRandomization::NonPersistent.to_string(), "non_persistent");
    }
}
