// ── Radio band bitmask ──

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One or more radio bands, as a bitmask.
///
/// The numeric values are the ones persisted in backups, so they must never
/// be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Band(u32);

impl Band {
    pub const GHZ_2: Self = Self(1);
    pub const GHZ_5: Self = Self(1 << 1);
    pub const GHZ_6: Self = Self(1 << 2);
    pub const GHZ_60: Self = Self(1 << 3);

    const ALL_BITS: u32 = 0b1111;

    /// Validate a raw bitmask: non-empty and no unknown bits.
    pub const fn from_bits(bits: u32) -> Option<Self> {
        if bits != 0 && bits & !Self::ALL_BITS == 0 {
            Some(Self(bits))
        } else {
            None
        }
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when exactly one band bit is set.
    pub const fn is_single(self) -> bool {
        self.0.is_power_of_two()
    }
}

impl Default for Band {
    fn default() -> Self {
        Self::GHZ_2
    }
}

impl TryFrom<u32> for Band {
    type Error = CoreError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Self::from_bits(bits).ok_or_else(|| CoreError::ValidationFailed {
            message: format!("invalid band bitmask {bits:#x}"),
        })
    }
}

impl From<Band> for u32 {
    fn from(band: Band) -> Self {
        band.0
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::GHZ_2, "2.4GHz"),
            (Self::GHZ_5, "5GHz"),
            (Self::GHZ_6, "6GHz"),
            (Self::GHZ_60, "60GHz"),
        ];
        let parts: Vec<&str> = names
            .iter()
            .filter(|(band, _)| self.contains(*band))
            .map(|(_, name)| *name)
            .collect();
        f.write_str(&parts.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_unknown_bits() {
        assert_eq!(Band::from_bits(0), None);
        assert_eq!(Band::from_bits(0x10), None);
        assert_eq!(Band::from_bits(3), Some(Band::GHZ_2.union(Band::GHZ_5)));
    }

    #[test]
    fn single_band_detection() {
        assert!(Band::GHZ_6.is_single());
        assert!(!Band::GHZ_2.union(Band::GHZ_5).is_single());
    }

    #[test]
    fn display_lists_every_band() {
        assert_eq!(Band::GHZ_5.to_string(), "5GHz");
        assert_eq!(Band::GHZ_2.union(Band::GHZ_6).to_string(), "2.4GHz|6GHz");
    }
}
