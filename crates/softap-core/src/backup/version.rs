// ── Backup format versions ──

use std::fmt;

use serde::Serialize;

use super::fields;
use crate::error::CoreError;

/// A tagged backup format version.
///
/// Version 3 is the last layout written from the legacy access-point record
/// (its body is the untagged legacy record). Versions 5 through 9 are the
/// soft AP layouts. Nothing else has a known layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "i32")]
pub enum FormatVersion {
    Legacy3,
    V5,
    V6,
    V7,
    V8,
    V9,
}

impl FormatVersion {
    /// The version every new backup is written in.
    pub const CURRENT: Self = Self::V9;

    /// Every version a restore accepts, oldest first.
    pub const ALL: [Self; 6] = [
        Self::Legacy3,
        Self::V5,
        Self::V6,
        Self::V7,
        Self::V8,
        Self::V9,
    ];

    pub fn from_tag(tag: i32) -> Result<Self, CoreError> {
        match tag {
            3 => Ok(Self::Legacy3),
            5 => Ok(Self::V5),
            6 => Ok(Self::V6),
            7 => Ok(Self::V7),
            8 => Ok(Self::V8),
            9 => Ok(Self::V9),
            version => Err(CoreError::UnsupportedVersion { version }),
        }
    }

    pub const fn tag(self) -> i32 {
        match self {
            Self::Legacy3 => 3,
            Self::V5 => 5,
            Self::V6 => 6,
            Self::V7 => 7,
            Self::V8 => 8,
            Self::V9 => 9,
        }
    }

    /// Whether the body is a legacy record rather than a soft AP layout.
    pub const fn is_legacy(self) -> bool {
        matches!(self, Self::Legacy3)
    }

    /// Names of the soft AP fields this version carries, in wire order.
    ///
    /// Empty for the legacy version, whose record is described by
    /// `LegacyApConfig` instead.
    pub fn fields(self) -> Vec<&'static str> {
        if self.is_legacy() {
            return Vec::new();
        }
        fields::FIELDS
            .iter()
            .filter(|field| field.carried_by(self))
            .map(|field| field.name)
            .collect()
    }
}

impl From<FormatVersion> for i32 {
    fn from(version: FormatVersion) -> Self {
        version.tag()
    }
}

impl TryFrom<i32> for FormatVersion {
    type Error = CoreError;

    fn try_from(tag: i32) -> Result<Self, Self::Error> {
        Self::from_tag(tag)
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.tag())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_round_trip() {
        for version in FormatVersion::ALL {
            assert_eq!(FormatVersion::from_tag(version.tag()).unwrap(), version);
        }
    }

    #[test]
    fn version_four_and_out_of_range_tags_are_rejected() {
        for tag in [i32::MIN, -1, 0, 1, 2, 4, 10, i32::MAX] {
            assert_eq!(
                FormatVersion::from_tag(tag),
                Err(CoreError::UnsupportedVersion { version: tag })
            );
        }
    }

    #[test]
    fn ordering_follows_history() {
        assert!(FormatVersion::Legacy3 < FormatVersion::V5);
        assert!(FormatVersion::V8 < FormatVersion::CURRENT);
    }

    #[test]
    fn display_uses_tag() {
        assert_eq!(FormatVersion::V7.to_string(), "v7");
    }
}
