// ── Hardware address ──
//
// Client allow/block lists and the BSSID are stored as raw 6-byte
// addresses. Text input is accepted in the usual notations and always
// rendered back as lowercase colon-separated hex.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of a hardware address on the wire.
pub const MAC_ADDRESS_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid MAC address '{input}'")]
pub struct MacParseError {
    pub input: String,
}

/// 48-bit IEEE 802 MAC address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddress([u8; MAC_ADDRESS_LEN]);

impl MacAddress {
    pub const fn new(octets: [u8; MAC_ADDRESS_LEN]) -> Self {
        Self(octets)
    }

    pub const fn octets(&self) -> [u8; MAC_ADDRESS_LEN] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; MAC_ADDRESS_LEN]> for MacAddress {
    fn from(octets: [u8; MAC_ADDRESS_LEN]) -> Self {
        Self(octets)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl FromStr for MacAddress {
    type Err = MacParseError;

    /// Accepts six colon- or dash-separated byte pairs, or twelve bare hex
    /// digits, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || MacParseError { input: s.to_owned() };

        let pairs: Vec<&str> = match s.chars().find(|c| *c == ':' || *c == '-') {
            Some(sep) => s.split(sep).collect(),
            None if s.len() == MAC_ADDRESS_LEN * 2 => {
                (0..MAC_ADDRESS_LEN).filter_map(|i| s.get(i * 2..i * 2 + 2)).collect()
            }
            None => return Err(err()),
        };
        if pairs.len() != MAC_ADDRESS_LEN {
            return Err(err());
        }

        let mut octets = [0u8; MAC_ADDRESS_LEN];
        for (slot, pair) in octets.iter_mut().zip(pairs) {
            // Exactly two hex digits; from_str_radix also takes a sign.
            if pair.len() != 2 || !pair.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(err());
            }
            *slot = u8::from_str_radix(pair, 16).map_err(|_| err())?;
        }
        Ok(Self(octets))
    }
}

impl TryFrom<String> for MacAddress {
    type Error = MacParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> Self {
        mac.to_string()
    }
}
