// ── Soft AP domain model ──
//
// The configuration snapshot and the small value types it is built from.
// Numeric codes on these types are part of the backup wire format.

pub mod band;
pub mod mac_address;
pub mod security;
pub mod soft_ap;

// ── Re-exports ──────────────────────────────────────────────────────

pub use band::Band;
pub use mac_address::{MAC_ADDRESS_LEN, MacAddress, MacParseError};
pub use security::{MacRandomization, SecurityType};
pub use soft_ap::{
    MAX_SSID_BYTES, SoftApConfiguration, SoftApConfigurationBuilder, WPA2_PASSPHRASE_BYTES,
};
