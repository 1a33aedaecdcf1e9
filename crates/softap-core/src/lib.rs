// softap-core: Soft AP configuration model and its versioned backup codec.

pub mod backup;
pub mod defaults;
pub mod error;
pub mod model;

// ── Primary re-exports ──────────────────────────────────────────────
pub use backup::{
    FormatVersion, LegacyApConfig, decode, decode_legacy, encode, encode_as, peek_version,
};
pub use defaults::{DefaultsProvider, FixedDefaults};
pub use error::CoreError;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Band, MacAddress, MacParseError, MacRandomization, SecurityType, SoftApConfiguration,
    SoftApConfigurationBuilder,
};
