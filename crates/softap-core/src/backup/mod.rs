//! Versioned backup/restore codec for soft AP configurations.
//!
//! Backups are always written in [`FormatVersion::CURRENT`]. Restores accept
//! every historical version: tagged payloads go through [`decode`], bare
//! legacy records through [`decode_legacy`]. Nothing in the bytes tells the
//! two apart reliably, so the caller picks the entry point from what it
//! knows about the payload's origin.
//!
//! Fields a payload predates are filled from structural defaults, except
//! auto shutdown, which older formats never stored and which is taken from
//! the device's live settings through the [`DefaultsProvider`] passed in.

pub mod legacy;
pub mod version;
pub mod wire;

mod fields;

use bytes::Bytes;
use tracing::{debug, warn};

use crate::defaults::DefaultsProvider;
use crate::error::CoreError;
use crate::model::SoftApConfiguration;

pub use legacy::LegacyApConfig;
pub use version::FormatVersion;
use wire::{BackupReader, BackupWriter};

/// Serialize `config` in the current format version.
pub fn encode(config: &SoftApConfiguration) -> Bytes {
    write_layout(config, FormatVersion::CURRENT)
}

/// Serialize `config` in a specific soft AP layout (v5 through v9).
///
/// Fields the layout predates are not written. In v5 and v6 only the low 32
/// bits of the shutdown timeout are kept. The legacy layout is produced by
/// [`LegacyApConfig`], not from a soft AP configuration.
pub fn encode_as(config: &SoftApConfiguration, version: FormatVersion) -> Result<Bytes, CoreError> {
    if version.is_legacy() {
        return Err(CoreError::UnsupportedVersion {
            version: version.tag(),
        });
    }
    Ok(write_layout(config, version))
}

fn write_layout(config: &SoftApConfiguration, version: FormatVersion) -> Bytes {
    let mut writer = BackupWriter::new();
    writer.put_i32(version.tag());
    fields::write_all(&mut writer, config, version);
    debug!(%version, len = writer.len(), "encoded soft AP backup");
    writer.finish()
}

/// Read the version tag without decoding the rest.
pub fn peek_version(bytes: &[u8]) -> Result<FormatVersion, CoreError> {
    let mut reader = BackupReader::new(bytes);
    FormatVersion::from_tag(reader.get_i32("version")?)
}

/// Restore a configuration from a version-tagged payload.
pub fn decode(
    bytes: &[u8],
    provider: &dyn DefaultsProvider,
) -> Result<SoftApConfiguration, CoreError> {
    let result = decode_tagged(bytes, provider);
    if let Err(ref err) = result {
        warn!(len = bytes.len(), error = %err, "rejected soft AP backup");
    }
    result
}

fn decode_tagged(
    bytes: &[u8],
    provider: &dyn DefaultsProvider,
) -> Result<SoftApConfiguration, CoreError> {
    let mut reader = BackupReader::new(bytes);
    let version = FormatVersion::from_tag(reader.get_i32("version")?)?;
    debug!(%version, len = bytes.len(), "decoding soft AP backup");

    if version.is_legacy() {
        let record = LegacyApConfig::read(&mut reader)?;
        reader.expect_end()?;
        return record.into_configuration(provider);
    }

    let builder = fields::read_all(&mut reader, version)?;
    reader.expect_end()?;
    fields::fill_absent(version, provider, builder)?
        .build()
        .map_err(|e| CoreError::malformed(format!("decoded configuration rejected: {e}")))
}

/// Restore a configuration from a bare legacy record (no version tag).
pub fn decode_legacy(
    bytes: &[u8],
    provider: &dyn DefaultsProvider,
) -> Result<SoftApConfiguration, CoreError> {
    debug!(len = bytes.len(), "decoding legacy access point record");
    let mut reader = BackupReader::new(bytes);
    let result = LegacyApConfig::read(&mut reader)
        .and_then(|record| reader.expect_end().map(|()| record))
        .and_then(|record| record.into_configuration(provider));
    if let Err(ref err) = result {
        warn!(len = bytes.len(), error = %err, "rejected legacy access point record");
    }
    result
}
