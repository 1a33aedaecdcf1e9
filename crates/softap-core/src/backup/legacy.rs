// ── Legacy access-point record ──
//
// Before the soft AP model existed, hotspot settings were backed up as a
// six-field record: SSID, band code, channel, pre-shared key, auth type and
// hidden flag. The record appears either bare (no version tag) or behind
// tag 3, the last version written from that model. Restoring it translates
// the old band and key-management codes into the current model and fills
// every newer field exactly like a versioned restore does.

use bytes::Bytes;
use tracing::debug;

use super::fields;
use super::version::FormatVersion;
use super::wire::{BackupReader, BackupWriter};
use crate::defaults::DefaultsProvider;
use crate::error::CoreError;
use crate::model::{Band, SecurityType, SoftApConfiguration};

/// Legacy band codes.
pub mod band_code {
    pub const ANY: i32 = -1;
    pub const GHZ_2: i32 = 0;
    pub const GHZ_5: i32 = 1;
}

/// Legacy key-management indices (the record's auth type).
pub mod key_mgmt {
    pub const NONE: i32 = 0;
    pub const WPA_PSK: i32 = 1;
    pub const WPA_EAP: i32 = 2;
    pub const IEEE8021X: i32 = 3;
    pub const WPA2_PSK: i32 = 4;
}

/// The pre-versioned six-field record, exactly as it sits on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyApConfig {
    pub ssid: Option<String>,
    pub band: i32,
    pub channel: i32,
    pub pre_shared_key: Option<String>,
    pub auth_type: i32,
    pub hidden_ssid: bool,
}

impl LegacyApConfig {
    /// Record fields in wire order.
    pub const FIELDS: [&'static str; 6] = [
        "ssid",
        "band",
        "channel",
        "pre_shared_key",
        "auth_type",
        "hidden_ssid",
    ];

    pub fn read(reader: &mut BackupReader<'_>) -> Result<Self, CoreError> {
        Ok(Self {
            ssid: reader.get_string("legacy ssid")?,
            band: reader.get_i32("legacy band")?,
            channel: reader.get_i32("legacy channel")?,
            pre_shared_key: reader.get_string("legacy pre-shared key")?,
            auth_type: reader.get_i32("legacy auth type")?,
            hidden_ssid: reader.get_bool("legacy hidden ssid")?,
        })
    }

    pub fn write(&self, writer: &mut BackupWriter) {
        writer.put_string(self.ssid.as_deref());
        writer.put_i32(self.band);
        writer.put_i32(self.channel);
        writer.put_string(self.pre_shared_key.as_deref());
        writer.put_i32(self.auth_type);
        writer.put_bool(self.hidden_ssid);
    }

    /// The bare record, as `decode_legacy` expects it.
    pub fn to_bytes(&self) -> Bytes {
        let mut writer = BackupWriter::new();
        self.write(&mut writer);
        writer.finish()
    }

    /// The record behind a version 3 tag, as `decode` expects it.
    pub fn to_tagged_bytes(&self) -> Bytes {
        let mut writer = BackupWriter::new();
        writer.put_i32(FormatVersion::Legacy3.tag());
        self.write(&mut writer);
        writer.finish()
    }

    /// Translate into the current model, default-filling newer fields.
    pub fn into_configuration(
        self,
        provider: &dyn DefaultsProvider,
    ) -> Result<SoftApConfiguration, CoreError> {
        let band = convert_band(self.band);
        let channel = u32::try_from(self.channel)
            .map_err(|_| CoreError::malformed(format!("negative legacy channel {}", self.channel)))?;

        let mut builder = SoftApConfiguration::builder()
            .ssid(self.ssid)
            .channel(channel, band)
            .hidden_ssid(self.hidden_ssid);

        // Only WPA2-PSK carries its key across; every other auth type
        // restores as an open network.
        builder = match convert_security(self.auth_type) {
            SecurityType::Wpa2Psk => builder.passphrase(self.pre_shared_key, SecurityType::Wpa2Psk),
            other => builder.passphrase(None::<String>, other),
        };

        debug!(auth_type = self.auth_type, band = self.band, "translated legacy record");
        fields::fill_absent(FormatVersion::Legacy3, provider, builder)?
            .build()
            .map_err(|e| CoreError::malformed(format!("legacy record rejected: {e}")))
    }
}

/// Map a legacy band code onto the band bitmask.
pub fn convert_band(code: i32) -> Band {
    match code {
        band_code::GHZ_5 => Band::GHZ_5,
        band_code::ANY => Band::GHZ_2.union(Band::GHZ_5),
        _ => Band::GHZ_2,
    }
}

/// Map a legacy auth type onto a security type.
pub fn convert_security(auth_type: i32) -> SecurityType {
    if auth_type == key_mgmt::WPA2_PSK {
        SecurityType::Wpa2Psk
    } else {
        SecurityType::Open
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::defaults::FixedDefaults;

    fn record() -> LegacyApConfig {
        LegacyApConfig {
            ssid: Some("TestAP".into()),
            band: band_code::GHZ_2,
            channel: 12,
            pre_shared_key: Some("test_pwd".into()),
            auth_type: key_mgmt::WPA2_PSK,
            hidden_ssid: true,
        }
    }

    #[test]
    fn band_table() {
        assert_eq!(convert_band(band_code::GHZ_2), Band::GHZ_2);
        assert_eq!(convert_band(band_code::GHZ_5), Band::GHZ_5);
        assert_eq!(convert_band(band_code::ANY), Band::GHZ_2.union(Band::GHZ_5));
        assert_eq!(convert_band(7), Band::GHZ_2);
    }

    #[test]
    fn only_wpa2_psk_survives() {
        assert_eq!(convert_security(key_mgmt::WPA2_PSK), SecurityType::Wpa2Psk);
        for auth in [
            key_mgmt::NONE,
            key_mgmt::WPA_PSK,
            key_mgmt::WPA_EAP,
            key_mgmt::IEEE8021X,
            8,
            -1,
        ] {
            assert_eq!(convert_security(auth), SecurityType::Open, "auth {auth}");
        }
    }

    #[test]
    fn read_back_what_was_written() {
        let bytes = record().to_bytes();
        let mut reader = BackupReader::new(&bytes);
        assert_eq!(LegacyApConfig::read(&mut reader).unwrap(), record());
        reader.expect_end().unwrap();
    }

    #[test]
    fn tagged_bytes_lead_with_version_three() {
        let bytes = record().to_tagged_bytes();
        assert_eq!(bytes.get(..4), Some(&[0, 0, 0, 3][..]));
        assert_eq!(bytes.get(4..), Some(record().to_bytes().as_ref()));
    }

    #[test]
    fn wpa2_record_keeps_passphrase() {
        let config = record().into_configuration(&FixedDefaults::new(false)).unwrap();
        assert_eq!(config.ssid(), Some("TestAP"));
        assert_eq!(config.band(), Band::GHZ_2);
        assert_eq!(config.channel(), 12);
        assert_eq!(config.passphrase(), Some("test_pwd"));
        assert_eq!(config.security_type(), SecurityType::Wpa2Psk);
        assert!(config.is_hidden_ssid());
        assert!(!config.is_auto_shutdown_enabled());
    }

    #[test]
    fn non_wpa2_record_drops_the_key() {
        let legacy = LegacyApConfig {
            auth_type: key_mgmt::WPA_PSK,
            ..record()
        };
        let config = legacy.into_configuration(&FixedDefaults::default()).unwrap();
        assert_eq!(config.security_type(), SecurityType::Open);
        assert_eq!(config.passphrase(), None);
    }

    #[test]
    fn negative_channel_is_malformed() {
        let legacy = LegacyApConfig {
            channel: -3,
            ..record()
        };
        let err = legacy.into_configuration(&FixedDefaults::default()).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn wpa2_record_without_key_is_malformed() {
        let legacy = LegacyApConfig {
            pre_shared_key: None,
            ..record()
        };
        let err = legacy.into_configuration(&FixedDefaults::default()).unwrap_err();
        assert!(matches!(err, CoreError::MalformedPayload { .. }));
    }
}
