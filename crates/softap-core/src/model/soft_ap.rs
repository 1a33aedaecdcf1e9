// ── Soft AP configuration ──
//
// The immutable snapshot that gets backed up and restored. Instances are
// only produced by `SoftApConfigurationBuilder::build`, which is also the
// path every decoder goes through, so a restored configuration is always
// one the builder would accept.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::band::Band;
use super::mac_address::MacAddress;
use super::security::{MacRandomization, SecurityType};
use crate::error::CoreError;

/// Longest SSID the radio accepts, in UTF-8 bytes.
pub const MAX_SSID_BYTES: usize = 32;
/// WPA2 PSK passphrase length bounds, in bytes.
pub const WPA2_PASSPHRASE_BYTES: std::ops::RangeInclusive<usize> = 8..=63;

/// Hotspot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SoftApConfigurationBuilder")]
pub struct SoftApConfiguration {
    ssid: Option<String>,
    bssid: Option<MacAddress>,
    band: Band,
    channel: u32,
    passphrase: Option<String>,
    security_type: SecurityType,
    hidden_ssid: bool,
    max_number_of_clients: u32,
    shutdown_timeout_millis: u64,
    client_control_by_user_enabled: bool,
    blocked_client_list: Vec<MacAddress>,
    allowed_client_list: Vec<MacAddress>,
    auto_shutdown_enabled: bool,
    bridged_mode_opportunistic_shutdown_enabled: bool,
    mac_randomization_setting: MacRandomization,
    channels: BTreeMap<Band, u32>,
    ieee80211ax_enabled: bool,
}

impl SoftApConfiguration {
    pub fn builder() -> SoftApConfigurationBuilder {
        SoftApConfigurationBuilder::default()
    }

    /// Start a builder pre-populated with every field of `self`.
    pub fn to_builder(&self) -> SoftApConfigurationBuilder {
        SoftApConfigurationBuilder {
            ssid: self.ssid.clone(),
            bssid: self.bssid,
            band: self.band,
            channel: self.channel,
            passphrase: self.passphrase.clone(),
            security_type: self.security_type,
            hidden_ssid: self.hidden_ssid,
            max_number_of_clients: self.max_number_of_clients,
            shutdown_timeout_millis: self.shutdown_timeout_millis,
            client_control_by_user_enabled: self.client_control_by_user_enabled,
            blocked_client_list: self.blocked_client_list.clone(),
            allowed_client_list: self.allowed_client_list.clone(),
            auto_shutdown_enabled: self.auto_shutdown_enabled,
            bridged_mode_opportunistic_shutdown_enabled: self
                .bridged_mode_opportunistic_shutdown_enabled,
            mac_randomization_setting: self.mac_randomization_setting,
            channels: self.channels.clone(),
            ieee80211ax_enabled: self.ieee80211ax_enabled,
        }
    }

    pub fn ssid(&self) -> Option<&str> {
        self.ssid.as_deref()
    }

    pub fn bssid(&self) -> Option<MacAddress> {
        self.bssid
    }

    pub fn band(&self) -> Band {
        self.band
    }

    pub fn channel(&self) -> u32 {
        self.channel
    }

    pub fn passphrase(&self) -> Option<&str> {
        self.passphrase.as_deref()
    }

    pub fn security_type(&self) -> SecurityType {
        self.security_type
    }

    pub fn is_hidden_ssid(&self) -> bool {
        self.hidden_ssid
    }

    pub fn max_number_of_clients(&self) -> u32 {
        self.max_number_of_clients
    }

    pub fn shutdown_timeout_millis(&self) -> u64 {
        self.shutdown_timeout_millis
    }

    pub fn is_client_control_by_user_enabled(&self) -> bool {
        self.client_control_by_user_enabled
    }

    pub fn blocked_client_list(&self) -> &[MacAddress] {
        &self.blocked_client_list
    }

    pub fn allowed_client_list(&self) -> &[MacAddress] {
        &self.allowed_client_list
    }

    pub fn is_auto_shutdown_enabled(&self) -> bool {
        self.auto_shutdown_enabled
    }

    pub fn is_bridged_mode_opportunistic_shutdown_enabled(&self) -> bool {
        self.bridged_mode_opportunistic_shutdown_enabled
    }

    pub fn mac_randomization_setting(&self) -> MacRandomization {
        self.mac_randomization_setting
    }

    /// Per-band channel assignments for bridged (multi-radio) operation.
    pub fn channels(&self) -> &BTreeMap<Band, u32> {
        &self.channels
    }

    pub fn is_ieee80211ax_enabled(&self) -> bool {
        self.ieee80211ax_enabled
    }
}

// ── Builder ─────────────────────────────────────────────────────────

/// Builder for [`SoftApConfiguration`].
///
/// `Default` yields the structural defaults that restore also uses for any
/// field a backup predates.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SoftApConfigurationBuilder {
    ssid: Option<String>,
    bssid: Option<MacAddress>,
    band: Band,
    channel: u32,
    passphrase: Option<String>,
    security_type: SecurityType,
    hidden_ssid: bool,
    max_number_of_clients: u32,
    shutdown_timeout_millis: u64,
    client_control_by_user_enabled: bool,
    blocked_client_list: Vec<MacAddress>,
    allowed_client_list: Vec<MacAddress>,
    auto_shutdown_enabled: bool,
    bridged_mode_opportunistic_shutdown_enabled: bool,
    mac_randomization_setting: MacRandomization,
    channels: BTreeMap<Band, u32>,
    ieee80211ax_enabled: bool,
}

impl Default for SoftApConfigurationBuilder {
    fn default() -> Self {
        Self {
            ssid: None,
            bssid: None,
            band: Band::GHZ_2,
            channel: 0,
            passphrase: None,
            security_type: SecurityType::Open,
            hidden_ssid: false,
            max_number_of_clients: 0,
            shutdown_timeout_millis: 0,
            client_control_by_user_enabled: false,
            blocked_client_list: Vec::new(),
            allowed_client_list: Vec::new(),
            auto_shutdown_enabled: true,
            bridged_mode_opportunistic_shutdown_enabled: true,
            mac_randomization_setting: MacRandomization::None,
            channels: BTreeMap::new(),
            ieee80211ax_enabled: true,
        }
    }
}

impl SoftApConfigurationBuilder {
    pub fn ssid(mut self, ssid: Option<impl Into<String>>) -> Self {
        self.ssid = ssid.map(Into::into);
        self
    }

    pub fn bssid(mut self, bssid: Option<MacAddress>) -> Self {
        self.bssid = bssid;
        self
    }

    pub fn band(mut self, band: Band) -> Self {
        self.band = band;
        self
    }

    /// Pin a channel on `band`. Channel 0 lets the radio pick.
    pub fn channel(mut self, channel: u32, band: Band) -> Self {
        self.channel = channel;
        self.band = band;
        self
    }

    /// Set the passphrase together with the security type it keys.
    pub fn passphrase(
        mut self,
        passphrase: Option<impl Into<String>>,
        security_type: SecurityType,
    ) -> Self {
        self.passphrase = passphrase.map(Into::into);
        self.security_type = security_type;
        self
    }

    pub fn hidden_ssid(mut self, hidden: bool) -> Self {
        self.hidden_ssid = hidden;
        self
    }

    pub fn max_number_of_clients(mut self, max: u32) -> Self {
        self.max_number_of_clients = max;
        self
    }

    pub fn shutdown_timeout_millis(mut self, millis: u64) -> Self {
        self.shutdown_timeout_millis = millis;
        self
    }

    pub fn client_control_by_user_enabled(mut self, enabled: bool) -> Self {
        self.client_control_by_user_enabled = enabled;
        self
    }

    pub fn blocked_client_list(mut self, clients: Vec<MacAddress>) -> Self {
        self.blocked_client_list = clients;
        self
    }

    pub fn allowed_client_list(mut self, clients: Vec<MacAddress>) -> Self {
        self.allowed_client_list = clients;
        self
    }

    pub fn auto_shutdown_enabled(mut self, enabled: bool) -> Self {
        self.auto_shutdown_enabled = enabled;
        self
    }

    pub fn bridged_mode_opportunistic_shutdown_enabled(mut self, enabled: bool) -> Self {
        self.bridged_mode_opportunistic_shutdown_enabled = enabled;
        self
    }

    pub fn mac_randomization_setting(mut self, setting: MacRandomization) -> Self {
        self.mac_randomization_setting = setting;
        self
    }

    pub fn channels(mut self, channels: BTreeMap<Band, u32>) -> Self {
        self.channels = channels;
        self
    }

    pub fn ieee80211ax_enabled(mut self, enabled: bool) -> Self {
        self.ieee80211ax_enabled = enabled;
        self
    }

    /// Band set so far; decoders need it to pin the channel that follows.
    pub(crate) fn pending_band(&self) -> Band {
        self.band
    }

    // Decoders see the passphrase and its security type as separate wire
    // fields; validation in `build` still checks them as a pair.
    pub(crate) fn passphrase_value(mut self, passphrase: Option<String>) -> Self {
        self.passphrase = passphrase;
        self
    }

    pub(crate) fn security_type_value(mut self, security_type: SecurityType) -> Self {
        self.security_type = security_type;
        self
    }

    pub fn build(self) -> Result<SoftApConfiguration, CoreError> {
        self.validate()?;
        Ok(SoftApConfiguration {
            ssid: self.ssid,
            bssid: self.bssid,
            band: self.band,
            channel: self.channel,
            passphrase: self.passphrase,
            security_type: self.security_type,
            hidden_ssid: self.hidden_ssid,
            max_number_of_clients: self.max_number_of_clients,
            shutdown_timeout_millis: self.shutdown_timeout_millis,
            client_control_by_user_enabled: self.client_control_by_user_enabled,
            blocked_client_list: self.blocked_client_list,
            allowed_client_list: self.allowed_client_list,
            auto_shutdown_enabled: self.auto_shutdown_enabled,
            bridged_mode_opportunistic_shutdown_enabled: self
                .bridged_mode_opportunistic_shutdown_enabled,
            mac_randomization_setting: self.mac_randomization_setting,
            channels: self.channels,
            ieee80211ax_enabled: self.ieee80211ax_enabled,
        })
    }

    fn validate(&self) -> Result<(), CoreError> {
        let invalid = |message: String| Err(CoreError::ValidationFailed { message });

        if let Some(ref ssid) = self.ssid {
            if ssid.len() > MAX_SSID_BYTES {
                return invalid(format!(
                    "SSID is {} bytes, at most {MAX_SSID_BYTES} allowed",
                    ssid.len()
                ));
            }
        }

        match (&self.passphrase, self.security_type.uses_passphrase()) {
            (Some(_), false) => {
                return invalid(format!(
                    "security type {} does not take a passphrase",
                    self.security_type
                ));
            }
            (None, true) => {
                return invalid(format!(
                    "security type {} requires a passphrase",
                    self.security_type
                ));
            }
            (Some(pass), true) => {
                if pass.is_empty() {
                    return invalid("passphrase must not be empty".into());
                }
                if self.security_type.requires_wpa2_passphrase_length()
                    && !WPA2_PASSPHRASE_BYTES.contains(&pass.len())
                {
                    return invalid(format!(
                        "passphrase for {} must be {}..={} bytes",
                        self.security_type,
                        WPA2_PASSPHRASE_BYTES.start(),
                        WPA2_PASSPHRASE_BYTES.end()
                    ));
                }
            }
            (None, false) => {}
        }

        if let Some(band) = self.channels.keys().find(|band| !band.is_single()) {
            return invalid(format!("channel map key {band} must be a single band"));
        }

        // Stored as signed 32-bit ints.
        let too_large = |value: u32| i32::try_from(value).is_err();
        if too_large(self.channel) || self.channels.values().copied().any(too_large) {
            return invalid(format!("channel must be at most {}", i32::MAX));
        }
        if too_large(self.max_number_of_clients) {
            return invalid(format!("max_number_of_clients must be at most {}", i32::MAX));
        }

        Ok(())
    }
}

impl TryFrom<SoftApConfigurationBuilder> for SoftApConfiguration {
    type Error = CoreError;

    fn try_from(builder: SoftApConfigurationBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn wpa2() -> SoftApConfigurationBuilder {
        SoftApConfiguration::builder()
            .ssid(Some("TestAP"))
            .passphrase(Some("TestPskPassphrase"), SecurityType::Wpa2Psk)
    }

    #[test]
    fn defaults_are_structural() {
        let config = SoftApConfiguration::builder().build().unwrap();
        assert_eq!(config.ssid(), None);
        assert_eq!(config.band(), Band::GHZ_2);
        assert_eq!(config.security_type(), SecurityType::Open);
        assert!(config.is_auto_shutdown_enabled());
        assert!(config.is_bridged_mode_opportunistic_shutdown_enabled());
        assert!(config.is_ieee80211ax_enabled());
        assert_eq!(config.mac_randomization_setting(), MacRandomization::None);
        assert!(config.channels().is_empty());
        assert!(config.blocked_client_list().is_empty());
    }

    #[test]
    fn channel_sets_band_too() {
        let config = SoftApConfiguration::builder()
            .channel(40, Band::GHZ_5)
            .build()
            .unwrap();
        assert_eq!(config.channel(), 40);
        assert_eq!(config.band(), Band::GHZ_5);
    }

    #[test]
    fn open_network_rejects_passphrase() {
        let err = SoftApConfiguration::builder()
            .passphrase(Some("whatever1"), SecurityType::Open)
            .build()
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationFailed { .. }));
    }

    #[test]
    fn owe_has_no_passphrase() {
        let config = SoftApConfiguration::builder()
            .band(Band::GHZ_6)
            .passphrase(None::<String>, SecurityType::Wpa3Owe)
            .build()
            .unwrap();
        assert_eq!(config.passphrase(), None);
    }

    #[test]
    fn wpa2_requires_passphrase_in_range() {
        assert!(wpa2().build().is_ok());
        assert!(
            SoftApConfiguration::builder()
                .passphrase(Some("short"), SecurityType::Wpa2Psk)
                .build()
                .is_err()
        );
        assert!(
            SoftApConfiguration::builder()
                .passphrase(None::<String>, SecurityType::Wpa3Sae)
                .build()
                .is_err()
        );
    }

    #[test]
    fn sae_allows_short_passphrase() {
        let config = SoftApConfiguration::builder()
            .passphrase(Some("abc"), SecurityType::Wpa3Sae)
            .build()
            .unwrap();
        assert_eq!(config.passphrase(), Some("abc"));
    }

    #[test]
    fn ssid_length_is_bounded() {
        let long = "x".repeat(MAX_SSID_BYTES + 1);
        assert!(SoftApConfiguration::builder().ssid(Some(long)).build().is_err());
    }

    #[test]
    fn channel_map_keys_must_be_single_bands() {
        let channels = BTreeMap::from([(Band::GHZ_2.union(Band::GHZ_5), 6)]);
        assert!(SoftApConfiguration::builder().channels(channels).build().is_err());
    }

    #[test]
    fn channel_and_client_limit_fit_a_signed_int() {
        let limit = u32::try_from(i32::MAX).unwrap();
        assert!(SoftApConfiguration::builder().channel(limit, Band::GHZ_5).build().is_ok());
        assert!(SoftApConfiguration::builder().channel(limit + 1, Band::GHZ_5).build().is_err());
        assert!(SoftApConfiguration::builder().max_number_of_clients(limit + 1).build().is_err());
        let channels = BTreeMap::from([(Band::GHZ_5, limit + 1)]);
        assert!(SoftApConfiguration::builder().channels(channels).build().is_err());
    }

    #[test]
    fn to_builder_preserves_everything() {
        let config = wpa2()
            .max_number_of_clients(10)
            .channels(BTreeMap::from([(Band::GHZ_2, 1), (Band::GHZ_5, 149)]))
            .build()
            .unwrap();
        assert_eq!(config.to_builder().build().unwrap(), config);
    }

    #[test]
    fn deserialize_goes_through_validation() {
        let ok: SoftApConfiguration = serde_json::from_str(
            r#"{"ssid":"TestAP","passphrase":"TestPskPassphrase","security_type":"wpa2_psk"}"#,
        )
        .unwrap();
        assert_eq!(ok.security_type(), SecurityType::Wpa2Psk);

        let bad = serde_json::from_str::<SoftApConfiguration>(
            r#"{"ssid":"TestAP","security_type":"wpa2_psk"}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn serialize_then_deserialize_keeps_channel_map() {
        let config = wpa2()
            .channels(BTreeMap::from([(Band::GHZ_2, 1), (Band::GHZ_5, 149)]))
            .blocked_client_list(vec!["11:22:33:44:55:66".parse().unwrap()])
            .build()
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let back: SoftApConfiguration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
