// ── Field table ──
//
// One row per wire field, in wire order. A version carries a row when the
// version is at least the row's `since`. Encoding writes the carried rows;
// decoding reads them and applies each remaining row's absent rule. Adding a
// format version means appending rows here.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use super::version::FormatVersion;
use super::wire::{BackupReader, BackupWriter};
use crate::defaults::DefaultsProvider;
use crate::error::CoreError;
use crate::model::{
    Band, MacAddress, MacRandomization, SecurityType, SoftApConfiguration,
    SoftApConfigurationBuilder,
};

type Builder = SoftApConfigurationBuilder;
type WriteFn = fn(&mut BackupWriter, &SoftApConfiguration, FormatVersion);
type ReadFn = fn(&mut BackupReader<'_>, FormatVersion, Builder) -> Result<Builder, CoreError>;
type FillFn = fn(&dyn DefaultsProvider, Builder) -> Result<Builder, CoreError>;

/// What a decode does for a row the payload's version predates.
#[derive(Clone, Copy)]
pub(crate) enum Absent {
    /// Keep the builder's structural default.
    Structural,
    /// Ask the device defaults provider.
    Provider(FillFn),
}

#[derive(Clone, Copy)]
pub(crate) struct FieldCodec {
    pub name: &'static str,
    pub since: FormatVersion,
    pub write: WriteFn,
    pub read: ReadFn,
    pub absent: Absent,
}

impl FieldCodec {
    pub fn carried_by(&self, version: FormatVersion) -> bool {
        !version.is_legacy() && version >= self.since
    }
}

pub(crate) const FIELDS: &[FieldCodec] = &[
    row("ssid", FormatVersion::V5, write_ssid, read_ssid),
    row("bssid", FormatVersion::V9, write_bssid, read_bssid),
    row("band", FormatVersion::V5, write_band, read_band),
    row("channel", FormatVersion::V5, write_channel, read_channel),
    row("passphrase", FormatVersion::V5, write_passphrase, read_passphrase),
    row("security_type", FormatVersion::V5, write_security, read_security),
    row("hidden_ssid", FormatVersion::V5, write_hidden, read_hidden),
    row("max_number_of_clients", FormatVersion::V5, write_max_clients, read_max_clients),
    row("shutdown_timeout_millis", FormatVersion::V5, write_timeout, read_timeout),
    row(
        "client_control_by_user_enabled",
        FormatVersion::V5,
        write_client_control,
        read_client_control,
    ),
    row("blocked_client_list", FormatVersion::V5, write_blocked, read_blocked),
    row("allowed_client_list", FormatVersion::V5, write_allowed, read_allowed),
    FieldCodec {
        absent: Absent::Provider(fill_auto_shutdown),
        ..row("auto_shutdown_enabled", FormatVersion::V6, write_auto_shutdown, read_auto_shutdown)
    },
    row(
        "bridged_mode_opportunistic_shutdown_enabled",
        FormatVersion::V8,
        write_bridged_shutdown,
        read_bridged_shutdown,
    ),
    row(
        "mac_randomization_setting",
        FormatVersion::V8,
        write_mac_randomization,
        read_mac_randomization,
    ),
    row("channels", FormatVersion::V8, write_channels, read_channels),
    row("ieee80211ax_enabled", FormatVersion::V8, write_ax, read_ax),
];

const fn row(name: &'static str, since: FormatVersion, write: WriteFn, read: ReadFn) -> FieldCodec {
    FieldCodec {
        name,
        since,
        write,
        read,
        absent: Absent::Structural,
    }
}

// ── Table walks ─────────────────────────────────────────────────────

pub(crate) fn write_all(writer: &mut BackupWriter, config: &SoftApConfiguration, version: FormatVersion) {
    for field in FIELDS.iter().filter(|field| field.carried_by(version)) {
        trace!(field = field.name, %version, "writing field");
        (field.write)(writer, config, version);
    }
}

/// Read every row `version` carries. Rows it predates are left to
/// [`fill_absent`], which runs once the payload is known to be complete.
pub(crate) fn read_all(
    reader: &mut BackupReader<'_>,
    version: FormatVersion,
) -> Result<Builder, CoreError> {
    let mut builder = SoftApConfiguration::builder();
    for field in FIELDS.iter().filter(|field| field.carried_by(version)) {
        trace!(field = field.name, %version, "reading field");
        builder = (field.read)(reader, version, builder)?;
    }
    Ok(builder)
}

/// Apply the absent rule of every row `version` does not carry, leaving
/// carried rows untouched.
pub(crate) fn fill_absent(
    version: FormatVersion,
    provider: &dyn DefaultsProvider,
    mut builder: Builder,
) -> Result<Builder, CoreError> {
    for field in FIELDS.iter().filter(|field| !field.carried_by(version)) {
        builder = fill(field, provider, builder)?;
    }
    Ok(builder)
}

fn fill(
    field: &FieldCodec,
    provider: &dyn DefaultsProvider,
    builder: Builder,
) -> Result<Builder, CoreError> {
    match field.absent {
        Absent::Structural => Ok(builder),
        Absent::Provider(fill_fn) => {
            debug!(field = field.name, "field predates payload; asking device defaults");
            fill_fn(provider, builder)
        }
    }
}

// ── Row codecs ──────────────────────────────────────────────────────

fn write_ssid(w: &mut BackupWriter, c: &SoftApConfiguration, _: FormatVersion) {
    w.put_string(c.ssid());
}

fn read_ssid(r: &mut BackupReader<'_>, _: FormatVersion, b: Builder) -> Result<Builder, CoreError> {
    Ok(b.ssid(r.get_string("ssid")?))
}

fn write_bssid(w: &mut BackupWriter, c: &SoftApConfiguration, _: FormatVersion) {
    w.put_string(c.bssid().map(|mac| mac.to_string()).as_deref());
}

fn read_bssid(r: &mut BackupReader<'_>, _: FormatVersion, b: Builder) -> Result<Builder, CoreError> {
    let bssid = r
        .get_string("bssid")?
        .map(|raw| raw.parse::<MacAddress>())
        .transpose()
        .map_err(|e| CoreError::malformed(format!("bssid: {e}")))?;
    Ok(b.bssid(bssid))
}

fn write_band(w: &mut BackupWriter, c: &SoftApConfiguration, _: FormatVersion) {
    w.put_u32(c.band().bits());
}

fn read_band(r: &mut BackupReader<'_>, _: FormatVersion, b: Builder) -> Result<Builder, CoreError> {
    Ok(b.band(read_band_bits(r, "band")?))
}

fn read_band_bits(r: &mut BackupReader<'_>, field: &str) -> Result<Band, CoreError> {
    let bits = r.get_u32(field)?;
    Band::from_bits(bits)
        .ok_or_else(|| CoreError::malformed(format!("invalid band {bits:#x} at {field}")))
}

fn write_channel(w: &mut BackupWriter, c: &SoftApConfiguration, _: FormatVersion) {
    w.put_u32(c.channel());
}

fn read_channel(r: &mut BackupReader<'_>, _: FormatVersion, b: Builder) -> Result<Builder, CoreError> {
    let channel = r.get_non_negative("channel")?;
    let band = b.pending_band();
    Ok(b.channel(channel, band))
}

fn write_passphrase(w: &mut BackupWriter, c: &SoftApConfiguration, _: FormatVersion) {
    w.put_string(c.passphrase());
}

fn read_passphrase(
    r: &mut BackupReader<'_>,
    _: FormatVersion,
    b: Builder,
) -> Result<Builder, CoreError> {
    Ok(b.passphrase_value(r.get_string("passphrase")?))
}

fn write_security(w: &mut BackupWriter, c: &SoftApConfiguration, _: FormatVersion) {
    w.put_i32(c.security_type().code());
}

fn read_security(r: &mut BackupReader<'_>, _: FormatVersion, b: Builder) -> Result<Builder, CoreError> {
    let code = r.get_i32("security_type")?;
    let security = SecurityType::from_repr(code)
        .ok_or_else(|| CoreError::malformed(format!("unknown security type {code}")))?;
    Ok(b.security_type_value(security))
}

fn write_hidden(w: &mut BackupWriter, c: &SoftApConfiguration, _: FormatVersion) {
    w.put_bool(c.is_hidden_ssid());
}

fn read_hidden(r: &mut BackupReader<'_>, _: FormatVersion, b: Builder) -> Result<Builder, CoreError> {
    Ok(b.hidden_ssid(r.get_bool("hidden_ssid")?))
}

fn write_max_clients(w: &mut BackupWriter, c: &SoftApConfiguration, _: FormatVersion) {
    w.put_u32(c.max_number_of_clients());
}

fn read_max_clients(
    r: &mut BackupReader<'_>,
    _: FormatVersion,
    b: Builder,
) -> Result<Builder, CoreError> {
    Ok(b.max_number_of_clients(r.get_non_negative("max_number_of_clients")?))
}

/// v5 and v6 stored the timeout as a 32-bit int; only the low 32 bits
/// survive a write in those layouts.
#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
fn write_timeout(w: &mut BackupWriter, c: &SoftApConfiguration, version: FormatVersion) {
    let millis = c.shutdown_timeout_millis();
    if version >= FormatVersion::V7 {
        w.put_u64(millis);
    } else {
        w.put_u32(millis as u32);
    }
}

fn read_timeout(
    r: &mut BackupReader<'_>,
    version: FormatVersion,
    b: Builder,
) -> Result<Builder, CoreError> {
    let millis = if version >= FormatVersion::V7 {
        r.get_u64("shutdown_timeout_millis")?
    } else {
        u64::from(r.get_u32("shutdown_timeout_millis")?)
    };
    Ok(b.shutdown_timeout_millis(millis))
}

fn write_client_control(w: &mut BackupWriter, c: &SoftApConfiguration, _: FormatVersion) {
    w.put_bool(c.is_client_control_by_user_enabled());
}

fn read_client_control(
    r: &mut BackupReader<'_>,
    _: FormatVersion,
    b: Builder,
) -> Result<Builder, CoreError> {
    Ok(b.client_control_by_user_enabled(r.get_bool("client_control_by_user_enabled")?))
}

fn write_blocked(w: &mut BackupWriter, c: &SoftApConfiguration, _: FormatVersion) {
    w.put_mac_list(c.blocked_client_list());
}

fn read_blocked(r: &mut BackupReader<'_>, _: FormatVersion, b: Builder) -> Result<Builder, CoreError> {
    Ok(b.blocked_client_list(r.get_mac_list("blocked_client_list")?))
}

fn write_allowed(w: &mut BackupWriter, c: &SoftApConfiguration, _: FormatVersion) {
    w.put_mac_list(c.allowed_client_list());
}

fn read_allowed(r: &mut BackupReader<'_>, _: FormatVersion, b: Builder) -> Result<Builder, CoreError> {
    Ok(b.allowed_client_list(r.get_mac_list("allowed_client_list")?))
}

fn write_auto_shutdown(w: &mut BackupWriter, c: &SoftApConfiguration, _: FormatVersion) {
    w.put_bool(c.is_auto_shutdown_enabled());
}

fn read_auto_shutdown(
    r: &mut BackupReader<'_>,
    _: FormatVersion,
    b: Builder,
) -> Result<Builder, CoreError> {
    Ok(b.auto_shutdown_enabled(r.get_bool("auto_shutdown_enabled")?))
}

fn fill_auto_shutdown(provider: &dyn DefaultsProvider, b: Builder) -> Result<Builder, CoreError> {
    Ok(b.auto_shutdown_enabled(provider.is_auto_shutdown_enabled()?))
}

fn write_bridged_shutdown(w: &mut BackupWriter, c: &SoftApConfiguration, _: FormatVersion) {
    w.put_bool(c.is_bridged_mode_opportunistic_shutdown_enabled());
}

fn read_bridged_shutdown(
    r: &mut BackupReader<'_>,
    _: FormatVersion,
    b: Builder,
) -> Result<Builder, CoreError> {
    let enabled = r.get_bool("bridged_mode_opportunistic_shutdown_enabled")?;
    Ok(b.bridged_mode_opportunistic_shutdown_enabled(enabled))
}

fn write_mac_randomization(w: &mut BackupWriter, c: &SoftApConfiguration, _: FormatVersion) {
    w.put_i32(c.mac_randomization_setting().code());
}

fn read_mac_randomization(
    r: &mut BackupReader<'_>,
    _: FormatVersion,
    b: Builder,
) -> Result<Builder, CoreError> {
    let code = r.get_i32("mac_randomization_setting")?;
    let setting = MacRandomization::from_repr(code)
        .ok_or_else(|| CoreError::malformed(format!("unknown MAC randomization {code}")))?;
    Ok(b.mac_randomization_setting(setting))
}

fn write_channels(w: &mut BackupWriter, c: &SoftApConfiguration, _: FormatVersion) {
    let channels = c.channels();
    w.put_len(channels.len());
    for (band, channel) in channels {
        w.put_u32(band.bits());
        w.put_u32(*channel);
    }
}

fn read_channels(r: &mut BackupReader<'_>, _: FormatVersion, b: Builder) -> Result<Builder, CoreError> {
    // Each entry is a (band, channel) pair of 32-bit ints.
    let count = r.get_len("channels", 8)?;
    let mut channels = BTreeMap::new();
    for _ in 0..count {
        let band = read_band_bits(r, "channels")?;
        let channel = r.get_non_negative("channels")?;
        if channels.insert(band, channel).is_some() {
            return Err(CoreError::malformed(format!(
                "duplicate channel entry for band {band}"
            )));
        }
    }
    Ok(b.channels(channels))
}

fn write_ax(w: &mut BackupWriter, c: &SoftApConfiguration, _: FormatVersion) {
    w.put_bool(c.is_ieee80211ax_enabled());
}

fn read_ax(r: &mut BackupReader<'_>, _: FormatVersion, b: Builder) -> Result<Builder, CoreError> {
    Ok(b.ieee80211ax_enabled(r.get_bool("ieee80211ax_enabled")?))
}
