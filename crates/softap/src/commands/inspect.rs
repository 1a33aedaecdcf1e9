//! `softap inspect`: report a payload's version and field layout without
//! restoring it.

use serde::Serialize;

use softap_core::{FormatVersion, LegacyApConfig};

use crate::cli::{GlobalOpts, InspectArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Debug, Serialize)]
struct PayloadSummary {
    version: FormatVersion,
    current: bool,
    legacy_record: bool,
    bytes: usize,
    fields: Vec<&'static str>,
}

impl PayloadSummary {
    fn new(version: FormatVersion, bytes: usize) -> Self {
        let fields = if version.is_legacy() {
            LegacyApConfig::FIELDS.to_vec()
        } else {
            version.fields()
        };
        Self {
            version,
            current: version == FormatVersion::CURRENT,
            legacy_record: version.is_legacy(),
            bytes,
            fields,
        }
    }
}

pub fn handle(args: &InspectArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_or_default(global);
    let bytes = util::read_payload(&args.input, args.hex || cfg.defaults.hex)?;
    let version = softap_core::peek_version(&bytes)?;

    let summary = PayloadSummary::new(version, bytes.len());
    let out = output::render_single(config::output_format(global, &cfg), &summary)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_summary_lists_record_fields() {
        let summary = PayloadSummary::new(FormatVersion::Legacy3, 30);
        assert!(summary.legacy_record);
        assert_eq!(summary.fields.first(), Some(&"ssid"));
        assert_eq!(summary.fields.len(), 6);
    }

    #[test]
    fn current_summary_lists_every_field() {
        let summary = PayloadSummary::new(FormatVersion::CURRENT, 93);
        assert!(summary.current);
        assert!(summary.fields.contains(&"bssid"));
    }
}
