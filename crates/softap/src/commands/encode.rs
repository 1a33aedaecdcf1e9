//! `softap encode`: JSON configuration -> backup payload.

use tracing::debug;

use softap_core::{FormatVersion, SoftApConfigurationBuilder};

use crate::cli::{EncodeArgs, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util;

pub fn handle(args: &EncodeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_or_default(global);
    // Parse into the builder first so rule violations surface as validation
    // errors rather than JSON errors.
    let builder: SoftApConfigurationBuilder = util::read_json_file(&args.input)?;
    let ap = builder.build()?;

    let version = match args.format_version {
        Some(tag) => FormatVersion::try_from(tag)?,
        None => FormatVersion::CURRENT,
    };
    let bytes = softap_core::encode_as(&ap, version)?;
    debug!(%version, len = bytes.len(), "encoded configuration");

    output::write_payload(args.out.as_deref(), &bytes, args.hex || cfg.defaults.hex)?;
    if let (Some(path), false) = (&args.out, global.quiet) {
        eprintln!(
            "✓ Wrote {} byte {version} backup to {}",
            bytes.len(),
            path.display()
        );
    }
    Ok(())
}
