//! `softap decode`: backup payload -> configuration.

use tracing::debug;

use crate::cli::{DecodeArgs, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util;

pub fn handle(args: &DecodeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_or_default(global);
    let bytes = util::read_payload(&args.input, args.hex || cfg.defaults.hex)?;
    let provider = config::defaults_provider(global, args.auto_shutdown);

    let restored = if args.legacy {
        softap_core::decode_legacy(&bytes, provider.as_ref())?
    } else {
        softap_core::decode(&bytes, provider.as_ref())?
    };
    debug!(len = bytes.len(), legacy = args.legacy, "restored configuration");

    let out = output::render_single(config::output_format(global, &cfg), &restored)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
