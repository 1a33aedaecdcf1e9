//! Command dispatch: bridges CLI args -> codec calls -> output formatting.

pub mod config_cmd;
pub mod decode;
pub mod encode;
pub mod inspect;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a payload command to the appropriate handler.
pub fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Encode(args) => encode::handle(&args, global),
        Command::Decode(args) => decode::handle(&args, global),
        Command::Inspect(args) => inspect::handle(&args, global),
        Command::Config(args) => config_cmd::handle(args, global),
        // Completions need the full command tree and are handled in main
        Command::Completions(_) => Ok(()),
    }
}
