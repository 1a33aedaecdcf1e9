//! Output formatting: JSON, YAML, and raw payload bytes.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a serde-serializable item in the chosen format.
pub fn render_single<T: Serialize + ?Sized>(
    format: OutputFormat,
    data: &T,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::JsonCompact => Ok(serde_json::to_string(data)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(data)?.trim_end().to_owned()),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Write an encoded payload to `path`, or to stdout when `path` is `None`.
///
/// Hex output gets a trailing newline; raw bytes are written untouched.
pub fn write_payload(path: Option<&Path>, bytes: &[u8], hex: bool) -> Result<(), CliError> {
    let body = if hex {
        let mut text = hex::encode(bytes).into_bytes();
        text.push(b'\n');
        text
    } else {
        bytes.to_vec()
    };
    match path {
        Some(path) => std::fs::write(path, body)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&body)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
