//! Shared helpers for command handlers.

use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::CliError;

/// Read a whole input file; `-` means stdin.
pub fn read_input(path: &Path) -> Result<Vec<u8>, CliError> {
    if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin().lock().read_to_end(&mut buf)?;
        return Ok(buf);
    }
    Ok(std::fs::read(path)?)
}

/// Read payload bytes, decoding hex text when `hex` is set.
///
/// Whitespace in hex text is ignored so wrapped dumps can be pasted in.
pub fn read_payload(path: &Path, hex: bool) -> Result<Vec<u8>, CliError> {
    let raw = read_input(path)?;
    if !hex {
        return Ok(raw);
    }
    let text: Vec<u8> = raw
        .into_iter()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    hex::decode(text).map_err(|e| CliError::Malformed {
        reason: format!("invalid hex text: {e}"),
    })
}

/// Read and parse a JSON file.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = read_input(path)?;
    Ok(serde_json::from_slice(&contents)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn hex_payload_ignores_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.hex");
        std::fs::write(&path, "0000 0009\n00ff\n").unwrap();
        assert_eq!(
            read_payload(&path, true).unwrap(),
            [0x00, 0x00, 0x00, 0x09, 0x00, 0xff]
        );
    }

    #[test]
    fn bad_hex_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.hex");
        std::fs::write(&path, "zz").unwrap();
        assert!(matches!(
            read_payload(&path, true),
            Err(CliError::Malformed { .. })
        ));
    }

    #[test]
    fn raw_payload_is_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.bin");
        std::fs::write(&path, [0x20, 0x0a]).unwrap();
        assert_eq!(read_payload(&path, false).unwrap(), [0x20, 0x0a]);
    }
}
