// ── Wire primitives ──
//
// Big-endian fixed-width integers, one-byte booleans, and i32
// length-prefixed UTF-8 strings where a length of -1 marks an absent
// string. Every read checks the remaining length first so a short buffer
// becomes a `MalformedPayload` instead of a panic.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::CoreError;
use crate::model::{MAC_ADDRESS_LEN, MacAddress};

/// String length that encodes "no string".
pub const NULL_STRING_LEN: i32 = -1;

const I32_LEN: usize = 4;

/// Append-only encoder over an in-memory buffer.
#[derive(Debug, Default)]
pub struct BackupWriter {
    buf: BytesMut,
}

impl BackupWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_i32(&mut self, value: i32) {
        self.buf.put_i32(value);
    }

    pub fn put_u32(&mut self, value: u32) {
        self.buf.put_u32(value);
    }

    pub fn put_u64(&mut self, value: u64) {
        self.buf.put_u64(value);
    }

    pub fn put_bool(&mut self, value: bool) {
        self.buf.put_u8(u8::from(value));
    }

    /// Length prefix for strings and sequences.
    ///
    /// Readers treat it as a signed 32-bit count; in-memory collections are
    /// far below that bound.
    #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
    pub fn put_len(&mut self, len: usize) {
        self.buf.put_i32(len as i32);
    }

    pub fn put_string(&mut self, value: Option<&str>) {
        match value {
            Some(s) => {
                self.put_len(s.len());
                self.buf.put_slice(s.as_bytes());
            }
            None => self.put_i32(NULL_STRING_LEN),
        }
    }

    pub fn put_mac_list(&mut self, macs: &[MacAddress]) {
        self.put_len(macs.len());
        for mac in macs {
            self.buf.put_slice(mac.as_bytes());
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}

/// Cursor over a borrowed payload.
#[derive(Debug)]
pub struct BackupReader<'a> {
    buf: &'a [u8],
}

impl<'a> BackupReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    fn ensure(&self, needed: usize, field: &str) -> Result<(), CoreError> {
        if self.buf.remaining() < needed {
            return Err(CoreError::malformed(format!(
                "truncated at {field}: need {needed} bytes, {} remain",
                self.buf.remaining()
            )));
        }
        Ok(())
    }

    pub fn get_i32(&mut self, field: &str) -> Result<i32, CoreError> {
        self.ensure(I32_LEN, field)?;
        Ok(self.buf.get_i32())
    }

    pub fn get_u32(&mut self, field: &str) -> Result<u32, CoreError> {
        self.ensure(I32_LEN, field)?;
        Ok(self.buf.get_u32())
    }

    /// Read a signed 32-bit value that must not be negative.
    pub fn get_non_negative(&mut self, field: &str) -> Result<u32, CoreError> {
        let raw = self.get_i32(field)?;
        u32::try_from(raw).map_err(|_| CoreError::malformed(format!("negative {field} {raw}")))
    }

    pub fn get_u64(&mut self, field: &str) -> Result<u64, CoreError> {
        self.ensure(8, field)?;
        Ok(self.buf.get_u64())
    }

    pub fn get_bool(&mut self, field: &str) -> Result<bool, CoreError> {
        self.ensure(1, field)?;
        Ok(self.buf.get_u8() != 0)
    }

    /// Read a length or count prefix, checking that `elem_len * count`
    /// bytes actually follow before anything is allocated.
    pub fn get_len(&mut self, field: &str, elem_len: usize) -> Result<usize, CoreError> {
        let raw = self.get_i32(field)?;
        let count = usize::try_from(raw)
            .map_err(|_| CoreError::malformed(format!("negative length {raw} at {field}")))?;
        let needed = count
            .checked_mul(elem_len)
            .ok_or_else(|| CoreError::malformed(format!("length {count} overflows at {field}")))?;
        self.ensure(needed, field)?;
        Ok(count)
    }

    pub fn get_string(&mut self, field: &str) -> Result<Option<String>, CoreError> {
        self.ensure(I32_LEN, field)?;
        if self.buf.chunk().get(..I32_LEN) == Some(&NULL_STRING_LEN.to_be_bytes()[..]) {
            self.buf.advance(I32_LEN);
            return Ok(None);
        }

        let len = self.get_len(field, 1)?;
        let mut raw = vec![0u8; len];
        self.buf.copy_to_slice(&mut raw);
        String::from_utf8(raw)
            .map(Some)
            .map_err(|e| CoreError::malformed(format!("invalid UTF-8 at {field}: {e}")))
    }

    pub fn get_mac_list(&mut self, field: &str) -> Result<Vec<MacAddress>, CoreError> {
        let count = self.get_len(field, MAC_ADDRESS_LEN)?;
        let mut macs = Vec::with_capacity(count);
        for _ in 0..count {
            let mut octets = [0u8; MAC_ADDRESS_LEN];
            self.buf.copy_to_slice(&mut octets);
            macs.push(MacAddress::new(octets));
        }
        Ok(macs)
    }

    /// Fail unless every byte has been consumed.
    pub fn expect_end(&self) -> Result<(), CoreError> {
        match self.buf.remaining() {
            0 => Ok(()),
            extra => Err(CoreError::malformed(format!(
                "{extra} unexpected trailing bytes"
            ))),
        }
    }
}
