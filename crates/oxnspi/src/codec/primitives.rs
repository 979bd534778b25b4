//! Low-level readers and writers for the NSPI wire format.
//!
//! Every multi-byte integer is little-endian. The reader owns an explicit
//! cursor into a borrowed buffer, so independent decodes never share state.

use crate::error::{DecodeError, EncodeError};
use crate::limits::FLAT_UID_LEN;
use crate::model::FlatUid;

/// Cursor over a borrowed byte buffer.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current cursor offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// The unread tail of the buffer.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    pub fn read_byte(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        let byte = *self
            .data
            .get(self.pos)
            .ok_or(DecodeError::UnexpectedEof { context })?;
        self.pos += 1;
        Ok(byte)
    }

    pub fn read_bytes(&mut self, len: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        if len > self.remaining_len() {
            return Err(DecodeError::UnexpectedEof { context });
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self, context: &'static str) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N, context)?);
        Ok(out)
    }

    pub fn read_u16(&mut self, context: &'static str) -> Result<u16, DecodeError> {
        Ok(u16::from_le_bytes(self.read_array(context)?))
    }

    pub fn read_i16(&mut self, context: &'static str) -> Result<i16, DecodeError> {
        Ok(i16::from_le_bytes(self.read_array(context)?))
    }

    pub fn read_u32(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.read_array(context)?))
    }

    pub fn read_i32(&mut self, context: &'static str) -> Result<i32, DecodeError> {
        Ok(i32::from_le_bytes(self.read_array(context)?))
    }

    pub fn read_u64(&mut self, context: &'static str) -> Result<u64, DecodeError> {
        Ok(u64::from_le_bytes(self.read_array(context)?))
    }

    pub fn read_flat_uid(&mut self, context: &'static str) -> Result<FlatUid, DecodeError> {
        Ok(FlatUid(self.read_array::<FLAT_UID_LEN>(context)?))
    }

    /// Reads a u32 count and rejects it if it exceeds `max`.
    pub fn read_count(&mut self, max: usize, field: &'static str) -> Result<usize, DecodeError> {
        let count = self.read_u32(field)? as usize;
        if count > max {
            return Err(DecodeError::CountLimitExceeded { field, count, max });
        }
        Ok(count)
    }

    /// Capacity to reserve for `count` elements still to be read. Every
    /// element takes at least one byte, so a count larger than the input
    /// left cannot be honest.
    pub fn capacity_for(&self, count: usize) -> usize {
        count.min(self.remaining_len())
    }

    /// Reads a NUL-terminated 8-bit string and returns the bytes before the
    /// terminator. The terminator is consumed.
    pub fn read_ansi_cstring(&mut self, context: &'static str) -> Result<&'a [u8], DecodeError> {
        let tail = self.remaining();
        let len = tail
            .iter()
            .position(|b| *b == 0)
            .ok_or(DecodeError::UnterminatedString { context })?;
        self.pos += len + 1;
        Ok(&tail[..len])
    }

    /// Reads a NUL-terminated UTF-16LE string. The terminator is consumed.
    pub fn read_utf16_cstring(&mut self, context: &'static str) -> Result<String, DecodeError> {
        let tail = self.remaining();
        let mut units = Vec::new();
        let mut consumed = 0;
        loop {
            let Some(pair) = tail.get(consumed..consumed + 2) else {
                return Err(DecodeError::UnterminatedString { context });
            };
            consumed += 2;
            let unit = u16::from_le_bytes([pair[0], pair[1]]);
            if unit == 0 {
                break;
            }
            units.push(unit);
        }
        self.pos += consumed;
        String::from_utf16(&units).map_err(|_| DecodeError::InvalidUtf16 { context })
    }
}

/// Growable output buffer.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_i16(&mut self, v: i16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_flat_uid(&mut self, uid: &FlatUid) {
        self.buf.extend_from_slice(uid.as_bytes());
    }

    /// Writes a u32 count after checking it against `max`.
    pub fn write_count(&mut self, count: usize, max: usize, field: &'static str) -> Result<(), EncodeError> {
        if count > max {
            return Err(EncodeError::CountLimitExceeded { field, count, max });
        }
        self.write_u32(count as u32);
        Ok(())
    }

    /// Writes bytes followed by a NUL terminator.
    pub fn write_ansi_cstring(&mut self, bytes: &[u8], context: &'static str) -> Result<(), EncodeError> {
        if bytes.contains(&0) {
            return Err(EncodeError::InteriorNul { context });
        }
        self.buf.extend_from_slice(bytes);
        self.buf.push(0);
        Ok(())
    }

    /// Writes a string as UTF-16LE followed by a two-byte NUL terminator.
    pub fn write_utf16_cstring(&mut self, s: &str, context: &'static str) -> Result<(), EncodeError> {
        if s.contains('\0') {
            return Err(EncodeError::InteriorNul { context });
        }
        for unit in s.encode_utf16() {
            self.buf.extend_from_slice(&unit.to_le_bytes());
        }
        self.buf.extend_from_slice(&[0, 0]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_bounded_by_input() {
        let data = [0xA0, 0x86, 0x01, 0x00, 0x01, 0x02];
        let mut reader = Reader::new(&data);
        let count = reader.read_count(100_000, "count").unwrap();
        assert_eq!(count, 100_000);
        assert_eq!(reader.capacity_for(count), 2);
        assert_eq!(reader.capacity_for(1), 1);
    }

    #[test]
    fn test_integers_little_endian() {
        let mut writer = Writer::new();
        writer.write_u16(0x0102);
        writer.write_u32(0x0304_0506);
        writer.write_i32(-2);
        assert_eq!(
            writer.as_bytes(),
            &[0x02, 0x01, 0x06, 0x05, 0x04, 0x03, 0xFE, 0xFF, 0xFF, 0xFF]
        );

        let mut reader = Reader::new(writer.as_bytes());
        assert_eq!(reader.read_u16("a").unwrap(), 0x0102);
        assert_eq!(reader.read_u32("b").unwrap(), 0x0304_0506);
        assert_eq!(reader.read_i32("c").unwrap(), -2);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_eof_reports_context() {
        let mut reader = Reader::new(&[0x01, 0x02, 0x03]);
        let err = reader.read_u32("row count").unwrap_err();
        assert_eq!(err, DecodeError::UnexpectedEof { context: "row count" });
        // A failed read does not advance the cursor.
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_ansi_cstring() {
        let mut reader = Reader::new(b"abc\0def");
        assert_eq!(reader.read_ansi_cstring("s").unwrap(), b"abc");
        assert_eq!(reader.position(), 4);
        assert!(matches!(
            reader.read_ansi_cstring("s"),
            Err(DecodeError::UnterminatedString { .. })
        ));
    }

    #[test]
    fn test_utf16_cstring_roundtrip() {
        let mut writer = Writer::new();
        writer.write_utf16_cstring("Grüße", "s").unwrap();
        let mut reader = Reader::new(writer.as_bytes());
        assert_eq!(reader.read_utf16_cstring("s").unwrap(), "Grüße");
        assert!(reader.is_empty());
    }

    #[test]
    fn test_utf16_unterminated() {
        let mut reader = Reader::new(&[0x41, 0x00, 0x42]);
        assert!(matches!(
            reader.read_utf16_cstring("s"),
            Err(DecodeError::UnterminatedString { .. })
        ));
    }

    #[test]
    fn test_interior_nul_rejected() {
        let mut writer = Writer::new();
        assert!(writer.write_ansi_cstring(b"a\0b", "s").is_err());
        assert!(writer.write_utf16_cstring("a\0b", "s").is_err());
    }

    #[test]
    fn test_count_limit() {
        let mut writer = Writer::new();
        writer.write_count(10, 10, "n").unwrap();
        assert!(writer.write_count(11, 10, "n").is_err());

        let mut reader = Reader::new(&[11, 0, 0, 0]);
        assert_eq!(
            reader.read_count(10, "n"),
            Err(DecodeError::CountLimitExceeded { field: "n", count: 11, max: 10 })
        );
    }
}
