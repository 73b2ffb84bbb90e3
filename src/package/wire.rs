//! Bounds-checked field reader and length-prefixed field writer

use bytes::{Buf, BufMut, BytesMut};

use crate::protocol::{Error, PackageKind, Result};

/// Cursor over package bytes; every read checks the remaining length first
pub(crate) struct FieldReader<'a> {
    kind: PackageKind,
    buf: &'a [u8],
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(kind: PackageKind, buf: &'a [u8]) -> Self {
        Self { kind, buf }
    }

    fn need(&self, len: usize) -> Result<()> {
        if self.buf.remaining() < len {
            return Err(Error::MalformedPackage {
                kind: self.kind,
                reason: "record shorter than its layout",
            });
        }
        Ok(())
    }

    pub(crate) fn u8(&mut self) -> Result<u8> {
        self.need(1)?;
        Ok(self.buf.get_u8())
    }

    pub(crate) fn u16(&mut self) -> Result<u16> {
        self.need(2)?;
        Ok(self.buf.get_u16_le())
    }

    pub(crate) fn u32(&mut self) -> Result<u32> {
        self.need(4)?;
        Ok(self.buf.get_u32_le())
    }

    pub(crate) fn bool(&mut self) -> Result<bool> {
        match self.u8()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(Error::MalformedPackage {
                kind: self.kind,
                reason: "boolean field out of range",
            }),
        }
    }

    pub(crate) fn bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.need(len)?;
        let (head, tail) = self.buf.split_at(len);
        self.buf = tail;
        Ok(head)
    }

    /// Text preceded by a one-byte length
    pub(crate) fn short_text(&mut self) -> Result<String> {
        let len = usize::from(self.u8()?);
        Ok(String::from_utf8(self.bytes(len)?.to_vec())?)
    }

    /// Everything not read yet
    pub(crate) fn rest(&mut self) -> &'a [u8] {
        let rest = self.buf;
        self.buf = &[];
        rest
    }

    /// Fail unless every byte was consumed
    pub(crate) fn finish(self) -> Result<()> {
        if self.buf.has_remaining() {
            return Err(Error::MalformedPackage {
                kind: self.kind,
                reason: "trailing bytes after record",
            });
        }
        Ok(())
    }
}

/// Growable buffer for serializing package fields
pub(crate) struct FieldWriter {
    buf: BytesMut,
}

impl FieldWriter {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    pub(crate) fn u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    pub(crate) fn u16(&mut self, value: u16) {
        self.buf.put_u16_le(value);
    }

    pub(crate) fn u32(&mut self, value: u32) {
        self.buf.put_u32_le(value);
    }

    pub(crate) fn bool(&mut self, value: bool) {
        self.buf.put_u8(u8::from(value));
    }

    pub(crate) fn bytes(&mut self, value: &[u8]) {
        self.buf.put_slice(value);
    }

    /// Text preceded by a one-byte length
    pub(crate) fn short_text(&mut self, field: &str, value: &str) -> Result<()> {
        self.short_text_max(field, value, usize::from(u8::MAX))
    }

    pub(crate) fn short_text_max(&mut self, field: &str, value: &str, max: usize) -> Result<()> {
        let len = checked_len(field, value.len(), max)?;
        self.u8(len as u8);
        self.bytes(value.as_bytes());
        Ok(())
    }

    /// Blob preceded by a two-byte length
    pub(crate) fn long_bytes(&mut self, field: &str, value: &[u8]) -> Result<()> {
        let len = checked_len(field, value.len(), usize::from(u16::MAX))?;
        self.u16(len as u16);
        self.bytes(value);
        Ok(())
    }

    pub(crate) fn into_vec(self) -> Vec<u8> {
        self.buf.to_vec()
    }
}

fn checked_len(field: &str, len: usize, max: usize) -> Result<usize> {
    if len > max {
        return Err(Error::InvalidInput(format!(
            "{field} is {len} bytes (max {max})"
        )));
    }
    Ok(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_rejects_short_buffer() {
        let mut reader = FieldReader::new(PackageKind::Station, &[0x01, 0x02]);
        assert!(matches!(
            reader.u32(),
            Err(Error::MalformedPackage {
                kind: PackageKind::Station,
                ..
            })
        ));
    }

    #[test]
    fn test_short_text_length_checked_against_remaining() {
        // Declares 5 bytes but carries 2
        let mut reader = FieldReader::new(PackageKind::Synchro, &[0x05, b'a', b'b']);
        assert!(reader.short_text().is_err());
    }

    #[test]
    fn test_writer_little_endian() {
        let mut writer = FieldWriter::with_capacity(8);
        writer.u16(0x1234);
        writer.u32(0xAABB_CCDD);
        assert_eq!(writer.into_vec(), vec![0x34, 0x12, 0xDD, 0xCC, 0xBB, 0xAA]);
    }

    #[test]
    fn test_writer_rejects_long_text() {
        let mut writer = FieldWriter::with_capacity(0);
        let long = "x".repeat(256);
        assert!(matches!(
            writer.short_text("name", &long),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_finish_flags_trailing_bytes() {
        let mut reader = FieldReader::new(PackageKind::Aggregation, &[0x00, 0xFF]);
        reader.u8().unwrap();
        assert!(reader.finish().is_err());
    }
}
