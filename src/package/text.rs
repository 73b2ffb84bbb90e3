//! Blob-like packages: certificate, telemetry data and error text
//!
//! These may span several chunks. With `fragment > 0` the bytes are a raw
//! continuation and become the body as-is.

use super::PackageBody;
use super::wire::{FieldReader, FieldWriter};
use crate::protocol::{PackageKind, Result};

/// Credential blob enabling point-to-point communication
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Certificate {
    /// Certificate text (e.g. an OpenSSH public key)
    pub certificate: String,
}

impl Certificate {
    /// Wrap certificate text
    pub fn new(certificate: impl Into<String>) -> Self {
        Self {
            certificate: certificate.into(),
        }
    }
}

impl PackageBody for Certificate {
    const KIND: PackageKind = PackageKind::Certificate;

    fn serialize(&self) -> Result<Vec<u8>> {
        let mut writer = FieldWriter::with_capacity(2 + self.certificate.len());
        writer.long_bytes("certificate", self.certificate.as_bytes())?;
        Ok(writer.into_vec())
    }

    fn deserialize(bytes: &[u8], fragment: u8) -> Result<Self> {
        let body = long_body(Self::KIND, bytes, fragment)?;
        Ok(Self {
            certificate: String::from_utf8(body)?,
        })
    }
}

/// Telemetry data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Data {
    /// Opaque sensor payload
    pub payload: Vec<u8>,
}

impl Data {
    /// Wrap a telemetry payload
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

impl PackageBody for Data {
    const KIND: PackageKind = PackageKind::Data;

    fn serialize(&self) -> Result<Vec<u8>> {
        let mut writer = FieldWriter::with_capacity(2 + self.payload.len());
        writer.long_bytes("data payload", &self.payload)?;
        Ok(writer.into_vec())
    }

    fn deserialize(bytes: &[u8], fragment: u8) -> Result<Self> {
        Ok(Self {
            payload: long_body(Self::KIND, bytes, fragment)?,
        })
    }
}

/// Error text reported by the peer
///
/// Serialized without a length prefix; frame lengths delimit it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorMessage {
    /// Error text
    pub message: String,
}

impl ErrorMessage {
    /// Wrap an error text
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl PackageBody for ErrorMessage {
    const KIND: PackageKind = PackageKind::Error;

    fn serialize(&self) -> Result<Vec<u8>> {
        Ok(self.message.as_bytes().to_vec())
    }

    fn deserialize(bytes: &[u8], _fragment: u8) -> Result<Self> {
        Ok(Self {
            message: String::from_utf8(bytes.to_vec())?,
        })
    }
}

/// Body of a u16 length-prefixed record, or a raw continuation
fn long_body(kind: PackageKind, bytes: &[u8], fragment: u8) -> Result<Vec<u8>> {
    let mut reader = FieldReader::new(kind, bytes);
    if fragment > 0 {
        return Ok(reader.rest().to_vec());
    }
    let len = usize::from(reader.u16()?);
    let body = reader.bytes(len)?.to_vec();
    reader.finish()?;
    Ok(body)
}
