//! SYN package: device serial sent to open a session

use super::PackageBody;
use super::wire::{FieldReader, FieldWriter};
use crate::protocol::{Error, PackageKind, Result};

/// Maximum serial length in bytes
pub const MAX_SERIAL_SIZE: usize = 32;

/// Synchronization handshake
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Synchro {
    /// Device serial
    pub serial: String,
}

impl Synchro {
    /// Create a handshake for the given serial
    pub fn new(serial: impl Into<String>) -> Self {
        Self {
            serial: serial.into(),
        }
    }
}

impl PackageBody for Synchro {
    const KIND: PackageKind = PackageKind::Synchro;

    fn serialize(&self) -> Result<Vec<u8>> {
        let mut writer = FieldWriter::with_capacity(1 + self.serial.len());
        writer.short_text_max("serial", &self.serial, MAX_SERIAL_SIZE)?;
        Ok(writer.into_vec())
    }

    fn deserialize(bytes: &[u8], fragment: u8) -> Result<Self> {
        if fragment > 0 {
            return Err(Error::MalformedPackage {
                kind: Self::KIND,
                reason: "handshake cannot be fragmented",
            });
        }
        let mut reader = FieldReader::new(Self::KIND, bytes);
        let serial = reader.short_text()?;
        reader.finish()?;
        Ok(Self { serial })
    }
}
