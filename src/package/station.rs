//! STA package: one irrigation station (relay) and its watering state

use super::wire::{FieldReader, FieldWriter};
use super::{PackageBody, Status};
use crate::protocol::{Error, PackageKind, Result};

/// Station descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    /// Id in the coordinator database
    pub id: u32,
    /// Short name
    pub name: String,
    /// Free text description
    pub description: String,
    /// Relay driving this station
    pub relay_number: u8,
    /// Watering time in seconds
    pub watering_time: u32,
    /// Seconds of watering left in the current run
    pub watering_time_left: u32,
    /// Ordering weight inside an aggregation
    pub weight: u16,
    /// Current status
    pub status: Status,
}

impl PackageBody for Station {
    const KIND: PackageKind = PackageKind::Station;

    fn serialize(&self) -> Result<Vec<u8>> {
        let mut writer =
            FieldWriter::with_capacity(18 + self.name.len() + self.description.len());
        writer.u32(self.id);
        writer.short_text("station name", &self.name)?;
        writer.short_text("station description", &self.description)?;
        writer.u8(self.relay_number);
        writer.u32(self.watering_time);
        writer.u32(self.watering_time_left);
        writer.u16(self.weight);
        writer.u8(self.status.as_u8());
        Ok(writer.into_vec())
    }

    fn deserialize(bytes: &[u8], fragment: u8) -> Result<Self> {
        if fragment > 0 {
            return Err(Error::MalformedPackage {
                kind: Self::KIND,
                reason: "station record cannot start mid-record",
            });
        }
        let mut reader = FieldReader::new(Self::KIND, bytes);
        let station = Self {
            id: reader.u32()?,
            name: reader.short_text()?,
            description: reader.short_text()?,
            relay_number: reader.u8()?,
            watering_time: reader.u32()?,
            watering_time_left: reader.u32()?,
            weight: reader.u16()?,
            status: Status::read(Self::KIND, reader.u8()?)?,
        };
        reader.finish()?;
        Ok(station)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station() -> Station {
        Station {
            id: 7,
            name: "station1".into(),
            description: "front lawn".into(),
            relay_number: 3,
            watering_time: 600,
            watering_time_left: 120,
            weight: 2,
            status: Status::Active,
        }
    }

    #[test]
    fn test_roundtrip() {
        let original = station();
        let bytes = original.serialize().unwrap();
        assert_eq!(bytes.len(), 18 + 8 + 10);
        assert_eq!(Station::deserialize(&bytes, 0).unwrap(), original);
    }

    #[test]
    fn test_bad_status_rejected() {
        let mut bytes = station().serialize().unwrap();
        let last = bytes.len() - 1;
        bytes[last] = 9;
        assert!(matches!(
            Station::deserialize(&bytes, 0),
            Err(Error::MalformedPackage { .. })
        ));
    }

    #[test]
    fn test_truncated_rejected() {
        let bytes = station().serialize().unwrap();
        assert!(Station::deserialize(&bytes[..bytes.len() - 3], 0).is_err());
    }
}
