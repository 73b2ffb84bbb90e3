//! AGG package: a group of stations watered together on a schedule

use super::wire::{FieldReader, FieldWriter};
use super::{PackageBody, Status};
use crate::protocol::{Error, PackageKind, Result};

/// Fixed-size part of the record, excluding text bodies
const FIXED_SIZE: usize = 15;

/// When an aggregation starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    /// Minute, 0..=59
    pub minute: u8,
    /// Hour, 0..=23
    pub hour: u8,
    /// Enabled weekdays, one bit per day (0x01..=0x7F)
    pub days: u8,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            minute: 0,
            hour: 0,
            days: 0x7F,
        }
    }
}

/// Aggregation descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aggregation {
    /// Id in the coordinator database
    pub id: u32,
    /// Free text description
    pub description: String,
    /// Started by hand rather than by `schedule`
    pub manual: bool,
    /// Automatic start time
    pub schedule: Schedule,
    /// Start of the active period, if bounded
    pub start: String,
    /// End of the active period, if bounded
    pub end: String,
    /// Water stations one after another
    pub sequential: bool,
    /// Ordering weight
    pub weight: u16,
    /// Current status
    pub status: Status,
}

impl Default for Aggregation {
    fn default() -> Self {
        Self {
            id: 0,
            description: String::new(),
            manual: true,
            schedule: Schedule::default(),
            start: String::new(),
            end: String::new(),
            sequential: true,
            weight: 0,
            status: Status::Unactive,
        }
    }
}

impl PackageBody for Aggregation {
    const KIND: PackageKind = PackageKind::Aggregation;

    fn serialize(&self) -> Result<Vec<u8>> {
        let mut writer = FieldWriter::with_capacity(
            FIXED_SIZE + self.description.len() + self.start.len() + self.end.len(),
        );
        writer.u32(self.id);
        writer.short_text("aggregation description", &self.description)?;
        writer.bool(self.manual);
        writer.u8(self.schedule.minute);
        writer.u8(self.schedule.hour);
        writer.u8(self.schedule.days);
        writer.short_text("aggregation start", &self.start)?;
        writer.short_text("aggregation end", &self.end)?;
        writer.bool(self.sequential);
        writer.u16(self.weight);
        writer.u8(self.status.as_u8());
        Ok(writer.into_vec())
    }

    fn deserialize(bytes: &[u8], fragment: u8) -> Result<Self> {
        if fragment > 0 {
            return Err(Error::MalformedPackage {
                kind: Self::KIND,
                reason: "aggregation record cannot start mid-record",
            });
        }
        let mut reader = FieldReader::new(Self::KIND, bytes);
        let aggregation = Self {
            id: reader.u32()?,
            description: reader.short_text()?,
            manual: reader.bool()?,
            schedule: Schedule {
                minute: reader.u8()?,
                hour: reader.u8()?,
                days: reader.u8()?,
            },
            start: reader.short_text()?,
            end: reader.short_text()?,
            sequential: reader.bool()?,
            weight: reader.u16()?,
            status: Status::read(Self::KIND, reader.u8()?)?,
        };
        reader.finish()?;
        Ok(aggregation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let original = Aggregation {
            id: 23,
            description: "descrizione".into(),
            manual: false,
            schedule: Schedule {
                minute: 30,
                hour: 13,
                days: 0b0111_1111,
            },
            start: "2021-09-01".into(),
            end: "2021-10-01".into(),
            sequential: true,
            weight: 4,
            status: Status::Active,
        };
        let bytes = original.serialize().unwrap();

        assert_eq!(bytes.len(), FIXED_SIZE + 11 + 10 + 10);
        assert_eq!(Aggregation::deserialize(&bytes, 0).unwrap(), original);
    }

    #[test]
    fn test_bad_bool_rejected() {
        let mut bytes = Aggregation::default().serialize().unwrap();
        // id(4) + empty description(1) puts `manual` at offset 5
        bytes[5] = 2;
        assert!(Aggregation::deserialize(&bytes, 0).is_err());
    }
}
