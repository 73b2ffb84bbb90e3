//! Application packages carried inside frames
//!
//! Each kind implements [`PackageBody`]; [`Package`] is the closed set the
//! codec encodes and reassembles, dispatching on [`PackageKind`].

mod aggregation;
mod station;
mod synchro;
mod text;
mod wire;

pub use aggregation::{Aggregation, Schedule};
pub use station::Station;
pub use synchro::{MAX_SERIAL_SIZE, Synchro};
pub use text::{Certificate, Data, ErrorMessage};

use std::fmt;

use crate::protocol::{Error, PackageKind, Result};

/// Serialize/deserialize contract for one package kind
pub trait PackageBody: Sized {
    /// Kind stamped into the frame flags
    const KIND: PackageKind;

    /// Exact bytes to be framed (and chunked if needed)
    fn serialize(&self) -> Result<Vec<u8>>;

    /// Rebuild from bytes
    ///
    /// `fragment == 0` means the bytes start at the beginning of the record,
    /// length prefixes included; any other value means raw continuation bytes.
    fn deserialize(bytes: &[u8], fragment: u8) -> Result<Self>;
}

/// Status of a station or aggregation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Status {
    /// Not active
    #[default]
    Unactive = 0,
    /// Active
    Active = 1,
    /// In error
    Error = 2,
}

impl Status {
    /// Convert from byte
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Unactive),
            1 => Some(Self::Active),
            2 => Some(Self::Error),
            _ => None,
        }
    }

    /// Convert to byte
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    fn read(kind: PackageKind, value: u8) -> Result<Self> {
        Self::from_u8(value).ok_or(Error::MalformedPackage {
            kind,
            reason: "status out of range",
        })
    }
}

/// End of communication; carries no body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Finish;

impl PackageBody for Finish {
    const KIND: PackageKind = PackageKind::Finish;

    fn serialize(&self) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }

    fn deserialize(bytes: &[u8], _fragment: u8) -> Result<Self> {
        if !bytes.is_empty() {
            return Err(Error::MalformedPackage {
                kind: Self::KIND,
                reason: "finish carries no body",
            });
        }
        Ok(Self)
    }
}

/// Any package the protocol can carry
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Package {
    /// Synchronization handshake
    Synchro(Synchro),
    /// Certificate
    Certificate(Certificate),
    /// Aggregation descriptor
    Aggregation(Aggregation),
    /// Station descriptor
    Station(Station),
    /// Telemetry data
    Data(Data),
    /// Error text
    Error(ErrorMessage),
    /// End of communication
    Finish(Finish),
}

impl Package {
    /// Kind of the wrapped package
    #[must_use]
    pub const fn kind(&self) -> PackageKind {
        match self {
            Self::Synchro(_) => Synchro::KIND,
            Self::Certificate(_) => Certificate::KIND,
            Self::Aggregation(_) => Aggregation::KIND,
            Self::Station(_) => Station::KIND,
            Self::Data(_) => Data::KIND,
            Self::Error(_) => ErrorMessage::KIND,
            Self::Finish(_) => Finish::KIND,
        }
    }

    /// Serialize the wrapped package
    pub fn serialize(&self) -> Result<Vec<u8>> {
        match self {
            Self::Synchro(p) => p.serialize(),
            Self::Certificate(p) => p.serialize(),
            Self::Aggregation(p) => p.serialize(),
            Self::Station(p) => p.serialize(),
            Self::Data(p) => p.serialize(),
            Self::Error(p) => p.serialize(),
            Self::Finish(p) => p.serialize(),
        }
    }

    /// Deserialize bytes as the package of `kind`
    pub fn deserialize(kind: PackageKind, bytes: &[u8], fragment: u8) -> Result<Self> {
        Ok(match kind {
            PackageKind::Synchro => Self::Synchro(Synchro::deserialize(bytes, fragment)?),
            PackageKind::Certificate => {
                Self::Certificate(Certificate::deserialize(bytes, fragment)?)
            }
            PackageKind::Aggregation => {
                Self::Aggregation(Aggregation::deserialize(bytes, fragment)?)
            }
            PackageKind::Station => Self::Station(Station::deserialize(bytes, fragment)?),
            PackageKind::Data => Self::Data(Data::deserialize(bytes, fragment)?),
            PackageKind::Error => Self::Error(ErrorMessage::deserialize(bytes, fragment)?),
            PackageKind::Finish => Self::Finish(Finish::deserialize(bytes, fragment)?),
        })
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} package", self.kind())
    }
}

macro_rules! impl_from_body {
    ($($body:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$body> for Package {
                fn from(body: $body) -> Self {
                    Self::$variant(body)
                }
            }
        )*
    };
}

impl_from_body!(
    Synchro => Synchro,
    Certificate => Certificate,
    Aggregation => Aggregation,
    Station => Station,
    Data => Data,
    ErrorMessage => Error,
    Finish => Finish,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_body() {
        let packages: [Package; 7] = [
            Synchro::new("s1").into(),
            Certificate::new("c").into(),
            Aggregation::default().into(),
            Station::default().into(),
            Data::new(vec![1, 2]).into(),
            ErrorMessage::new("e").into(),
            Finish.into(),
        ];
        for (package, kind) in packages.iter().zip(PackageKind::ALL) {
            assert_eq!(package.kind(), kind);
        }
    }

    #[test]
    fn test_dispatch_by_kind() {
        let original = Package::from(Station {
            name: "north".into(),
            ..Station::default()
        });
        let bytes = original.serialize().unwrap();
        let decoded = Package::deserialize(PackageKind::Station, &bytes, 0).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_finish_rejects_body() {
        assert!(Finish::deserialize(&[0], 0).is_err());
        assert_eq!(Finish::deserialize(&[], 0).unwrap(), Finish);
    }

    #[test]
    fn test_status_from_u8() {
        assert_eq!(Status::from_u8(2), Some(Status::Error));
        assert_eq!(Status::from_u8(3), None);
    }
}
