//! Package kinds and frame flags

use std::fmt;

use super::Error;

/// Package kind carried in the low three bits of the flags
///
/// Exactly one kind is set per frame; the codes are not bits and cannot be
/// combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum PackageKind {
    /// Synchronization handshake
    Synchro = 0x01,
    /// Certificate enabling point-to-point communication
    Certificate = 0x02,
    /// Aggregation (schedule) descriptor
    Aggregation = 0x03,
    /// Station descriptor
    Station = 0x04,
    /// Telemetry data
    Data = 0x05,
    /// Error text
    Error = 0x06,
    /// End of communication; terminates a chunked run
    Finish = 0x07,
}

impl PackageKind {
    /// All kinds, in code order
    pub const ALL: [Self; 7] = [
        Self::Synchro,
        Self::Certificate,
        Self::Aggregation,
        Self::Station,
        Self::Data,
        Self::Error,
        Self::Finish,
    ];

    /// Convert from type code
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Self::Synchro),
            0x02 => Some(Self::Certificate),
            0x03 => Some(Self::Aggregation),
            0x04 => Some(Self::Station),
            0x05 => Some(Self::Data),
            0x06 => Some(Self::Error),
            0x07 => Some(Self::Finish),
            _ => None,
        }
    }

    /// Convert to type code
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Synchro => "SYN",
            Self::Certificate => "CRT",
            Self::Aggregation => "AGG",
            Self::Station => "STA",
            Self::Data => "DAT",
            Self::Error => "ERR",
            Self::Finish => "FIN",
        };
        write!(f, "{name}")
    }
}

/// Frame flags: one package kind plus decorator bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Flags(u8);

impl Flags {
    /// Bits holding the package kind code
    pub const KIND_MASK: u8 = 0b0000_0111;
    /// Frame is one fragment of a chunked run
    pub const CHUNK: u8 = 1 << 3;
    /// Sender wants acknowledgment
    pub const ACK: u8 = 1 << 4;
    /// Valid decorator bits
    pub const DECORATOR_MASK: u8 = Self::CHUNK | Self::ACK;
    /// Valid flag bits mask
    pub const VALID_MASK: u8 = Self::KIND_MASK | Self::DECORATOR_MASK;

    /// Create flags for a package kind with no decorators
    #[must_use]
    pub const fn new(kind: PackageKind) -> Self {
        Self(kind.as_u8())
    }

    /// Create from byte
    ///
    /// Returns `None` when the kind code is zero or a bit outside
    /// [`Self::VALID_MASK`] is set.
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        if value & !Self::VALID_MASK != 0 {
            return None;
        }
        PackageKind::from_u8(value & Self::KIND_MASK).map(|_| Self(value))
    }

    /// Convert to byte
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Set a decorator bit
    #[must_use]
    pub const fn with(mut self, decorator: u8) -> Self {
        debug_assert!(decorator & !Self::DECORATOR_MASK == 0, "invalid decorator bit");
        self.0 |= decorator & Self::DECORATOR_MASK;
        self
    }

    /// Check if decorator is set
    #[must_use]
    pub const fn has(self, decorator: u8) -> bool {
        (self.0 & decorator) != 0
    }

    /// Package kind
    #[must_use]
    pub fn kind(self) -> PackageKind {
        // Construction paths only admit valid kind codes.
        PackageKind::from_u8(self.0 & Self::KIND_MASK).unwrap_or(PackageKind::Finish)
    }

    /// Decorator bits only
    #[must_use]
    pub const fn decorators(self) -> u8 {
        self.0 & Self::DECORATOR_MASK
    }

    /// Check if part of a chunked run
    #[must_use]
    pub const fn is_chunk(self) -> bool {
        self.has(Self::CHUNK)
    }

    /// Check if requires acknowledgment
    #[must_use]
    pub const fn requires_ack(self) -> bool {
        self.has(Self::ACK)
    }

    /// Check if this marks the end of a chunked run
    #[must_use]
    pub fn is_terminator(self) -> bool {
        self.is_chunk() && self.kind() == PackageKind::Finish
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())?;
        if self.is_chunk() {
            write!(f, " | CHUNK")?;
        }
        if self.requires_ack() {
            write!(f, " | ACK")?;
        }
        Ok(())
    }
}

impl TryFrom<u8> for Flags {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or(Error::InvalidFlags { flags: value })
    }
}

impl From<Flags> for u8 {
    fn from(flags: Flags) -> Self {
        flags.as_u8()
    }
}
