//! Wire frame: packed header, payload and trailing checksum

use bytes::Bytes;

use super::checksum::checksum_parts;
use super::{CHECKSUM_SIZE, Error, Flags, HEADER_SIZE, MAX_FRAME_PAYLOAD, PackageKind, Result, VERSION};

/// Bits of header byte 0 that hold the version
pub(crate) const VERSION_SHIFT: u8 = 5;

/// One wire-format unit
///
/// # Wire Format
///
/// ```text
///  0                   1                   2
///  0 1 2 3 4 5 6 7 0 1 2 3 4 5 6 7 0 1 2 3 4 5 6 7
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |Kind |C|A| Ver |  Transmission  | Payload Len L |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |            Payload (L bytes, 0..=255)         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |  CRC16 low    |  CRC16 high   |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// The checksum covers the three header bytes followed by the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    version: u8,
    flags: Flags,
    id: u8,
    payload: Bytes,
    checksum: u16,
}

impl Frame {
    /// Create a frame with transmission id 0 and a freshly computed checksum
    pub fn new(flags: Flags, payload: impl Into<Bytes>) -> Result<Self> {
        let payload = payload.into();
        if payload.len() > MAX_FRAME_PAYLOAD {
            return Err(Error::PayloadTooLarge {
                size: payload.len(),
                max: MAX_FRAME_PAYLOAD,
            });
        }

        let mut frame = Self {
            version: VERSION,
            flags,
            id: 0,
            payload,
            checksum: 0,
        };
        frame.checksum = frame.compute_checksum();
        Ok(frame)
    }

    /// Create the terminator closing a chunked run
    #[must_use]
    pub fn terminator(decorators: u8) -> Self {
        let flags = Flags::new(PackageKind::Finish)
            .with(Flags::CHUNK)
            .with(decorators & Flags::ACK);
        let mut frame = Self {
            version: VERSION,
            flags,
            id: 0,
            payload: Bytes::new(),
            checksum: 0,
        };
        frame.checksum = frame.compute_checksum();
        frame
    }

    /// Assemble a frame from already validated wire fields
    pub(crate) fn from_parts(version: u8, flags: Flags, id: u8, payload: Bytes, checksum: u16) -> Self {
        Self {
            version,
            flags,
            id,
            payload,
            checksum,
        }
    }

    /// Get protocol version
    #[must_use]
    pub const fn version(&self) -> u8 {
        self.version
    }

    /// Get flags
    #[must_use]
    pub const fn flags(&self) -> Flags {
        self.flags
    }

    /// Get package kind
    #[must_use]
    pub fn kind(&self) -> PackageKind {
        self.flags.kind()
    }

    /// Get transmission ID
    #[must_use]
    pub const fn id(&self) -> u8 {
        self.id
    }

    /// Get payload length
    #[must_use]
    pub fn length(&self) -> u8 {
        // Bounded by MAX_FRAME_PAYLOAD at construction.
        u8::try_from(self.payload.len()).unwrap_or(u8::MAX)
    }

    /// Get payload
    #[must_use]
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Get checksum
    #[must_use]
    pub const fn checksum(&self) -> u16 {
        self.checksum
    }

    /// Size of this frame on the wire
    #[must_use]
    pub fn wire_len(&self) -> usize {
        HEADER_SIZE + self.payload.len() + CHECKSUM_SIZE
    }

    /// Check if this frame closes a chunked run
    #[must_use]
    pub fn is_terminator(&self) -> bool {
        self.flags.is_terminator()
    }

    /// Check if nothing more is expected after this frame
    ///
    /// A frame without the chunk bit stands alone. A chunked frame is
    /// complete only when it is the terminator.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.flags.is_chunk() || self.is_terminator()
    }

    /// Packed header bytes (version | flags, id, length)
    #[must_use]
    pub fn header_bytes(&self) -> [u8; HEADER_SIZE] {
        [
            (self.version << VERSION_SHIFT) | self.flags.as_u8(),
            self.id,
            self.length(),
        ]
    }

    /// Checksum the header and payload as they would go on the wire
    #[must_use]
    pub fn compute_checksum(&self) -> u16 {
        checksum_parts(&self.header_bytes(), &self.payload)
    }

    /// Serialize to wire bytes, checksum little-endian
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.wire_len());
        bytes.extend_from_slice(&self.header_bytes());
        bytes.extend_from_slice(&self.payload);
        bytes.extend_from_slice(&self.checksum.to_le_bytes());
        bytes
    }

    /// Decode from wire bytes
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        super::decode(bytes)
    }
}

/// Check if a transmission is complete after `frame`
///
/// No frame at all is vacuously complete.
#[must_use]
pub fn is_complete(frame: Option<&Frame>) -> bool {
    frame.is_none_or(Frame::is_complete)
}
