//! Frame codec (encode/decode) and transmission tagging

use bytes::Bytes;
use tracing::{debug, trace};

use super::checksum::checksum;
use super::frame::VERSION_SHIFT;
use super::{
    CHECKSUM_SIZE, CodecConfig, Error, Flags, Frame, HEADER_SIZE, MAX_FRAME_PAYLOAD,
    MIN_FRAME_SIZE, Result, VERSION,
};
use crate::package::Package;

/// Encode a package into one or more frames using the default limits
///
/// # Format
///
/// ```text
/// small:      [KIND | deco]
/// fragmented: [KIND | deco | CHUNK] x n  [FIN | ACK? | CHUNK]
/// ```
///
/// `decorators` may only carry [`Flags::ACK`]; the encoder owns the chunk bit.
pub fn encode(package: &Package, decorators: u8) -> Result<Vec<Frame>> {
    encode_with_config(package, decorators, &CodecConfig::default())
}

/// Encode a package into one or more frames
///
/// # Errors
///
/// Returns an error if:
/// - `decorators` carries anything but the acknowledge bit
/// - the package cannot be serialized
/// - the payload needs more than `config.max_chunks` chunks
pub fn encode_with_config(
    package: &Package,
    decorators: u8,
    config: &CodecConfig,
) -> Result<Vec<Frame>> {
    if decorators & !Flags::ACK != 0 {
        return Err(Error::InvalidFlags { flags: decorators });
    }

    let kind = package.kind();
    let payload = Bytes::from(package.serialize()?);
    let flags = Flags::new(kind).with(decorators);

    if payload.len() <= MAX_FRAME_PAYLOAD {
        let frame = Frame::new(flags, payload)?;
        trace!(%kind, len = frame.length(), "encoded single frame");
        return Ok(vec![frame]);
    }

    let chunks = payload.len().div_ceil(MAX_FRAME_PAYLOAD);
    if chunks > config.max_chunks {
        return Err(Error::TooManyFragments {
            chunks,
            max: config.max_chunks,
        });
    }

    debug!(%kind, len = payload.len(), chunks, "fragmenting package");

    let flags = flags.with(Flags::CHUNK);
    let mut frames = Vec::with_capacity(chunks + 1);
    let mut offset = 0;
    while offset < payload.len() {
        let end = (offset + MAX_FRAME_PAYLOAD).min(payload.len());
        let frame = Frame::new(flags, payload.slice(offset..end))?;
        trace!(%kind, index = frames.len(), len = frame.length(), "encoded chunk");
        frames.push(frame);
        offset = end;
    }
    frames.push(Frame::terminator(decorators));

    Ok(frames)
}

/// Encode a package straight to wire buffers, one per frame
pub fn encode_to_bytes(package: &Package, decorators: u8) -> Result<Vec<Vec<u8>>> {
    Ok(encode(package, decorators)?
        .iter()
        .map(Frame::to_bytes)
        .collect())
}

/// Decode one frame from wire bytes
///
/// # Format
///
/// ```text
/// [VER|FLAGS] [ID] [LEN] [PAYLOAD (LEN bytes)] [CRC lo] [CRC hi]
/// ```
///
/// Bytes after the checksum are ignored.
///
/// # Errors
///
/// Returns an error if:
/// - Buffer is shorter than the header and checksum, or than the declared length
/// - Checksum doesn't match
/// - Version is not the supported one
/// - Flags carry no package kind or reserved bits
pub fn decode(bytes: &[u8]) -> Result<Frame> {
    let total_available = bytes.len();

    if total_available < MIN_FRAME_SIZE {
        return Err(Error::Truncated {
            needed: MIN_FRAME_SIZE,
            got: total_available,
        });
    }

    let payload_len = usize::from(bytes[2]);
    let checksum_offset = HEADER_SIZE + payload_len;
    let total_size = checksum_offset + CHECKSUM_SIZE;
    if total_available < total_size {
        return Err(Error::Truncated {
            needed: total_size,
            got: total_available,
        });
    }

    // Checksum before version and flags
    let found = u16::from_le_bytes([bytes[checksum_offset], bytes[checksum_offset + 1]]);
    let expected = checksum(&bytes[..checksum_offset]);
    if found != expected {
        return Err(Error::ChecksumMismatch { expected, found });
    }

    let version = bytes[0] >> VERSION_SHIFT;
    if version != VERSION {
        return Err(Error::UnsupportedVersion { found: version });
    }

    let raw_flags = bytes[0] & !(u8::MAX << VERSION_SHIFT);
    let flags = Flags::from_u8(raw_flags).ok_or(Error::InvalidFlags { flags: raw_flags })?;
    let id = bytes[1];

    let payload = Bytes::copy_from_slice(&bytes[HEADER_SIZE..checksum_offset]);
    Ok(Frame::from_parts(version, flags, id, payload, found))
}

/// Decode the first buffer of a transmission
pub fn decode_first<B: AsRef<[u8]>>(buffers: &[B]) -> Result<Frame> {
    let first = buffers.first().ok_or(Error::EmptyInput)?;
    decode(first.as_ref())
}

/// Stamp a transmission id into an encoded frame and re-seal its checksum
///
/// Only the id byte and the two checksum bytes change.
///
/// # Errors
///
/// Returns an error if the buffer is shorter than the frame it declares or
/// carries a different protocol version.
pub fn tag_transmission_id(buffer: &mut [u8], id: u8) -> Result<()> {
    if buffer.len() < MIN_FRAME_SIZE {
        return Err(Error::Truncated {
            needed: MIN_FRAME_SIZE,
            got: buffer.len(),
        });
    }

    let version = buffer[0] >> VERSION_SHIFT;
    if version != VERSION {
        return Err(Error::UnsupportedVersion { found: version });
    }

    let checksum_offset = HEADER_SIZE + usize::from(buffer[2]);
    if buffer.len() < checksum_offset + CHECKSUM_SIZE {
        return Err(Error::Truncated {
            needed: checksum_offset + CHECKSUM_SIZE,
            got: buffer.len(),
        });
    }

    buffer[1] = id;
    let sealed = checksum(&buffer[..checksum_offset]);
    buffer[checksum_offset..checksum_offset + CHECKSUM_SIZE].copy_from_slice(&sealed.to_le_bytes());
    trace!(id, "tagged frame");
    Ok(())
}

/// Stamp the same transmission id into every frame of a transmission
///
/// Stops at the first buffer that cannot be tagged; earlier buffers keep
/// their new id.
pub fn tag_transmission_id_all<B: AsMut<[u8]>>(buffers: &mut [B], id: u8) -> Result<()> {
    for buffer in buffers {
        tag_transmission_id(buffer.as_mut(), id)?;
    }
    Ok(())
}
