//! Reassembly of a collected frame sequence into one package

use bytes::BytesMut;
use tracing::trace;

use super::{Error, Frame, PackageKind, Result};
use crate::package::Package;

/// Rebuild the package carried by an ordered, fully collected transmission
///
/// A single frame must be self-contained (or a lone terminator). Several
/// frames must be data chunks of one kind and decorator set, closed by
/// exactly one terminator in last position.
///
/// # Errors
///
/// Returns an error if:
/// - `frames` is empty
/// - the terminator is missing
/// - a frame disagrees with the first chunk, or follows the terminator
/// - the reassembled bytes do not deserialize as the frame kind
pub fn compose(frames: &[Frame]) -> Result<(PackageKind, Package)> {
    let Some((first, rest)) = frames.split_first() else {
        return Err(Error::EmptyInput);
    };

    if rest.is_empty() {
        if !first.is_complete() {
            return Err(Error::IncompleteTransmission);
        }
        let kind = first.kind();
        let package = Package::deserialize(kind, first.payload(), 0)?;
        return Ok((kind, package));
    }

    let expected = first.flags();
    if !expected.is_chunk() || first.is_terminator() {
        return Err(Error::IncompatibleChunk { index: 0 });
    }

    let mut buffer = BytesMut::with_capacity(frames.len() * usize::from(u8::MAX));
    let mut terminated = false;
    for (index, frame) in frames.iter().enumerate() {
        if terminated {
            return Err(Error::IncompatibleChunk { index });
        }
        if frame.is_terminator() {
            if frame.flags().requires_ack() != expected.requires_ack() {
                return Err(Error::IncompatibleChunk { index });
            }
            terminated = true;
            continue;
        }
        if frame.flags() != expected {
            return Err(Error::IncompatibleChunk { index });
        }
        buffer.extend_from_slice(frame.payload());
    }

    if !terminated {
        return Err(Error::IncompleteTransmission);
    }

    let kind = expected.kind();
    trace!(%kind, frames = frames.len(), len = buffer.len(), "reassembled chunks");
    let package = Package::deserialize(kind, &buffer, 0)?;
    Ok((kind, package))
}
