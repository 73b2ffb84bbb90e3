//! Frame codec and chunk reassembly
//!
//! This module provides the wire format, flags, checksum, encoder, decoder,
//! reassembly and transmission tagging.

mod checksum;
mod codec;
mod compose;
mod config;
mod error;
mod frame;
mod types;

pub use checksum::checksum;
pub use codec::{
    decode, decode_first, encode, encode_to_bytes, encode_with_config, tag_transmission_id,
    tag_transmission_id_all,
};
pub use compose::compose;
pub use config::CodecConfig;
pub use error::{Error, Result};
pub use frame::{Frame, is_complete};
pub use types::{Flags, PackageKind};

/// Supported protocol version (three bits in header byte 0)
pub const VERSION: u8 = 0;

/// Maximum payload bytes in one frame
pub const MAX_FRAME_PAYLOAD: usize = 255;

/// Maximum data chunks in one fragmented transmission
pub const MAX_CHUNKS_PER_TRANSMISSION: usize = 16;

/// Header size in bytes (version | flags, id, length)
pub const HEADER_SIZE: usize = 3;

/// Checksum size in bytes
pub const CHECKSUM_SIZE: usize = 2;

/// Minimum frame size (header + checksum, empty payload)
pub const MIN_FRAME_SIZE: usize = HEADER_SIZE + CHECKSUM_SIZE;
