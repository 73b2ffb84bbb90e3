//! Garden controller wire protocol - framing and fragmentation for sensor/coordinator links
//!
//! This library turns application packages into checksummed binary frames,
//! splits oversized payloads into chunked runs closed by a terminator frame,
//! and reassembles collected runs back into packages.
//!
//! # Quick Start
//!
//! ```rust
//! use garden_wire::{Flags, Package, PackageKind, compose, decode, encode};
//! use garden_wire::package::Synchro;
//!
//! // Encode a handshake asking for acknowledgment
//! let package = Package::from(Synchro::new("serial123456789"));
//! let frames = encode(&package, Flags::ACK)?;
//!
//! // Frames travel as bytes
//! let wire = frames[0].to_bytes();
//! let frame = decode(&wire)?;
//!
//! // Reassemble
//! let (kind, decoded) = compose(&[frame])?;
//! assert_eq!(kind, PackageKind::Synchro);
//! assert_eq!(decoded, package);
//! # Ok::<(), garden_wire::Error>(())
//! ```
//!
//! # Features
//!
//! - **Bit-packed header** - version, kind and decorators share one byte
//! - **CRC-16/XMODEM** - every frame is sealed, every decode verified
//! - **Fragmentation** - up to 16 chunks of 255 bytes per transmission
//! - **Stateless** - no shared state; callers own all buffering

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod package;
pub mod protocol;

pub use package::{Package, PackageBody};
pub use protocol::{
    CodecConfig, Error, Flags, Frame, MAX_CHUNKS_PER_TRANSMISSION, MAX_FRAME_PAYLOAD,
    PackageKind, Result, compose, decode, decode_first, encode, encode_to_bytes,
    encode_with_config, is_complete, tag_transmission_id, tag_transmission_id_all,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
