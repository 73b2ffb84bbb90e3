//! Frame codec error types

use thiserror::Error;

use super::{PackageKind, VERSION};

/// Frame codec and reassembly errors
#[derive(Error, Debug)]
pub enum Error {
    /// Caller supplied something the codec cannot work with
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Buffer shorter than the frame it claims to hold
    #[error("truncated frame: need {needed} bytes, got {got}")]
    Truncated {
        /// Needed size
        needed: usize,
        /// Actual size
        got: usize,
    },

    /// Frame version differs from the supported one
    #[error("unsupported protocol version: expected {expected}, got {found}", expected = VERSION)]
    UnsupportedVersion {
        /// Version found in the header
        found: u8,
    },

    /// No single type code, or bits outside the defined set
    #[error("invalid flags: {flags:#04x}")]
    InvalidFlags {
        /// Raw flags value
        flags: u8,
    },

    /// Checksum mismatch
    #[error("checksum mismatch: expected {expected:#06x}, got {found:#06x}")]
    ChecksumMismatch {
        /// Checksum computed over the received bytes
        expected: u16,
        /// Checksum carried by the frame
        found: u16,
    },

    /// Payload too large for a single frame
    #[error("payload too large: {size} bytes (max {max})")]
    PayloadTooLarge {
        /// Payload size
        size: usize,
        /// Maximum allowed
        max: usize,
    },

    /// Package needs more chunks than a transmission may carry
    #[error("too many fragments: {chunks} chunks (max {max})")]
    TooManyFragments {
        /// Chunks the package would need
        chunks: usize,
        /// Configured limit
        max: usize,
    },

    /// A frame in a reassembly batch disagrees with the rest
    #[error("incompatible chunk at index {index}")]
    IncompatibleChunk {
        /// Position of the offending frame
        index: usize,
    },

    /// The terminator frame has not arrived yet
    #[error("incomplete transmission: terminator frame missing")]
    IncompleteTransmission,

    /// Nothing to decode or compose
    #[error("empty input")]
    EmptyInput,

    /// Package bytes do not match the layout of their kind
    #[error("malformed {kind} package: {reason}")]
    MalformedPackage {
        /// Package kind being deserialized
        kind: PackageKind,
        /// What went wrong
        reason: &'static str,
    },

    /// Invalid UTF-8
    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
