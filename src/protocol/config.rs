//! Codec configuration

use super::MAX_CHUNKS_PER_TRANSMISSION;

/// Encoder limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Maximum data chunks per fragmented transmission (terminator excluded)
    pub max_chunks: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_chunks: MAX_CHUNKS_PER_TRANSMISSION,
        }
    }
}

impl CodecConfig {
    /// Override the chunk limit
    #[must_use]
    pub const fn with_max_chunks(mut self, max_chunks: usize) -> Self {
        self.max_chunks = max_chunks;
        self
    }
}
