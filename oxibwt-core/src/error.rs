//! Error types for OxiBWT operations.
//!
//! Every failure is detected synchronously by the call that receives the bad
//! input and is reported to the caller. Nothing is retried or corrected
//! internally: the transforms are deterministic, so repeating a call with the
//! same inputs yields the same error.

use thiserror::Error;

/// The main error type for OxiBWT operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// Configured block size cannot be addressed by the index representation.
    #[error("Invalid block size: {size} (must be between 1 and {max})")]
    InvalidBlockSize {
        /// Requested block size.
        size: usize,
        /// Largest supported block size.
        max: usize,
    },

    /// Block handed to a dynamically sized engine is too long to index.
    #[error("Block too large: {len} bytes exceeds maximum of {max}")]
    BlockTooLarge {
        /// Length of the offending block.
        len: usize,
        /// Largest supported block size.
        max: usize,
    },

    /// Block length disagrees with the fixed engine configuration.
    #[error("Block size mismatch: engine expects {expected} bytes, got {actual}")]
    SizeMismatch {
        /// Configured block size.
        expected: usize,
        /// Length of the block that was supplied.
        actual: usize,
    },

    /// Primary index is not valid for the block being inverted.
    #[error("Primary index {} out of range for block of {len} bytes", display_index(.index))]
    IndexOutOfRange {
        /// The index, or `None` if it was never set.
        index: Option<u32>,
        /// Length of the block (or configured size) it was checked against.
        len: usize,
    },

    /// Output buffer too small for operation.
    #[error("Output buffer too small: need {needed} bytes, have {available}")]
    OutputTooSmall {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// Encoded header could not be parsed.
    #[error("Corrupted header: {message}")]
    CorruptedHeader {
        /// Description of the header error.
        message: String,
    },
}

/// Result type alias for OxiBWT operations.
pub type Result<T> = std::result::Result<T, TransformError>;

fn display_index(index: &Option<u32>) -> String {
    match index {
        Some(index) => index.to_string(),
        None => "(unset)".to_string(),
    }
}

impl TransformError {
    /// Create an invalid block size error.
    pub fn invalid_block_size(size: usize, max: usize) -> Self {
        Self::InvalidBlockSize { size, max }
    }

    /// Create a block too large error.
    pub fn block_too_large(len: usize, max: usize) -> Self {
        Self::BlockTooLarge { len, max }
    }

    /// Create a size mismatch error.
    pub fn size_mismatch(expected: usize, actual: usize) -> Self {
        Self::SizeMismatch { expected, actual }
    }

    /// Create an index out of range error.
    pub fn index_out_of_range(index: Option<u32>, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Create an output too small error.
    pub fn output_too_small(needed: usize, available: usize) -> Self {
        Self::OutputTooSmall { needed, available }
    }

    /// Create a corrupted header error.
    pub fn corrupted_header(message: impl Into<String>) -> Self {
        Self::CorruptedHeader {
            message: message.into(),
        }
    }

    /// Whether this error stems from engine configuration rather than block data.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidBlockSize { .. } | Self::BlockTooLarge { .. }
        )
    }
}
