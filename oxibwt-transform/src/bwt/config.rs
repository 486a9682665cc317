//! Block size configuration for the BWT engine.

use oxibwt_core::error::{Result, TransformError};

/// Largest block the engine accepts.
///
/// Rotation offsets, ranks and the primary index are 32-bit; the bound keeps
/// every index representable as a signed 32-bit value so stored indices stay
/// portable.
pub const MAX_BLOCK_SIZE: usize = i32::MAX as usize;

/// How an engine decides the length of each block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockSize {
    /// Accept any block length up to [`MAX_BLOCK_SIZE`]; scratch buffers grow
    /// on demand.
    #[default]
    Dynamic,
    /// Every call must supply exactly this many bytes.
    Fixed(usize),
}

impl BlockSize {
    /// Map a raw length to a configuration, treating 0 as [`BlockSize::Dynamic`].
    pub fn from_len(len: usize) -> Self {
        if len == 0 {
            Self::Dynamic
        } else {
            Self::Fixed(len)
        }
    }

    /// The fixed length, if any.
    pub fn fixed_len(&self) -> Option<usize> {
        match *self {
            Self::Dynamic => None,
            Self::Fixed(len) => Some(len),
        }
    }

    /// Whether the block length is decided per call.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic)
    }

    /// Reject fixed sizes the index representation cannot address.
    pub(crate) fn validate(self) -> Result<Self> {
        match self {
            Self::Fixed(len) if len == 0 || len > MAX_BLOCK_SIZE => {
                Err(TransformError::invalid_block_size(len, MAX_BLOCK_SIZE))
            }
            _ => Ok(self),
        }
    }

    /// Check a block length against this configuration.
    pub fn check(&self, len: usize) -> Result<()> {
        match *self {
            Self::Fixed(expected) if len != expected => {
                Err(TransformError::size_mismatch(expected, len))
            }
            Self::Dynamic if len > MAX_BLOCK_SIZE => {
                Err(TransformError::block_too_large(len, MAX_BLOCK_SIZE))
            }
            _ => Ok(()),
        }
    }

    /// Exclusive upper bound for a primary index accepted before the block
    /// length is known.
    pub(crate) fn index_limit(&self) -> usize {
        self.fixed_len().unwrap_or(MAX_BLOCK_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_len() {
        assert_eq!(BlockSize::from_len(0), BlockSize::Dynamic);
        assert_eq!(BlockSize::from_len(128), BlockSize::Fixed(128));
        assert_eq!(BlockSize::default(), BlockSize::Dynamic);
    }

    #[test]
    fn test_validate() {
        assert!(BlockSize::Dynamic.validate().is_ok());
        assert!(BlockSize::Fixed(1).validate().is_ok());
        assert!(BlockSize::Fixed(MAX_BLOCK_SIZE).validate().is_ok());
        assert!(matches!(
            BlockSize::Fixed(0).validate(),
            Err(TransformError::InvalidBlockSize { size: 0, .. })
        ));
        assert!(matches!(
            BlockSize::Fixed(MAX_BLOCK_SIZE + 1).validate(),
            Err(TransformError::InvalidBlockSize { .. })
        ));
    }

    #[test]
    fn test_check() {
        assert!(BlockSize::Fixed(11).check(11).is_ok());
        assert_eq!(
            BlockSize::Fixed(11).check(10),
            Err(TransformError::size_mismatch(11, 10))
        );
        assert!(BlockSize::Dynamic.check(0).is_ok());
        assert!(BlockSize::Dynamic.check(1 << 20).is_ok());
    }

    #[test]
    fn test_index_limit() {
        assert_eq!(BlockSize::Fixed(64).index_limit(), 64);
        assert_eq!(BlockSize::Dynamic.index_limit(), MAX_BLOCK_SIZE);
    }
}
