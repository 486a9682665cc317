//! Block-sorting transforms for OxiBWT.
//!
//! This crate provides pure Rust implementations of the reversible block
//! transforms used ahead of entropy coding in block-sorting compressors:
//!
//! 1. Burrows-Wheeler Transform (BWT) - sorts all rotations of a block so
//!    that bytes sharing a context end up next to each other
//! 2. Sorted Rank Transform (SRT) - turns BWT output into small per-symbol
//!    recency ranks
//!
//! Both operate on one complete in-memory block per call and implement
//! [`ByteTransform`].
//!
//! ## Example
//!
//! ```rust
//! use oxibwt_transform::{BlockSize, Bwt, ByteTransform};
//!
//! let mut bwt = Bwt::new(BlockSize::Dynamic).unwrap();
//! let permuted = bwt.forward(b"mississippi").unwrap();
//! assert_eq!(permuted, b"pssmipissii");
//!
//! // Store the primary index with the permuted block.
//! let index = bwt.primary_index().unwrap();
//! assert_eq!(index, 4);
//!
//! let mut other = Bwt::new(BlockSize::Dynamic).unwrap();
//! other.set_primary_index(index).unwrap();
//! assert_eq!(other.inverse(&permuted).unwrap(), b"mississippi");
//! ```
//!
//! ## Concurrency
//!
//! An engine mutates its scratch buffers and primary index on every call.
//! Process concurrent blocks with one engine each; the `parallel` feature
//! does this with rayon.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

/// Burrows-Wheeler Transform implementation.
pub mod bwt;
#[cfg(feature = "parallel")]
pub mod parallel;
/// Sorted Rank Transform implementation.
pub mod srt;

pub use bwt::{BlockSize, Bwt, BwtBlock, MAX_BLOCK_SIZE};
pub use oxibwt_core::{ByteTransform, Result, TransformError};
pub use srt::{SRT_HEADER_SIZE, Srt};

#[cfg(feature = "parallel")]
pub use parallel::{forward_blocks, inverse_blocks};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bwt_then_srt_roundtrip() {
        let original = b"the quick brown fox jumps over the lazy dog the end".to_vec();

        let mut bwt = Bwt::default();
        let mut srt = Srt::new();
        let permuted = bwt.forward_block(&original).unwrap();
        let ranked = srt.forward(&permuted.data).unwrap();

        let unranked = srt.inverse(&ranked).unwrap();
        assert_eq!(unranked, permuted.data);
        assert_eq!(bwt.inverse_block(&permuted).unwrap(), original);
    }

    #[test]
    fn test_transforms_as_trait_objects() {
        let mut transforms: Vec<Box<dyn ByteTransform>> =
            vec![Box::new(Bwt::default()), Box::new(Srt::new())];
        for t in transforms.iter_mut() {
            let encoded = t.forward(b"abracadabra").unwrap();
            assert_eq!(t.inverse(&encoded).unwrap(), b"abracadabra");
        }
    }
}
