//! Burrows-Wheeler Transform engine.
//!
//! The forward transform sorts all cyclic rotations of a block and emits the
//! last byte of each sorted rotation. The rank of the unrotated block in that
//! order is the *primary index*, which the caller must keep alongside the
//! permuted bytes: the inverse cannot run without it.
//!
//! Bytes compare unsigned and identical rotations are ordered by their start
//! offset, so every block has exactly one `(output, primary index)` pair.
//!
//! An engine keeps its scratch arrays between calls and only grows them, so
//! reusing one engine for a stream of blocks avoids reallocating. Engines are
//! not meant to be shared: use one per concurrently processed block.

mod config;
mod suffix;

pub use config::{BlockSize, MAX_BLOCK_SIZE};

use oxibwt_core::error::{Result, TransformError};
use oxibwt_core::traits::{ByteTransform, ensure_output_len};
use suffix::RotationSorter;
use tracing::{debug, trace};

/// Permuted block together with the primary index needed to invert it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BwtBlock {
    /// The last column of the sorted rotations.
    pub data: Vec<u8>,
    /// Rank of the original block among its sorted rotations.
    pub primary_index: u32,
}

/// Burrows-Wheeler Transform engine.
#[derive(Debug)]
pub struct Bwt {
    block_size: BlockSize,
    primary_index: Option<u32>,
    sorter: RotationSorter,
    lf: Vec<u32>,
    staging: Vec<u8>,
}

impl Bwt {
    /// Create a new engine.
    ///
    /// Fails if a fixed block size is zero or larger than [`MAX_BLOCK_SIZE`].
    pub fn new(block_size: BlockSize) -> Result<Self> {
        Ok(Self {
            block_size: block_size.validate()?,
            primary_index: None,
            sorter: RotationSorter::new(),
            lf: Vec::new(),
            staging: Vec::new(),
        })
    }

    /// Create a new engine from a raw block length, where 0 selects
    /// [`BlockSize::Dynamic`].
    pub fn with_block_size(size: usize) -> Result<Self> {
        Self::new(BlockSize::from_len(size))
    }

    /// The configured block size.
    pub fn block_size(&self) -> BlockSize {
        self.block_size
    }

    /// The current primary index.
    ///
    /// Set by every forward transform and by [`set_primary_index`](Self::set_primary_index);
    /// `None` until either happens.
    pub fn primary_index(&self) -> Option<u32> {
        self.primary_index
    }

    /// Set the primary index used by the next inverse transform.
    ///
    /// The index is checked against the fixed block size right away; for a
    /// dynamic engine it is checked against the block when inverting.
    pub fn set_primary_index(&mut self, index: u32) -> Result<()> {
        let limit = self.block_size.index_limit();
        if index as usize >= limit {
            return Err(TransformError::index_out_of_range(Some(index), limit));
        }
        self.primary_index = Some(index);
        Ok(())
    }

    /// Largest block length the scratch buffers hold without reallocating.
    pub fn scratch_capacity(&self) -> usize {
        self.sorter.capacity().min(self.lf.len())
    }

    /// Transform a block, returning the permuted bytes with their primary index.
    pub fn forward_block(&mut self, input: &[u8]) -> Result<BwtBlock> {
        let mut data = vec![0u8; input.len()];
        let primary_index = self.transform(input, &mut data)?;
        Ok(BwtBlock {
            data,
            primary_index,
        })
    }

    /// Invert a block produced by [`forward_block`](Self::forward_block).
    ///
    /// Overwrites the engine's primary index with the block's own.
    pub fn inverse_block(&mut self, block: &BwtBlock) -> Result<Vec<u8>> {
        self.set_primary_index(block.primary_index)?;
        self.inverse(&block.data)
    }

    /// Replace `block` with its forward transform.
    pub fn forward_in_place(&mut self, block: &mut [u8]) -> Result<()> {
        let mut staging = std::mem::take(&mut self.staging);
        staging.clear();
        staging.extend_from_slice(block);
        let result = self.transform(&staging, block);
        self.staging = staging;
        result.map(|_| ())
    }

    /// Replace `block` with its inverse transform.
    pub fn inverse_in_place(&mut self, block: &mut [u8]) -> Result<()> {
        let mut staging = std::mem::take(&mut self.staging);
        staging.clear();
        staging.extend_from_slice(block);
        let result = self.untransform(&staging, block);
        self.staging = staging;
        result
    }

    fn transform(&mut self, input: &[u8], output: &mut [u8]) -> Result<u32> {
        let n = input.len();
        self.block_size.check(n)?;
        ensure_output_len(output, n)?;

        let mut primary = 0u32;
        let sorted = self.sorter.sort(input);
        for (row, (dst, &start)) in output.iter_mut().zip(sorted).enumerate() {
            let start = start as usize;
            *dst = if start == 0 {
                primary = row as u32;
                input[n - 1]
            } else {
                input[start - 1]
            };
        }

        trace!(len = n, primary_index = primary, "bwt forward");
        self.primary_index = Some(primary);
        Ok(primary)
    }

    fn untransform(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        let n = input.len();
        self.block_size.check(n)?;
        ensure_output_len(output, n)?;
        let primary = self.resolve_primary(n)?;
        if n == 0 {
            return Ok(());
        }

        let mut buckets = [0u32; 256];
        for &b in input {
            buckets[b as usize] += 1;
        }
        let mut sum = 0u32;
        for count in buckets.iter_mut() {
            sum += std::mem::replace(count, sum);
        }

        if self.lf.len() < n {
            debug!(from = self.lf.len(), to = n, "growing lf scratch");
            self.lf.resize(n, 0);
        }
        let lf = &mut self.lf[..n];
        for (slot, &b) in lf.iter_mut().zip(input) {
            let bucket = &mut buckets[b as usize];
            *slot = *bucket;
            *bucket += 1;
        }

        // Row `idx` is the rotation ending at the byte being written.
        let mut idx = primary;
        for dst in output[..n].iter_mut().rev() {
            *dst = input[idx];
            idx = lf[idx] as usize;
        }

        trace!(len = n, primary_index = primary, "bwt inverse");
        Ok(())
    }

    fn resolve_primary(&self, n: usize) -> Result<usize> {
        match self.primary_index {
            _ if n == 0 => Ok(0),
            Some(index) if (index as usize) < n => Ok(index as usize),
            None if n == 1 => Ok(0),
            index => Err(TransformError::index_out_of_range(index, n)),
        }
    }
}

impl Default for Bwt {
    fn default() -> Self {
        Self {
            block_size: BlockSize::Dynamic,
            primary_index: None,
            sorter: RotationSorter::new(),
            lf: Vec::new(),
            staging: Vec::new(),
        }
    }
}

impl ByteTransform for Bwt {
    fn forward_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        self.transform(input, output)?;
        Ok(input.len())
    }

    fn inverse_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        self.untransform(input, output)?;
        Ok(input.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bwt_empty() {
        let mut bwt = Bwt::default();
        let transformed = bwt.forward(b"").unwrap();
        assert!(transformed.is_empty());
        assert_eq!(bwt.primary_index(), Some(0));
        assert!(bwt.inverse(b"").unwrap().is_empty());
    }

    #[test]
    fn test_bwt_single() {
        let mut bwt = Bwt::default();
        let transformed = bwt.forward(b"a").unwrap();
        assert_eq!(transformed, b"a");
        assert_eq!(bwt.primary_index(), Some(0));
        assert_eq!(bwt.inverse(&transformed).unwrap(), b"a");
    }

    #[test]
    fn test_bwt_banana() {
        let mut bwt = Bwt::default();
        let transformed = bwt.forward(b"banana").unwrap();
        assert_eq!(transformed, b"nnbaaa");
        assert_eq!(bwt.primary_index(), Some(3));
        assert_eq!(bwt.inverse(&transformed).unwrap(), b"banana");
    }

    #[test]
    fn test_bwt_roundtrip() {
        let test_cases = [
            b"hello world".as_slice(),
            b"abracadabra",
            b"mississippi",
            b"aaaaa",
            b"abcde",
            b"abababab",
            b"the quick brown fox jumps over the lazy dog",
        ];

        let mut bwt = Bwt::default();
        for data in test_cases {
            let transformed = bwt.forward(data).unwrap();
            let recovered = bwt.inverse(&transformed).unwrap();
            assert_eq!(recovered, data, "Failed for: {:?}", data);
        }
    }

    #[test]
    fn test_bwt_groups_similar() {
        let mut bwt = Bwt::default();
        let transformed = bwt.forward(b"abababab").unwrap();
        assert_eq!(transformed, b"bbbbaaaa");
    }

    #[test]
    fn test_unset_index() {
        let mut bwt = Bwt::default();
        assert_eq!(bwt.primary_index(), None);
        assert_eq!(
            bwt.inverse(b"ab"),
            Err(TransformError::index_out_of_range(None, 2))
        );
        // A single byte has only one legal index.
        assert_eq!(bwt.inverse(b"z").unwrap(), b"z");
    }

    #[test]
    fn test_index_checked_at_inverse() {
        let mut bwt = Bwt::default();
        bwt.set_primary_index(11).unwrap();
        assert_eq!(
            bwt.inverse(b"pssmipissii"),
            Err(TransformError::index_out_of_range(Some(11), 11))
        );
    }

    #[test]
    fn test_fixed_size_index_checked_eagerly() {
        let mut bwt = Bwt::with_block_size(11).unwrap();
        assert_eq!(
            bwt.set_primary_index(11),
            Err(TransformError::index_out_of_range(Some(11), 11))
        );
        assert!(bwt.set_primary_index(10).is_ok());
    }

    #[test]
    fn test_in_place() {
        let mut bwt = Bwt::default();
        let mut block = *b"mississippi";
        bwt.forward_in_place(&mut block).unwrap();
        assert_eq!(&block, b"pssmipissii");
        bwt.inverse_in_place(&mut block).unwrap();
        assert_eq!(&block, b"mississippi");
    }

    #[test]
    fn test_block_pairing() {
        let mut bwt = Bwt::default();
        let first = bwt.forward_block(b"mississippi").unwrap();
        let second = bwt.forward_block(b"abracadabra").unwrap();
        assert_eq!(second.primary_index, 2);
        assert_eq!(bwt.inverse_block(&first).unwrap(), b"mississippi");
        assert_eq!(bwt.primary_index(), Some(4));
    }

    #[test]
    fn test_output_too_small() {
        let mut bwt = Bwt::default();
        let mut out = [0u8; 3];
        assert_eq!(
            bwt.forward_into(b"abcd", &mut out),
            Err(TransformError::output_too_small(4, 3))
        );
    }

    #[test]
    fn test_scratch_grows_monotonically() {
        let mut bwt = Bwt::default();
        assert_eq!(bwt.scratch_capacity(), 0);
        let encoded = bwt.forward(&[3u8; 64]).unwrap();
        bwt.inverse(&encoded).unwrap();
        assert_eq!(bwt.scratch_capacity(), 64);
        let encoded = bwt.forward(b"tiny").unwrap();
        bwt.inverse(&encoded).unwrap();
        assert_eq!(bwt.scratch_capacity(), 64);
    }
}
