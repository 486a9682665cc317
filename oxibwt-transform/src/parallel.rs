//! Parallel transforms over independent blocks (requires `parallel` feature).
//!
//! Engines are never shared: rayon's `map_init` gives each worker its own
//! [`Bwt`], so scratch buffers are reused within a worker and results come
//! back in block order.

use crate::bwt::{BlockSize, Bwt, BwtBlock};
use oxibwt_core::error::Result;
use rayon::prelude::*;
use tracing::debug;

/// Forward-transform every block in parallel.
///
/// # Returns
///
/// One [`BwtBlock`] per input block, in input order. The first failing block
/// aborts the whole batch.
pub fn forward_blocks<B>(blocks: &[B], block_size: BlockSize) -> Result<Vec<BwtBlock>>
where
    B: AsRef<[u8]> + Sync,
{
    // Surface configuration errors once instead of per worker.
    Bwt::new(block_size)?;
    debug!(blocks = blocks.len(), "parallel bwt forward");

    blocks
        .par_iter()
        .map_init(
            || Bwt::new(block_size),
            |engine, block| match engine {
                Ok(engine) => engine.forward_block(block.as_ref()),
                Err(err) => Err(err.clone()),
            },
        )
        .collect()
}

/// Invert every block in parallel.
///
/// # Returns
///
/// The original blocks, in input order.
pub fn inverse_blocks(blocks: &[BwtBlock], block_size: BlockSize) -> Result<Vec<Vec<u8>>> {
    Bwt::new(block_size)?;
    debug!(blocks = blocks.len(), "parallel bwt inverse");

    blocks
        .par_iter()
        .map_init(
            || Bwt::new(block_size),
            |engine, block| match engine {
                Ok(engine) => engine.inverse_block(block),
                Err(err) => Err(err.clone()),
            },
        )
        .collect()
}
