//! Core trait for reversible block transforms.
//!
//! A block transform consumes one complete in-memory block per call and keeps
//! whatever side information the inverse needs (such as the BWT primary
//! index) as instance state. Instances own mutable scratch storage, so one
//! instance must serve at most one block at a time.

use crate::error::{Result, TransformError};

/// A reversible transform over whole byte blocks.
///
/// Implemented by the Burrows-Wheeler and Sorted Rank transforms.
pub trait ByteTransform {
    /// Transform `input` into `output`.
    ///
    /// # Returns
    ///
    /// The number of bytes written to `output`.
    fn forward_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize>;

    /// Undo [`forward_into`](Self::forward_into), writing the original block
    /// into `output`.
    ///
    /// # Returns
    ///
    /// The number of bytes written to `output`.
    fn inverse_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize>;

    /// Upper bound on the forward output length for an input of `len` bytes.
    fn max_encoded_len(&self, len: usize) -> usize {
        len
    }

    /// Upper bound on the inverse output length for an input of `len` bytes.
    fn max_decoded_len(&self, len: usize) -> usize {
        len
    }

    /// Transform a whole block into a freshly allocated buffer.
    fn forward(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = vec![0u8; self.max_encoded_len(input.len())];
        let written = self.forward_into(input, &mut output)?;
        output.truncate(written);
        Ok(output)
    }

    /// Invert a whole block into a freshly allocated buffer.
    fn inverse(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = vec![0u8; self.max_decoded_len(input.len())];
        let written = self.inverse_into(input, &mut output)?;
        output.truncate(written);
        Ok(output)
    }
}

/// Check that a caller-supplied output buffer can hold `needed` bytes.
pub fn ensure_output_len(output: &[u8], needed: usize) -> Result<()> {
    if output.len() < needed {
        return Err(TransformError::output_too_small(needed, output.len()));
    }
    Ok(())
}
