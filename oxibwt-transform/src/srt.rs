//! Sorted Rank Transform.
//!
//! SRT is typically applied to BWT output to reduce the variance of the data
//! before entropy coding. Like move-to-front it replaces symbols by ranks in
//! a recency list, but it groups the ranks per symbol: the output holds one
//! bucket per distinct symbol (most frequent first), and each bucket lists the
//! rank the symbol had at each of its occurrences. Repeats inside a run are
//! always rank 0.
//!
//! ## Encoded layout
//!
//! ```text
//! +---------------------------+----------------------+
//! | 256 x u32 BE frequencies  | n rank bytes         |
//! +---------------------------+----------------------+
//! ```
//!
//! An empty block encodes to nothing.

use oxibwt_core::error::{Result, TransformError};
use oxibwt_core::traits::{ByteTransform, ensure_output_len};
use tracing::trace;

/// Size of the frequency table that prefixes every encoded block.
pub const SRT_HEADER_SIZE: usize = 4 * 256;

/// Sorted Rank Transform with reusable symbol tables.
#[derive(Debug, Clone)]
pub struct Srt {
    freqs: [u32; 256],
    symbols: [u8; 256],
    rank_to_symbol: [u8; 256],
    symbol_to_rank: [u8; 256],
    buckets: [usize; 256],
    bucket_ends: [usize; 256],
}

impl Srt {
    /// Create a new transform.
    pub fn new() -> Self {
        Self {
            freqs: [0; 256],
            symbols: [0; 256],
            rank_to_symbol: [0; 256],
            symbol_to_rank: [0; 256],
            buckets: [0; 256],
            bucket_ends: [0; 256],
        }
    }
}

impl Default for Srt {
    fn default() -> Self {
        Self::new()
    }
}

/// Length of the run of identical bytes at the start of `data`.
fn run_len(data: &[u8]) -> usize {
    match data.first() {
        Some(&first) => data.iter().take_while(|&&b| b == first).count(),
        None => 0,
    }
}

/// Collect the symbols present in `freqs`, most frequent first, ties by
/// symbol value. Returns how many there are.
fn sort_symbols(freqs: &[u32; 256], symbols: &mut [u8; 256]) -> usize {
    let mut count = 0;
    for (sym, &freq) in freqs.iter().enumerate() {
        if freq > 0 {
            symbols[count] = sym as u8;
            count += 1;
        }
    }

    symbols[..count].sort_unstable_by(|&a, &b| {
        freqs[b as usize]
            .cmp(&freqs[a as usize])
            .then(a.cmp(&b))
    });
    count
}

impl ByteTransform for Srt {
    fn forward_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        let n = input.len();
        if n == 0 {
            return Ok(0);
        }
        if n > u32::MAX as usize {
            return Err(TransformError::block_too_large(n, u32::MAX as usize));
        }
        ensure_output_len(output, n + SRT_HEADER_SIZE)?;

        let Self {
            freqs,
            symbols,
            rank_to_symbol,
            symbol_to_rank,
            buckets,
            ..
        } = self;

        // Initial ranks follow order of first appearance.
        freqs.fill(0);
        let mut distinct = 0usize;
        let mut i = 0;
        while i < n {
            let c = input[i] as usize;
            let run = run_len(&input[i..]);
            if freqs[c] == 0 {
                rank_to_symbol[distinct] = c as u8;
                symbol_to_rank[c] = distinct as u8;
                distinct += 1;
            }
            freqs[c] += run as u32;
            i += run;
        }

        let nb_symbols = sort_symbols(freqs, symbols);
        let mut pos = 0;
        for &c in &symbols[..nb_symbols] {
            buckets[c as usize] = pos;
            pos += freqs[c as usize] as usize;
        }

        let (header, payload) = output.split_at_mut(SRT_HEADER_SIZE);
        for (chunk, freq) in header.chunks_exact_mut(4).zip(freqs.iter()) {
            chunk.copy_from_slice(&freq.to_be_bytes());
        }

        let dst = &mut payload[..n];
        let mut i = 0;
        while i < n {
            let c = input[i] as usize;
            let run = run_len(&input[i..]);
            let mut r = symbol_to_rank[c] as usize;
            let mut p = buckets[c];
            dst[p] = r as u8;
            p += 1;

            if r != 0 {
                while r != 0 {
                    rank_to_symbol[r] = rank_to_symbol[r - 1];
                    symbol_to_rank[rank_to_symbol[r] as usize] = r as u8;
                    r -= 1;
                }
                rank_to_symbol[0] = c as u8;
                symbol_to_rank[c] = 0;
            }

            dst[p..p + run - 1].fill(0);
            buckets[c] = p + run - 1;
            i += run;
        }

        trace!(len = n, symbols = nb_symbols, "srt forward");
        Ok(n + SRT_HEADER_SIZE)
    }

    fn inverse_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        if input.is_empty() {
            return Ok(0);
        }
        if input.len() < SRT_HEADER_SIZE {
            return Err(TransformError::corrupted_header(format!(
                "frequency table truncated: {} of {} bytes",
                input.len(),
                SRT_HEADER_SIZE
            )));
        }

        let Self {
            freqs,
            symbols,
            rank_to_symbol,
            buckets,
            bucket_ends,
            ..
        } = self;

        let (header, src) = input.split_at(SRT_HEADER_SIZE);
        let n = src.len();
        let mut total = 0u64;
        for (freq, chunk) in freqs.iter_mut().zip(header.chunks_exact(4)) {
            *freq = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            total += u64::from(*freq);
        }
        if total != n as u64 {
            return Err(TransformError::corrupted_header(format!(
                "frequency total {total} does not match payload length {n}"
            )));
        }
        ensure_output_len(output, n)?;
        if n == 0 {
            return Ok(0);
        }

        let mut nb_symbols = sort_symbols(freqs, symbols);
        buckets.fill(0);
        bucket_ends.fill(0);
        let mut pos = 0;
        for &c in &symbols[..nb_symbols] {
            // First entry of a bucket is the symbol's initial rank.
            rank_to_symbol[src[pos] as usize] = c;
            buckets[c as usize] = pos + 1;
            pos += freqs[c as usize] as usize;
            bucket_ends[c as usize] = pos;
        }

        let mut c = rank_to_symbol[0];
        for dst in output[..n].iter_mut() {
            *dst = c;
            let cu = c as usize;

            if buckets[cu] < bucket_ends[cu] {
                let r = src[buckets[cu]] as usize;
                buckets[cu] += 1;
                if r == 0 {
                    continue;
                }
                rank_to_symbol.copy_within(1..=r, 0);
                rank_to_symbol[r] = c;
                c = rank_to_symbol[0];
            } else {
                // Symbol exhausted: drop it from the list.
                if nb_symbols == 0 {
                    continue;
                }
                nb_symbols -= 1;
                rank_to_symbol.copy_within(1..=nb_symbols, 0);
                c = rank_to_symbol[0];
            }
        }

        trace!(len = n, "srt inverse");
        Ok(n)
    }

    fn max_encoded_len(&self, len: usize) -> usize {
        if len == 0 { 0 } else { len + SRT_HEADER_SIZE }
    }

    fn max_decoded_len(&self, len: usize) -> usize {
        len.saturating_sub(SRT_HEADER_SIZE)
    }
}
