//! Rotation sorting by cyclic prefix doubling.
//!
//! After round `k` every rotation carries a rank that orders it by its first
//! `2k` bytes. Each round is two counting sorts over the previous ranks, so a
//! block of `n` bytes is sorted in `O(n log n)` time with five reusable
//! 32-bit arrays.
//!
//! Rotations that are byte-for-byte identical (periodic blocks) end up with
//! equal ranks; a final counting pass visits offsets in ascending order so
//! that ties are broken by rotation start.

use tracing::debug;

/// Reusable scratch storage for sorting the rotations of a block.
#[derive(Debug, Default)]
pub(crate) struct RotationSorter {
    sa: Vec<u32>,
    shifted: Vec<u32>,
    rank: Vec<u32>,
    next_rank: Vec<u32>,
    counts: Vec<u32>,
}

impl RotationSorter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Largest block the scratch arrays can hold without reallocating.
    pub(crate) fn capacity(&self) -> usize {
        self.sa.len()
    }

    fn reserve(&mut self, n: usize) {
        if self.sa.len() >= n {
            return;
        }

        debug!(
            from = self.sa.len(),
            to = n,
            "growing rotation sort scratch"
        );
        self.sa.resize(n, 0);
        self.shifted.resize(n, 0);
        self.rank.resize(n, 0);
        self.next_rank.resize(n, 0);
        self.counts.resize(n.max(256), 0);
    }

    /// Sort the rotations of `data`.
    ///
    /// Returns the rotation start offsets in ascending rotation order, ties
    /// broken by offset. `data.len()` must fit in a `u32`.
    pub(crate) fn sort(&mut self, data: &[u8]) -> &[u32] {
        let n = data.len();
        if n == 0 {
            return &[];
        }
        self.reserve(n);

        let sa = &mut self.sa[..n];
        let shifted = &mut self.shifted[..n];
        let mut rank = &mut self.rank[..n];
        let mut next_rank = &mut self.next_rank[..n];
        let counts = &mut self.counts[..];

        // Round 0: bucket by first byte, offsets ascending within a bucket.
        let buckets = &mut counts[..256];
        buckets.fill(0);
        for &b in data {
            buckets[b as usize] += 1;
        }
        exclusive_prefix_sum(buckets);
        for (i, &b) in data.iter().enumerate() {
            let slot = &mut buckets[b as usize];
            sa[*slot as usize] = i as u32;
            *slot += 1;
        }

        let mut class = 0u32;
        rank[sa[0] as usize] = 0;
        for j in 1..n {
            if data[sa[j] as usize] != data[sa[j - 1] as usize] {
                class += 1;
            }
            rank[sa[j] as usize] = class;
        }
        let mut classes = class as usize + 1;

        let mut k = 1usize;
        while classes < n && k < n {
            // Order by second half: rotation i - k sorts with rotation i.
            for (dst, &start) in shifted.iter_mut().zip(sa.iter()) {
                let start = start as usize;
                let prev = if start >= k { start - k } else { start + n - k };
                *dst = prev as u32;
            }

            // Stable counting sort by first half.
            let buckets = &mut counts[..classes];
            buckets.fill(0);
            for &i in shifted.iter() {
                buckets[rank[i as usize] as usize] += 1;
            }
            exclusive_prefix_sum(buckets);
            for &i in shifted.iter() {
                let slot = &mut buckets[rank[i as usize] as usize];
                sa[*slot as usize] = i;
                *slot += 1;
            }

            let mut class = 0u32;
            next_rank[sa[0] as usize] = 0;
            for j in 1..n {
                let cur = sa[j] as usize;
                let prev = sa[j - 1] as usize;
                if rank[cur] != rank[prev] || rank[wrap(cur + k, n)] != rank[wrap(prev + k, n)] {
                    class += 1;
                }
                next_rank[cur] = class;
            }

            std::mem::swap(&mut rank, &mut next_rank);
            classes = class as usize + 1;
            k <<= 1;
        }

        if classes < n {
            let buckets = &mut counts[..classes];
            buckets.fill(0);
            for &r in rank.iter() {
                buckets[r as usize] += 1;
            }
            exclusive_prefix_sum(buckets);
            for (i, &r) in rank.iter().enumerate() {
                let slot = &mut buckets[r as usize];
                sa[*slot as usize] = i as u32;
                *slot += 1;
            }
        }

        &self.sa[..n]
    }
}

#[inline]
fn wrap(pos: usize, n: usize) -> usize {
    if pos >= n { pos - n } else { pos }
}

/// Replace each count with the sum of the counts before it.
fn exclusive_prefix_sum(counts: &mut [u32]) {
    let mut sum = 0u32;
    for count in counts.iter_mut() {
        sum += std::mem::replace(count, sum);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_order(data: &[u8]) -> Vec<u32> {
        let n = data.len();
        let mut order: Vec<u32> = (0..n as u32).collect();
        order.sort_by(|&a, &b| {
            let ra = (0..n).map(|i| data[(a as usize + i) % n]);
            let rb = (0..n).map(|i| data[(b as usize + i) % n]);
            ra.cmp(rb).then(a.cmp(&b))
        });
        order
    }

    #[test]
    fn test_sort_empty_and_single() {
        let mut sorter = RotationSorter::new();
        assert!(sorter.sort(b"").is_empty());
        assert_eq!(sorter.sort(b"x"), &[0]);
    }

    #[test]
    fn test_sort_banana() {
        let mut sorter = RotationSorter::new();
        // abanan, anaban, ananab, banana, nabana, nanaba
        assert_eq!(sorter.sort(b"banana"), &[5, 3, 1, 0, 4, 2]);
    }

    #[test]
    fn test_identical_rotations_ordered_by_offset() {
        let mut sorter = RotationSorter::new();
        assert_eq!(sorter.sort(b"abab"), &[0, 2, 1, 3]);
        assert_eq!(sorter.sort(b"zzzz"), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_matches_naive_order() {
        let mut sorter = RotationSorter::new();
        let cases: [&[u8]; 6] = [
            b"mississippi",
            b"abracadabra",
            b"aaaaaaaab",
            b"abcabcabcabc",
            b"\xff\x00\xff\x00\x80",
            b"the quick brown fox jumps over the lazy dog",
        ];
        for data in cases {
            assert_eq!(sorter.sort(data), naive_order(data).as_slice(), "{data:?}");
        }
    }

    #[test]
    fn test_scratch_reused() {
        let mut sorter = RotationSorter::new();
        sorter.sort(&[7u8; 300]);
        assert_eq!(sorter.capacity(), 300);
        sorter.sort(b"short");
        assert_eq!(sorter.capacity(), 300);
        assert_eq!(sorter.sort(b"short"), naive_order(b"short").as_slice());
    }
}
