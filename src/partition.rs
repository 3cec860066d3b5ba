//! Static domain partitioning.
//!
//! Splits an index domain `[0, n)` into exactly `workers` contiguous,
//! non-overlapping, gap-free half-open ranges. Each worker owns exactly one
//! partition for the whole run; there is no work stealing and no rebalancing.
//!
//! ## Split Rule
//!
//! With `base = n / workers` and `rem = n % workers`, the first `rem`
//! partitions receive `base + 1` elements and the remaining `workers - rem`
//! receive `base`. Consequences:
//!
//! - **Cover**: the union of all partitions is exactly `[0, n)`.
//! - **Balance**: largest and smallest partition differ by at most 1 element.
//! - **Determinism**: the same `(n, workers)` always yields the same ranges,
//!   so repeated runs assign identical index sets to identical worker ids.
//!
//! ## Empty Partitions
//!
//! `workers > n` is legal: the trailing `workers - n` partitions come out
//! empty (`start == end`). The coordinator still launches a worker for each
//! of them; the kernel sees an empty slice and does nothing. Choosing a
//! sensible worker count is the caller's job.
//!
//! ## Span Convention
//!
//! All ranges are half-open `[start, end)`. `end` of partition `i` equals
//! `start` of partition `i + 1` by construction.

/// A contiguous half-open index range `[start, end)` owned by one worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Partition {
    /// First index in the range.
    pub start: usize,
    /// One past the last index in the range.
    pub end: usize,
}

impl Partition {
    /// Number of elements in the range.
    #[inline]
    pub fn len(&self) -> usize {
        // Invariant: start <= end by construction in EvenSplit
        self.end - self.start
    }

    /// True if the range contains no elements (`start == end`).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Iterator emitting the even split of `[0, n)` into `workers` partitions.
///
/// O(1) per step with a handful of integer ops; the kernel loop dominates.
///
/// # Panics
/// `new` panics if `workers == 0`. The harness validates worker count before
/// partitioning, so hitting this assert means a caller bypassed validation.
pub struct EvenSplit {
    /// Per-partition base length (`n / workers`).
    base: usize,
    /// Number of leading partitions that get one extra element (`n % workers`).
    rem: usize,
    /// Partitions emitted so far.
    emitted: usize,
    /// Total partitions to emit.
    workers: usize,
    /// Start index of the next partition.
    offset: usize,
}

impl EvenSplit {
    /// Create the split of `n` elements across `workers` partitions.
    pub fn new(n: usize, workers: usize) -> Self {
        assert!(workers > 0, "workers must be > 0");
        Self {
            base: n / workers,
            rem: n % workers,
            emitted: 0,
            workers,
            offset: 0,
        }
    }
}

impl Iterator for EvenSplit {
    type Item = Partition;

    #[inline]
    fn next(&mut self) -> Option<Partition> {
        if self.emitted == self.workers {
            return None;
        }

        let extra = usize::from(self.emitted < self.rem);
        let start = self.offset;
        let end = start + self.base + extra;

        self.emitted += 1;
        self.offset = end;

        Some(Partition { start, end })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.workers - self.emitted;
        (left, Some(left))
    }
}

impl ExactSizeIterator for EvenSplit {}

/// Collect the even split of `[0, n)` into a `Vec` of exactly `workers`
/// partitions.
///
/// # Panics
/// Panics if `workers == 0` (see [`EvenSplit::new`]).
pub fn partition_even(n: usize, workers: usize) -> Vec<Partition> {
    let parts: Vec<Partition> = EvenSplit::new(n, workers).collect();

    debug_assert_eq!(parts.len(), workers);
    debug_assert_eq!(parts.last().map(|p| p.end), Some(n));

    parts
}
