//! Property-based soundness tests for the partitioner and the
//! parallel/sequential equivalence of the harness.
//!
//! Run with: `cargo test --test partition_property`

use parbench::{checksum, partition_even, run, AlignedBuf, Axpy, Kernel, Partition, RunConfig};
use proptest::prelude::*;

proptest! {
    /// Partitions cover [0, n) exactly: start at 0, no gaps, no overlaps,
    /// end at n, and there are exactly `workers` of them.
    #[test]
    fn partitions_cover_domain(n in 0usize..10_000, workers in 1usize..64) {
        let parts = partition_even(n, workers);

        prop_assert_eq!(parts.len(), workers);
        prop_assert_eq!(parts[0].start, 0);
        for pair in parts.windows(2) {
            prop_assert_eq!(pair[0].end, pair[1].start);
        }
        prop_assert_eq!(parts.last().unwrap().end, n);
    }

    /// Largest and smallest partition differ by at most one element.
    #[test]
    fn partitions_are_balanced(n in 0usize..10_000, workers in 1usize..64) {
        let parts = partition_even(n, workers);
        let max = parts.iter().map(Partition::len).max().unwrap();
        let min = parts.iter().map(Partition::len).min().unwrap();
        prop_assert!(max - min <= 1, "max={} min={}", max, min);
    }

    /// Same (n, workers) always yields the same ranges.
    #[test]
    fn partitioning_is_deterministic(n in 0usize..10_000, workers in 1usize..64) {
        prop_assert_eq!(partition_even(n, workers), partition_even(n, workers));
    }

    /// Total assigned length is exactly n, and empty partitions appear only
    /// when workers > n.
    #[test]
    fn partition_lengths_sum_to_n(n in 0usize..10_000, workers in 1usize..64) {
        let parts = partition_even(n, workers);
        let total: usize = parts.iter().map(Partition::len).sum();
        prop_assert_eq!(total, n);

        let has_empty = parts.iter().any(Partition::is_empty);
        prop_assert_eq!(has_empty, workers > n);
    }

    /// A parallel run over disjoint partitions produces the same output as
    /// one sequential pass over the whole domain.
    #[test]
    fn parallel_equals_sequential(
        n in 0usize..2_000,
        workers in 1usize..9,
        reps in 1u64..5,
        a in -4.0f64..4.0,
    ) {
        let kernel = Axpy { a };
        let x_init = |i: usize| (i as f64).sin();
        let y_init = |i: usize| (i % 11) as f64;

        let x = AlignedBuf::from_fn(n, x_init).unwrap();
        let mut y = AlignedBuf::from_fn(n, y_init).unwrap();
        let config = RunConfig { n, workers, reps };
        let report = run(&config, &kernel, &x, &mut y).unwrap();

        let x_ref = AlignedBuf::from_fn(n, x_init).unwrap();
        let mut y_ref = AlignedBuf::from_fn(n, y_init).unwrap();
        kernel.apply(&x_ref, &mut y_ref, reps);

        prop_assert_eq!(y.as_slice(), y_ref.as_slice());
        prop_assert_eq!(report.checksum.to_bits(), checksum(&y_ref).to_bits());
    }
}
