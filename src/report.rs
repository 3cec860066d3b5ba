//! Run verification and the one-line report format.
//!
//! The checksum is a plain sum over the final output buffer, computed only
//! after every worker has joined. It exists for two reasons: repeated runs
//! with identical inputs must agree exactly, and the compiler must not be
//! able to discard the kernel work as dead code. It is not a statistical
//! validation. Summing after the join (rather than accumulating inside the
//! parallel phase) keeps the reduction in one fixed order and avoids
//! inventing write-write dependencies between workers.

use std::fmt;
use std::time::Duration;

/// Sum of all elements, left to right.
///
/// One canonical order so the result is bit-for-bit reproducible for a
/// given buffer.
#[inline]
pub fn checksum(y: &[f64]) -> f64 {
    y.iter().sum()
}

/// Result of one successful harness run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunReport {
    /// Domain size.
    pub n: usize,
    /// Worker threads used.
    pub workers: usize,
    /// Kernel repetitions per worker.
    pub reps: u64,
    /// Wall-clock time for spawn through join.
    pub elapsed: Duration,
    /// Sum over the final output buffer.
    pub checksum: f64,
}

impl RunReport {
    /// The machine-parseable report line, without trailing newline:
    /// `n=<N> threads=<W> reps=<R> time=<secs> checksum=<sum>`.
    pub fn line(&self) -> String {
        format!(
            "n={} threads={} reps={} time={:.6} checksum={:.6}",
            self.n,
            self.workers,
            self.reps,
            self.elapsed.as_secs_f64(),
            self.checksum
        )
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line())
    }
}
