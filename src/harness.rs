//! Execution coordinator: one run, W workers, one join barrier.
//!
//! # Architecture
//!
//! ```text
//!   RunConfig ──validate──► EvenSplit ──► [Partition; W]
//!                                              │
//!                     y.split_at_mut per part  │  one scoped thread each
//!                                              ▼
//!        worker 0: kernel.apply(x[p0], y[p0], reps)
//!        worker 1: kernel.apply(x[p1], y[p1], reps)
//!        ...
//!                                              │
//!                         join-all ◄───────────┘
//!                                              │
//!                                              ▼
//!                              caller reads y, computes checksum
//! ```
//!
//! # Correctness Invariants
//!
//! - **Disjoint writes**: each worker's mutable view of `y` is carved out
//!   with `split_at_mut`, so the borrow checker proves no two workers can
//!   write the same index. `x` is shared read-only. No locks, no atomics.
//! - **Join-all barrier**: `execute` returns only after every spawned worker
//!   has finished its full range (all `reps` passes). Scoped threads give
//!   the happens-before edge, so all worker writes are visible to the
//!   caller afterwards.
//! - **Fail-fatal**: a worker that cannot be spawned or that panics aborts
//!   the run. `y` is undefined after a failed run and must not be used for
//!   a checksum. There is no retry; this is a measurement tool, and
//!   silently reporting numbers over a partially written buffer is worse
//!   than aborting.
//!
//! # Timing
//!
//! The returned duration covers spawn through join, measured with
//! `Instant` (monotonic). Validation, partitioning, and buffer allocation
//! sit outside the timed window.

use crate::buffer::AlignedBuf;
use crate::kernel::Kernel;
use crate::partition::partition_even;
use crate::report::{checksum, RunReport};

use std::fmt;
use std::io;
use std::thread;
use std::time::{Duration, Instant};

// ============================================================================
// Configuration
// ============================================================================

/// Parameters for one harness run.
///
/// `workers > n` is legal: the trailing partitions are empty and their
/// workers are spawned anyway as no-ops. Excess workers buy nothing but
/// thread-creation overhead; picking a sensible count is the caller's job.
#[derive(Clone, Copy, Debug)]
pub struct RunConfig {
    /// Domain size: total elements to process.
    pub n: usize,
    /// Number of worker threads; every worker gets exactly one partition.
    pub workers: usize,
    /// Kernel repetitions per worker over its partition. Amplifies compute
    /// per element for measurement stability; the checksum depends on it.
    pub reps: u64,
}

impl RunConfig {
    /// Validate the configuration.
    ///
    /// Rejected before any thread or buffer work happens, so a bad config
    /// never leaves partial state behind.
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.workers == 0 {
            return Err(HarnessError::InvalidConfig("workers must be >= 1"));
        }
        if self.reps == 0 {
            return Err(HarnessError::InvalidConfig("reps must be >= 1"));
        }
        Ok(())
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors from a harness run. All of them are fatal to the run.
#[derive(Debug)]
pub enum HarnessError {
    /// Configuration rejected before any concurrent resource was created.
    InvalidConfig(&'static str),
    /// Buffer lengths disagree with the configured domain size.
    BufferMismatch {
        n: usize,
        x_len: usize,
        y_len: usize,
    },
    /// A worker thread could not be created. Part of the output buffer
    /// would stay unwritten, so the run cannot proceed.
    Spawn(io::Error),
    /// A worker panicked mid-run; the output buffer is undefined.
    WorkerPanicked {
        /// Index of the first worker observed to have panicked.
        worker: usize,
    },
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarnessError::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            HarnessError::BufferMismatch { n, x_len, y_len } => write!(
                f,
                "buffer length mismatch: n={n} but x.len()={x_len}, y.len()={y_len}"
            ),
            HarnessError::Spawn(e) => write!(f, "failed to spawn worker thread: {e}"),
            HarnessError::WorkerPanicked { worker } => {
                write!(f, "worker {worker} panicked; output buffer is undefined")
            }
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HarnessError::Spawn(e) => Some(e),
            _ => None,
        }
    }
}

// ============================================================================
// Execution
// ============================================================================

/// Run `kernel` over `x`/`y` with `config.workers` parallel workers.
///
/// On success `y` holds the fully updated result and the returned duration
/// covers spawn through join. On error `y` is undefined.
///
/// # Errors
/// - [`HarnessError::InvalidConfig`] for `workers == 0` or `reps == 0`.
/// - [`HarnessError::BufferMismatch`] if either buffer length differs
///   from `config.n`.
/// - [`HarnessError::Spawn`] if a worker thread cannot be created.
/// - [`HarnessError::WorkerPanicked`] if any worker panics.
pub fn execute<K: Kernel + ?Sized>(
    config: &RunConfig,
    kernel: &K,
    x: &AlignedBuf,
    y: &mut AlignedBuf,
) -> Result<Duration, HarnessError> {
    config.validate()?;
    if x.len() != config.n || y.len() != config.n {
        return Err(HarnessError::BufferMismatch {
            n: config.n,
            x_len: x.len(),
            y_len: y.len(),
        });
    }

    let parts = partition_even(config.n, config.workers);
    let reps = config.reps;
    let x: &[f64] = x.as_slice();

    let mut spawn_err: Option<io::Error> = None;
    let mut panicked: Option<usize> = None;

    let start = Instant::now();

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(parts.len());
        let mut tail: &mut [f64] = y.as_mut_slice();

        for (worker, part) in parts.iter().enumerate() {
            // Carve this worker's exclusive output view off the front of
            // the remaining buffer. Partitions are emitted in order, so the
            // split offsets line up with part.start/part.end. mem::take
            // moves the slice out so `own` keeps the full buffer lifetime.
            let (own, rest) = std::mem::take(&mut tail).split_at_mut(part.len());
            tail = rest;
            let xs = &x[part.start..part.end];

            let spawned = thread::Builder::new()
                .name(format!("parbench-worker-{worker}"))
                .spawn_scoped(scope, move || kernel.apply(xs, own, reps));

            match spawned {
                Ok(h) => handles.push((worker, h)),
                Err(e) => {
                    // Stop launching; workers already running finish their
                    // own ranges and are joined below, then the run fails.
                    spawn_err = Some(e);
                    break;
                }
            }
        }

        for (worker, h) in handles {
            if h.join().is_err() && panicked.is_none() {
                panicked = Some(worker);
            }
        }
    });

    let elapsed = start.elapsed();

    if let Some(e) = spawn_err {
        return Err(HarnessError::Spawn(e));
    }
    if let Some(worker) = panicked {
        return Err(HarnessError::WorkerPanicked { worker });
    }

    Ok(elapsed)
}

/// [`execute`], then checksum the final buffer into a [`RunReport`].
///
/// The checksum is a plain sum over `y` computed after the join barrier,
/// never accumulated during the parallel phase.
pub fn run<K: Kernel + ?Sized>(
    config: &RunConfig,
    kernel: &K,
    x: &AlignedBuf,
    y: &mut AlignedBuf,
) -> Result<RunReport, HarnessError> {
    let elapsed = execute(config, kernel, x, y)?;
    Ok(RunReport {
        n: config.n,
        workers: config.workers,
        reps: config.reps,
        elapsed,
        checksum: checksum(y.as_slice()),
    })
}
