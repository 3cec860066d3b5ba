//! Parallel numeric-kernel benchmark harness.
//!
//! ## Scope
//! This crate runs a compute-bound numeric kernel (scaled vector accumulate,
//! vector add) across a configurable number of parallel workers, measures
//! wall-clock time for the parallel phase, and verifies the result with a
//! checksum over the output buffer.
//!
//! ## Key invariants
//! - The index domain is split once, statically and deterministically, into
//!   one contiguous partition per worker; no work stealing, no rebalancing.
//! - Workers write disjoint sub-ranges of the output buffer (proven via
//!   `split_at_mut`) and share the input buffer read-only, so the parallel
//!   phase needs no locks or atomics.
//! - The only synchronization point is the join-all barrier; the checksum
//!   is computed strictly after it.
//! - Any worker failure (spawn error or panic) fails the whole run; partial
//!   results are never reported.
//!
//! ## Flow (single run)
//! `RunConfig -> EvenSplit -> spawn W workers -> kernel over each partition
//! -> join all -> checksum -> RunReport`
//!
//! ## Notable entry points
//! - [`harness::run`] / [`harness::execute`]: coordinate one run.
//! - [`kernel::Kernel`]: the compute-routine seam; [`kernel::Axpy`] and
//!   [`kernel::VecAdd`] are the built-in kernels.
//! - [`buffer::AlignedBuf`]: cache-line-aligned workload buffers.
//! - [`partition::EvenSplit`]: the deterministic even split.

pub mod buffer;
pub mod harness;
pub mod kernel;
pub mod partition;
pub mod report;

pub use buffer::{AlignedBuf, BufferError, BUFFER_ALIGN};
pub use harness::{execute, run, HarnessError, RunConfig};
pub use kernel::{Axpy, Kernel, VecAdd};
pub use partition::{partition_even, EvenSplit, Partition};
pub use report::{checksum, RunReport};
