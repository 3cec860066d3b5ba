//! Worker compute kernels.
//!
//! A kernel is the routine each worker applies to its own partition of the
//! shared buffers: read-only input `x`, exclusively owned output sub-slice
//! `y`, repeated `reps` times. Kernels are stateless apart from the buffer
//! side effects, total over their input range (an empty slice is a no-op),
//! and must be `Sync` so one instance can be shared by reference across all
//! worker threads.
//!
//! The repetition loop is a throughput amplifier: each pass re-reads the
//! output the previous pass just wrote, so `reps` passes of [`Axpy`] leave
//! `y[i] = reps * a * x[i] + y0[i]`. The passes are intentionally not
//! idempotent.

/// A compute routine applied by one worker to one partition.
pub trait Kernel: Sync {
    /// Short name for reports and CLI selection.
    fn name(&self) -> &'static str;

    /// Apply the kernel to equal-length slices, `reps` times in sequence.
    ///
    /// `x` and `y` are this worker's partition views of the shared input and
    /// output buffers. Implementations must only read `x` and only write
    /// `y`; they see nothing outside their partition.
    fn apply(&self, x: &[f64], y: &mut [f64], reps: u64);
}

/// Scaled vector accumulate: `y[i] = a * x[i] + y[i]`.
#[derive(Clone, Copy, Debug)]
pub struct Axpy {
    /// Scalar coefficient.
    pub a: f64,
}

impl Kernel for Axpy {
    fn name(&self) -> &'static str {
        "axpy"
    }

    #[inline]
    fn apply(&self, x: &[f64], y: &mut [f64], reps: u64) {
        debug_assert_eq!(x.len(), y.len());
        let a = self.a;
        for _ in 0..reps {
            for (yi, &xi) in y.iter_mut().zip(x) {
                *yi = a * xi + *yi;
            }
        }
    }
}

/// Element-wise vector add: `y[i] = x[i] + y[i]`.
///
/// Same access pattern as [`Axpy`] without the multiply; useful as a pure
/// memory-bandwidth workload.
#[derive(Clone, Copy, Debug)]
pub struct VecAdd;

impl Kernel for VecAdd {
    fn name(&self) -> &'static str {
        "vadd"
    }

    #[inline]
    fn apply(&self, x: &[f64], y: &mut [f64], reps: u64) {
        debug_assert_eq!(x.len(), y.len());
        for _ in 0..reps {
            for (yi, &xi) in y.iter_mut().zip(x) {
                *yi += xi;
            }
        }
    }
}
