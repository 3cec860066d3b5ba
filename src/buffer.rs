//! Cache-line-aligned workload buffers.
//!
//! # Scope
//! The harness owns exactly two allocations per run: the read-only input
//! buffer X and the mutable output buffer Y. Both are fixed-length `f64`
//! arrays that are never resized or reallocated mid-run. `Vec<f64>` only
//! guarantees 8-byte alignment, so we allocate through an explicit `Layout`
//! to get cache-line-aligned storage: workers write disjoint sub-ranges
//! concurrently, and a partition boundary landing mid-line is the one place
//! false sharing could creep in.
//!
//! # Invariants
//! - The allocation is 64-byte aligned and exactly `len * 8` bytes.
//! - `len == 0` is valid and performs no allocation (dangling pointer).
//! - Allocation failure is reported via [`BufferError`], not a panic; the
//!   harness treats it as fatal to the run.

use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

/// Alignment for workload buffers (one x86 cache line).
pub const BUFFER_ALIGN: usize = 64;

/// Errors from workload buffer allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// The requested layout was invalid (size overflow).
    InvalidLayout,
    /// The allocator returned null.
    OutOfMemory,
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::InvalidLayout => write!(f, "buffer layout invalid (size overflow)"),
            BufferError::OutOfMemory => write!(f, "buffer allocation failed"),
        }
    }
}

impl std::error::Error for BufferError {}

/// Fixed-length, cache-line-aligned `f64` buffer.
///
/// Derefs to `[f64]`; all element access goes through slices, so the unsafe
/// surface is confined to allocation and deallocation.
pub struct AlignedBuf {
    ptr: NonNull<f64>,
    len: usize,
}

// SAFETY: AlignedBuf is a unique owner of its allocation; sending it (or
// handing out disjoint &mut sub-slices) across threads is safe for f64.
unsafe impl Send for AlignedBuf {}
unsafe impl Sync for AlignedBuf {}

impl AlignedBuf {
    /// Allocate a zero-initialized buffer of `len` elements.
    ///
    /// # Errors
    /// - `InvalidLayout` if `len * 8` overflows.
    /// - `OutOfMemory` if the allocator returns null.
    pub fn zeroed(len: usize) -> Result<Self, BufferError> {
        if len == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                len: 0,
            });
        }

        let layout = Self::layout(len)?;

        // SAFETY: layout is valid and has non-zero size.
        let raw = unsafe { alloc_zeroed(layout) } as *mut f64;
        let ptr = NonNull::new(raw).ok_or(BufferError::OutOfMemory)?;

        Ok(Self { ptr, len })
    }

    /// Allocate a buffer of `len` elements initialized by `init(i)`.
    pub fn from_fn(len: usize, mut init: impl FnMut(usize) -> f64) -> Result<Self, BufferError> {
        let mut buf = Self::zeroed(len)?;
        for (i, slot) in buf.as_mut_slice().iter_mut().enumerate() {
            *slot = init(i);
        }
        Ok(buf)
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the buffer holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// View the buffer as a shared slice.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        // SAFETY: ptr is valid for len elements (or dangling with len 0,
        // which is a valid empty slice).
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// View the buffer as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        // SAFETY: as above; &mut self guarantees uniqueness.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    fn layout(len: usize) -> Result<Layout, BufferError> {
        let size = len
            .checked_mul(std::mem::size_of::<f64>())
            .ok_or(BufferError::InvalidLayout)?;
        Layout::from_size_align(size, BUFFER_ALIGN).map_err(|_| BufferError::InvalidLayout)
    }
}

impl Drop for AlignedBuf {
    fn drop(&mut self) {
        if self.len == 0 {
            return;
        }
        // Invariant: a non-empty buffer was allocated with exactly this layout.
        let layout = Self::layout(self.len).expect("layout was valid at alloc time");
        // SAFETY: ptr came from alloc_zeroed with the same layout.
        unsafe { dealloc(self.ptr.as_ptr() as *mut u8, layout) };
    }
}

impl Deref for AlignedBuf {
    type Target = [f64];

    #[inline]
    fn deref(&self) -> &[f64] {
        self.as_slice()
    }
}

impl DerefMut for AlignedBuf {
    #[inline]
    fn deref_mut(&mut self) -> &mut [f64] {
        self.as_mut_slice()
    }
}

impl fmt::Debug for AlignedBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlignedBuf").field("len", &self.len).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_is_aligned_and_zero() {
        let buf = AlignedBuf::zeroed(1000).unwrap();
        assert_eq!(buf.len(), 1000);
        assert_eq!(buf.as_slice().as_ptr() as usize % BUFFER_ALIGN, 0);
        assert!(buf.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn from_fn_initializes_each_element() {
        let buf = AlignedBuf::from_fn(8, |i| i as f64 * 0.5).unwrap();
        assert_eq!(buf[0], 0.0);
        assert_eq!(buf[3], 1.5);
        assert_eq!(buf[7], 3.5);
    }

    #[test]
    fn zero_length_allocates_nothing() {
        let buf = AlignedBuf::zeroed(0).unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.as_slice(), &[] as &[f64]);
    }

    #[test]
    fn writes_survive_round_trip() {
        let mut buf = AlignedBuf::zeroed(16).unwrap();
        buf[5] = 2.5;
        buf[15] = -1.0;
        assert_eq!(buf[5], 2.5);
        assert_eq!(buf[15], -1.0);
        assert_eq!(buf[0], 0.0);
    }

    #[test]
    fn oversized_request_is_invalid_layout() {
        let err = AlignedBuf::zeroed(usize::MAX / 2).unwrap_err();
        // Either the element-count multiply overflows or Layout rejects the
        // size; both surface as InvalidLayout before touching the allocator.
        assert_eq!(err, BufferError::InvalidLayout);
    }
}
