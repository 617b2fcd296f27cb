//! Shared view of a grid buffer for band-partitioned writers.
//!
//! ## Purpose
//!
//! The pipelined relaxer lets several threads update one grid in place. Each
//! thread writes only the rows of its own band, but it also reads the rows
//! adjacent to its band, which belong to its neighbors. `SharedBuffer` is the
//! single place where that aliasing is expressed.
//!
//! ## Design notes
//!
//! * **Raw pointer**: The view wraps the buffer's base pointer and borrows the
//!   slice mutably for its whole lifetime, so no safe alias can exist.
//! * **Unchecked access**: `read`/`write` are `unsafe`; callers uphold the
//!   band protocol described below.
//!
//! ## Invariants
//!
//! * A cell is written by at most one thread during the lifetime of the view.
//! * A cell written by one thread is read by another only after a
//!   Release/Acquire handoff (the relaxer's progress counters).
//!
//! ## Non-goals
//!
//! * Bounds checking beyond `debug_assert!`.

use core::marker::PhantomData;

/// Aliasable view over a mutable slice, shareable across scoped threads.
pub struct SharedBuffer<'a, T> {
    ptr: *mut T,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

// SAFETY: the view only hands out values through `read`/`write`, whose callers
// guarantee disjoint writes and synchronized cross-thread reads.
unsafe impl<T: Send> Send for SharedBuffer<'_, T> {}
unsafe impl<T: Send + Sync> Sync for SharedBuffer<'_, T> {}

impl<'a, T: Copy> SharedBuffer<'a, T> {
    /// Borrow `data` for the lifetime of the view.
    pub fn new(data: &'a mut [T]) -> Self {
        Self {
            ptr: data.as_mut_ptr(),
            len: data.len(),
            _marker: PhantomData,
        }
    }

    /// Number of elements in the view.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the view is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read element `index`.
    ///
    /// # Safety
    ///
    /// `index < len`, and no other thread may be writing this element
    /// concurrently.
    #[inline]
    pub unsafe fn read(&self, index: usize) -> T {
        debug_assert!(index < self.len);
        // SAFETY: in bounds and not concurrently written, per the caller.
        unsafe { *self.ptr.add(index) }
    }

    /// Write element `index`.
    ///
    /// # Safety
    ///
    /// `index < len`, and the calling thread must be the only one accessing
    /// this element while the write happens.
    #[inline]
    pub unsafe fn write(&self, index: usize, value: T) {
        debug_assert!(index < self.len);
        // SAFETY: in bounds and exclusively owned by the caller's band.
        unsafe { *self.ptr.add(index) = value }
    }
}
