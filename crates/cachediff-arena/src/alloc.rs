//! The allocator seam used for every simulation buffer.
//!
//! Production runs use [`SystemAllocator`]. Tests substitute wrappers that
//! fail on demand or count live allocations.

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::ptr::NonNull;

/// Alignment of every buffer base, in bytes.
///
/// With both bases on a cache-line boundary, the offset padding alone
/// decides how buffer B's cells sit relative to buffer A's.
pub const CACHE_LINE_BYTES: usize = 64;

/// Source of zero-filled memory blocks for cell buffers.
///
/// # Safety
///
/// A `Some(ptr)` returned by [`allocate_zeroed`](Self::allocate_zeroed)
/// must point to `layout.size()` zeroed bytes aligned to `layout.align()`,
/// valid until passed to [`deallocate`](Self::deallocate). Buffer code
/// builds `&[f32]` slices over that memory without further checks.
pub unsafe trait CellAllocator {
    /// Allocate a zero-filled block, or return `None` on failure.
    ///
    /// `layout` always has a non-zero size.
    fn allocate_zeroed(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Return a block to the allocator.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate_zeroed` on this
    /// allocator with the same `layout`, and must not be used afterwards.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

// SAFETY: forwards to the referenced allocator, which upholds the contract.
unsafe impl<T: CellAllocator + ?Sized> CellAllocator for &T {
    fn allocate_zeroed(&self, layout: Layout) -> Option<NonNull<u8>> {
        (**self).allocate_zeroed(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: the caller's obligations pass through unchanged.
        unsafe { (**self).deallocate(ptr, layout) }
    }
}

/// The global Rust allocator.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemAllocator;

// SAFETY: `alloc_zeroed` returns zeroed memory satisfying `layout`, or null.
unsafe impl CellAllocator for SystemAllocator {
    fn allocate_zeroed(&self, layout: Layout) -> Option<NonNull<u8>> {
        if layout.size() == 0 {
            return None;
        }
        // SAFETY: layout has a non-zero size (checked above).
        NonNull::new(unsafe { std::alloc::alloc_zeroed(layout) })
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: the caller guarantees `ptr` came from `alloc_zeroed`
        // with this `layout`.
        unsafe { std::alloc::dealloc(ptr.as_ptr(), layout) }
    }
}
