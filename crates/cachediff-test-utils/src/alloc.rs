//! A counting, failure-injecting allocator.

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use cachediff_arena::{CellAllocator, SystemAllocator};

#[derive(Debug, Default)]
struct Counters {
    attempts: AtomicUsize,
    allocations: AtomicUsize,
    deallocations: AtomicUsize,
    live: AtomicUsize,
}

/// Wraps [`SystemAllocator`], counting blocks and failing the allocation
/// attempts whose zero-based index is listed in `fail_on`.
///
/// Clones share their counters, so a clone handed to a run can be
/// inspected afterwards through the original.
#[derive(Clone, Debug, Default)]
pub struct CountingAllocator {
    counters: Arc<Counters>,
    fail_on: Arc<[usize]>,
}

impl CountingAllocator {
    /// An allocator that never fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// An allocator that fails the listed attempts (0 = first).
    ///
    /// A buffer pair attempts A first and B second.
    pub fn failing_on(attempts: &[usize]) -> Self {
        Self {
            counters: Arc::default(),
            fail_on: attempts.into(),
        }
    }

    /// Allocation attempts so far, failed ones included.
    pub fn attempts(&self) -> usize {
        self.counters.attempts.load(Ordering::SeqCst)
    }

    /// Successful allocations so far.
    pub fn allocations(&self) -> usize {
        self.counters.allocations.load(Ordering::SeqCst)
    }

    /// Deallocations so far.
    pub fn deallocations(&self) -> usize {
        self.counters.deallocations.load(Ordering::SeqCst)
    }

    /// Blocks currently held.
    pub fn live(&self) -> usize {
        self.counters.live.load(Ordering::SeqCst)
    }
}

// SAFETY: successful allocations come straight from `SystemAllocator`,
// and deallocation forwards to it unchanged.
unsafe impl CellAllocator for CountingAllocator {
    fn allocate_zeroed(&self, layout: Layout) -> Option<NonNull<u8>> {
        let attempt = self.counters.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_on.contains(&attempt) {
            return None;
        }
        let ptr = SystemAllocator.allocate_zeroed(layout)?;
        self.counters.allocations.fetch_add(1, Ordering::SeqCst);
        self.counters.live.fetch_add(1, Ordering::SeqCst);
        Some(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.counters.deallocations.fetch_add(1, Ordering::SeqCst);
        self.counters.live.fetch_sub(1, Ordering::SeqCst);
        // SAFETY: `ptr` came from `SystemAllocator` with this `layout`.
        unsafe { SystemAllocator.deallocate(ptr, layout) }
    }
}
