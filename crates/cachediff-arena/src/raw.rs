//! A single owned cell buffer with optional leading padding.
//!
//! [`CellBuffer`] keeps the allocation base and layout alongside the
//! logical start of its cells. Views and raw pointers are always derived
//! from `base + padding`; release always hands back `base`.

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::ptr::NonNull;

use cachediff_core::{Cell, CELL_BYTES};

use crate::alloc::{CellAllocator, CACHE_LINE_BYTES};
use crate::error::{AllocationError, BufferId};

/// An owned run of `len` cells starting `padding` bytes past an allocation
/// base. Released to its allocator on drop.
pub(crate) struct CellBuffer<A: CellAllocator> {
    base: NonNull<u8>,
    layout: Layout,
    padding: usize,
    len: usize,
    alloc: A,
}

impl<A: CellAllocator> CellBuffer<A> {
    /// Allocate `len` zeroed cells behind `padding` bytes of leading space.
    pub(crate) fn allocate(
        alloc: A,
        id: BufferId,
        len: usize,
        padding: usize,
    ) -> Result<Self, AllocationError> {
        if padding % CELL_BYTES != 0 {
            return Err(AllocationError::MisalignedPadding {
                padding_bytes: padding,
            });
        }
        let overflow = AllocationError::LayoutOverflow {
            buffer: id,
            cells: len,
            padding_bytes: padding,
        };
        let size = len
            .checked_mul(CELL_BYTES)
            .and_then(|bytes| bytes.checked_add(padding))
            .ok_or_else(|| overflow.clone())?;
        let layout = Layout::from_size_align(size, CACHE_LINE_BYTES).map_err(|_| overflow)?;

        let base = alloc
            .allocate_zeroed(layout)
            .ok_or(AllocationError::OutOfMemory {
                buffer: id,
                requested_bytes: size,
            })?;

        Ok(Self {
            base,
            layout,
            padding,
            len,
            alloc,
        })
    }

    /// Number of logical cells.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Leading padding in bytes.
    pub(crate) fn padding(&self) -> usize {
        self.padding
    }

    /// Bytes reserved from the allocator, padding included.
    pub(crate) fn reserved_bytes(&self) -> usize {
        self.layout.size()
    }

    /// Pointer to cell 0.
    fn start(&self) -> NonNull<Cell> {
        // SAFETY: `padding <= layout.size()` by construction, so the result
        // stays inside the allocation and is non-null.
        unsafe { self.base.add(self.padding).cast::<Cell>() }
    }

    /// Address of cell 0.
    pub(crate) fn start_addr(&self) -> usize {
        self.start().as_ptr() as usize
    }

    pub(crate) fn as_ptr(&self) -> *const Cell {
        self.start().as_ptr()
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut Cell {
        self.start().as_ptr()
    }

    pub(crate) fn as_slice(&self) -> &[Cell] {
        // SAFETY: `base` is cache-line aligned and `padding` is a multiple
        // of the cell size, so `start()` is aligned for `Cell`. The block
        // holds `padding + len * CELL_BYTES` bytes, zero-filled at
        // allocation and only ever written as cells since. The shared
        // borrow of `self` prevents concurrent mutation.
        unsafe { std::slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Cell] {
        // SAFETY: as in `as_slice`; the exclusive borrow of `self` makes
        // this the only live view of the cells.
        unsafe { std::slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }
}

impl<A: CellAllocator> Drop for CellBuffer<A> {
    fn drop(&mut self) {
        // SAFETY: `base` and `layout` are exactly what `alloc` returned in
        // `allocate`, and drop runs once.
        unsafe { self.alloc.deallocate(self.base, self.layout) }
    }
}

impl<A: CellAllocator> std::fmt::Debug for CellBuffer<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellBuffer")
            .field("base", &self.base)
            .field("padding", &self.padding)
            .field("len", &self.len)
            .finish()
    }
}
