//! Unchecked cell access over a read/write buffer pair.
//!
//! The kernels index through [`CellAccess`] so the same loop body compiles
//! against either borrowed slices ([`NoAlias`]) or raw pointers
//! ([`MayAlias`]). Neither checks bounds per access.

use cachediff_core::Cell;

/// Unchecked loads and stores on a current/next buffer pair.
///
/// # Safety
///
/// Every method requires `i` to be below the cell count of both buffers.
pub trait CellAccess {
    /// Read cell `i` of the current buffer.
    ///
    /// # Safety
    ///
    /// `i` must be in bounds.
    unsafe fn current(&self, i: usize) -> Cell;

    /// Read cell `i` of the next buffer.
    ///
    /// # Safety
    ///
    /// `i` must be in bounds.
    unsafe fn next(&self, i: usize) -> Cell;

    /// Overwrite cell `i` of the next buffer.
    ///
    /// # Safety
    ///
    /// `i` must be in bounds.
    unsafe fn set_next(&mut self, i: usize, value: Cell);

    /// Add `value` into cell `i` of the next buffer.
    ///
    /// # Safety
    ///
    /// `i` must be in bounds.
    #[inline(always)]
    unsafe fn add_next(&mut self, i: usize, value: Cell) {
        // SAFETY: forwarded bounds obligation.
        unsafe {
            let old = self.next(i);
            self.set_next(i, old + value);
        }
    }
}

/// Borrowed buffers. `&[Cell]` and `&mut [Cell]` cannot overlap, and the
/// compiler is free to optimise on that.
#[derive(Debug)]
pub struct NoAlias<'a> {
    read: &'a [Cell],
    write: &'a mut [Cell],
}

impl<'a> NoAlias<'a> {
    /// Wrap a read and a write buffer.
    pub fn new(read: &'a [Cell], write: &'a mut [Cell]) -> Self {
        Self { read, write }
    }
}

impl CellAccess for NoAlias<'_> {
    #[inline(always)]
    unsafe fn current(&self, i: usize) -> Cell {
        // SAFETY: caller guarantees `i < read.len()`.
        unsafe { *self.read.get_unchecked(i) }
    }

    #[inline(always)]
    unsafe fn next(&self, i: usize) -> Cell {
        // SAFETY: caller guarantees `i < write.len()`.
        unsafe { *self.write.get_unchecked(i) }
    }

    #[inline(always)]
    unsafe fn set_next(&mut self, i: usize, value: Cell) {
        // SAFETY: caller guarantees `i < write.len()`.
        unsafe { *self.write.get_unchecked_mut(i) = value }
    }
}

/// Raw buffer pointers. The compiler must assume a store through `write`
/// may change what `read` sees.
#[derive(Debug)]
pub struct MayAlias {
    read: *const Cell,
    write: *mut Cell,
}

impl MayAlias {
    /// Wrap raw pointers to cell 0 of the read and write buffers.
    ///
    /// # Safety
    ///
    /// Both pointers must be valid for the cell count the kernel will
    /// index, `read` for reads and `write` for reads and writes, for as
    /// long as the returned value is used. The buffers must not overlap.
    /// Nothing checks this.
    pub unsafe fn new(read: *const Cell, write: *mut Cell) -> Self {
        Self { read, write }
    }
}

impl CellAccess for MayAlias {
    #[inline(always)]
    unsafe fn current(&self, i: usize) -> Cell {
        // SAFETY: caller guarantees `i` is in bounds of the read buffer.
        unsafe { self.read.add(i).read() }
    }

    #[inline(always)]
    unsafe fn next(&self, i: usize) -> Cell {
        // SAFETY: caller guarantees `i` is in bounds of the write buffer.
        unsafe { self.write.add(i).read() }
    }

    #[inline(always)]
    unsafe fn set_next(&mut self, i: usize, value: Cell) {
        // SAFETY: caller guarantees `i` is in bounds of the write buffer.
        unsafe { self.write.add(i).write(value) }
    }
}
