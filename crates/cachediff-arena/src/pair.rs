//! The read/write buffer pair.
//!
//! [`BufferPair`] owns buffers A and B and tracks which of them is the
//! read ("current") buffer. The lifecycle of a run is:
//!
//! 1. [`BufferPair::allocate_in`] reserves both buffers (B padded).
//! 2. [`BufferPair::initialize`] zero-fills both and seeds buffer A.
//! 3. Per iteration, the kernel reads [`read_write`](BufferPair::read_write)
//!    and the driver calls [`swap`](BufferPair::swap), an O(1) role flip.
//! 4. [`BufferPair::release`] (or drop) returns both blocks from their
//!    allocation bases.

use cachediff_core::Cell;

use crate::alloc::{CellAllocator, SystemAllocator};
use crate::error::{AllocationError, BufferId};
use crate::raw::CellBuffer;

/// Two equally sized cell buffers that alternate read and write roles.
///
/// The buffers are distinct allocations, so the read and write views
/// handed out by [`read_write`](Self::read_write) and
/// [`read_write_ptrs`](Self::read_write_ptrs) never overlap.
#[derive(Debug)]
pub struct BufferPair<A: CellAllocator = SystemAllocator> {
    a: CellBuffer<A>,
    b: CellBuffer<A>,
    /// Which buffer is currently read (true = A reads, B is written).
    read_is_a: bool,
}

impl BufferPair<SystemAllocator> {
    /// Allocate a pair from the global allocator.
    ///
    /// See [`allocate_in`](Self::allocate_in).
    pub fn allocate(cells: usize, padding_bytes: usize) -> Result<Self, AllocationError> {
        Self::allocate_in(SystemAllocator, cells, padding_bytes)
    }
}

impl<A: CellAllocator + Clone> BufferPair<A> {
    /// Allocate buffer A with `cells` cells and buffer B with the same
    /// number of cells behind `padding_bytes` of leading space.
    ///
    /// Both allocations are attempted before either result is inspected.
    /// If either fails, whichever succeeded is released from its base
    /// before the error is returned. When both fail, the error for
    /// buffer A is returned.
    pub fn allocate_in(
        alloc: A,
        cells: usize,
        padding_bytes: usize,
    ) -> Result<Self, AllocationError> {
        let a = CellBuffer::allocate(alloc.clone(), BufferId::A, cells, 0);
        let b = CellBuffer::allocate(alloc, BufferId::B, cells, padding_bytes);

        match (a, b) {
            (Ok(a), Ok(b)) => Ok(Self {
                a,
                b,
                read_is_a: true,
            }),
            // Dropping the surviving buffer releases it.
            (Err(e), _) | (_, Err(e)) => Err(e),
        }
    }
}

impl<A: CellAllocator> BufferPair<A> {
    /// Zero-fill both buffers and write `seed` into buffer A at
    /// `seed_offset`. Buffer A becomes the read buffer.
    ///
    /// Padding bytes are never touched.
    ///
    /// # Panics
    ///
    /// Panics if `seed_offset >= self.cell_count()`.
    pub fn initialize(&mut self, seed_offset: usize, seed: Cell) {
        self.a.as_mut_slice().fill(0.0);
        self.b.as_mut_slice().fill(0.0);
        self.a.as_mut_slice()[seed_offset] = seed;
        self.read_is_a = true;
    }

    /// Logical cells per buffer.
    pub fn cell_count(&self) -> usize {
        self.a.len()
    }

    /// Leading padding of buffer B, in bytes.
    pub fn padding_bytes(&self) -> usize {
        self.b.padding()
    }

    /// Total bytes reserved for both buffers, padding included.
    pub fn reserved_bytes(&self) -> usize {
        self.a.reserved_bytes() + self.b.reserved_bytes()
    }

    /// Whether buffer A is currently the read buffer.
    pub fn read_is_a(&self) -> bool {
        self.read_is_a
    }

    /// Which buffer is currently read.
    pub fn read_id(&self) -> BufferId {
        if self.read_is_a {
            BufferId::A
        } else {
            BufferId::B
        }
    }

    /// Start addresses of cell 0 in buffers A and B.
    pub fn start_addrs(&self) -> (usize, usize) {
        (self.a.start_addr(), self.b.start_addr())
    }

    /// The current (read) buffer.
    pub fn read(&self) -> &[Cell] {
        if self.read_is_a {
            self.a.as_slice()
        } else {
            self.b.as_slice()
        }
    }

    /// The next (write) buffer, for inspection.
    pub fn write(&self) -> &[Cell] {
        if self.read_is_a {
            self.b.as_slice()
        } else {
            self.a.as_slice()
        }
    }

    /// Buffer A regardless of role.
    pub fn buffer_a(&self) -> &[Cell] {
        self.a.as_slice()
    }

    /// Buffer B regardless of role (logical cells only, no padding).
    pub fn buffer_b(&self) -> &[Cell] {
        self.b.as_slice()
    }

    /// Borrow the read buffer shared and the write buffer exclusively.
    pub fn read_write(&mut self) -> (&[Cell], &mut [Cell]) {
        if self.read_is_a {
            (self.a.as_slice(), self.b.as_mut_slice())
        } else {
            (self.b.as_slice(), self.a.as_mut_slice())
        }
    }

    /// Raw pointers to cell 0 of the read and write buffers.
    ///
    /// The pointers address distinct allocations of
    /// [`cell_count`](Self::cell_count) cells each and stay valid while the
    /// pair is alive and not otherwise borrowed.
    pub fn read_write_ptrs(&mut self) -> (*const Cell, *mut Cell) {
        if self.read_is_a {
            (self.a.as_ptr(), self.b.as_mut_ptr())
        } else {
            (self.b.as_ptr(), self.a.as_mut_ptr())
        }
    }

    /// Exchange read and write roles. No data is copied.
    pub fn swap(&mut self) {
        self.read_is_a = !self.read_is_a;
    }

    /// Release both buffers from their allocation bases.
    ///
    /// Consuming `self` makes a second release impossible; dropping the
    /// pair has the same effect.
    pub fn release(self) {
        drop(self);
    }
}
