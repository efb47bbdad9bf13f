//! Entry points that run a [`Kernel`] over a pair of buffers.

use cachediff_core::{Cell, Lattice};

use crate::access::{MayAlias, NoAlias};
use crate::kernel::Kernel;

/// Advance `read` into `write` by one step of kernel `K`.
///
/// The buffers are passed as borrows, so the compiler may assume they do
/// not overlap. Buffer lengths are checked once per call; the stencil
/// loop itself does no bounds checking.
///
/// # Panics
///
/// Panics if either buffer holds fewer than `lattice.cell_count()` cells.
pub fn step<L: Lattice, K: Kernel>(lattice: &L, factor: Cell, read: &[Cell], write: &mut [Cell]) {
    let cells = lattice.cell_count();
    assert!(
        read.len() >= cells && write.len() >= cells,
        "buffers hold {} and {} cells, lattice needs {cells}",
        read.len(),
        write.len(),
    );
    let mut access = NoAlias::new(read, write);
    // SAFETY: both buffers hold at least `cell_count` cells (checked above).
    unsafe { K::apply(lattice, factor, &mut access) }
}

/// Advance `read` into `write` by one step of kernel `K`, through raw
/// pointers.
///
/// This is the variant without the aliasing hint: the compiler cannot
/// assume that stores through `write` leave `read` unchanged.
///
/// # Safety
///
/// `read` and `write` must each point to `lattice.cell_count()` valid,
/// initialized cells, `write` must be writable, and the two ranges must
/// not overlap. None of this is checked.
pub unsafe fn step_raw<L: Lattice, K: Kernel>(
    lattice: &L,
    factor: Cell,
    read: *const Cell,
    write: *mut Cell,
) {
    // SAFETY: the caller upholds `MayAlias::new`'s contract.
    let mut access = unsafe { MayAlias::new(read, write) };
    // SAFETY: the caller guarantees `cell_count` cells behind each pointer.
    unsafe { K::apply(lattice, factor, &mut access) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Accumulative, Direct};
    use cachediff_core::Square2D;

    #[test]
    fn raw_and_borrowed_entry_points_agree() {
        let square = Square2D::new(6).unwrap();
        let read: Vec<Cell> = (0..36).map(|i| (i % 7) as Cell).collect();

        let mut borrowed = vec![0.0; 36];
        step::<_, Direct>(&square, 0.1, &read, &mut borrowed);

        let mut raw = vec![0.0; 36];
        // SAFETY: distinct vectors of 36 cells each.
        unsafe { step_raw::<_, Direct>(&square, 0.1, read.as_ptr(), raw.as_mut_ptr()) };

        assert_eq!(borrowed, raw);

        let mut borrowed = vec![0.0; 36];
        let mut raw = vec![0.0; 36];
        step::<_, Accumulative>(&square, 0.1, &read, &mut borrowed);
        // SAFETY: as above.
        unsafe { step_raw::<_, Accumulative>(&square, 0.1, read.as_ptr(), raw.as_mut_ptr()) };
        assert_eq!(borrowed, raw);
    }

    #[test]
    #[should_panic(expected = "lattice needs 9")]
    fn short_buffer_panics() {
        let square = Square2D::new(3).unwrap();
        let read = [0.0; 9];
        let mut write = [0.0; 8];
        step::<_, Direct>(&square, 0.1, &read, &mut write);
    }
}
