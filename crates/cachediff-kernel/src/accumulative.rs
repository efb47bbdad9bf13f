//! Scatter-form diffusion step.

use cachediff_core::{Cell, KernelVariant, Lattice};

use crate::access::CellAccess;
use crate::kernel::Kernel;

/// Adds each interior cell's contributions into `next`:
///
/// ```text
/// next[c] += current[c] − current[c] * 2N * factor
/// next[n] += current[c] * factor        for each neighbour n of c
/// ```
///
/// Contributions that would land on a boundary cell are absorbed, so the
/// boundary stays at zero.
///
/// This rule reads and adds into `next` and never clears it. It matches
/// [`Direct`](crate::Direct) only when `next` is all zeros at the start of
/// the call. Under plain double buffering that holds for the first
/// iteration only: from the second iteration on, the write buffer still
/// holds the state from two steps earlier and the result includes it.
/// The driver keeps this behaviour as is.
#[derive(Clone, Copy, Debug, Default)]
pub struct Accumulative;

impl Kernel for Accumulative {
    const VARIANT: KernelVariant = KernelVariant::Accumulative;

    #[inline(always)]
    unsafe fn apply<L: Lattice, C: CellAccess>(lattice: &L, factor: Cell, cells: &mut C) {
        let strides = lattice.strides();
        let weight = L::NEIGHBOURS as Cell;
        let last = lattice.extent() - 1;

        lattice.for_each_interior(|i, coord| {
            // SAFETY: `i` is interior, and each neighbour write is guarded
            // to land on an interior cell.
            unsafe {
                let centre = cells.current(i);
                cells.add_next(i, centre - centre * weight * factor);
                let share = centre * factor;
                for (&a, &stride) in coord.as_ref().iter().zip(strides.as_ref()) {
                    if a + 1 < last {
                        cells.add_next(i + stride, share);
                    }
                    if a > 1 {
                        cells.add_next(i - stride, share);
                    }
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direct::Direct;
    use crate::step::step;
    use cachediff_core::{Cube3D, Line1D, Square2D};
    use proptest::prelude::*;

    #[test]
    fn line_of_five_matches_direct_from_zeroed_next() {
        let line = Line1D::new(5).unwrap();
        let read = [0.0, 0.0, 1000.0, 0.0, 0.0];
        let mut write = [0.0; 5];
        step::<_, Accumulative>(&line, 0.1, &read, &mut write);
        assert_eq!(write, [0.0, 100.0, 800.0, 100.0, 0.0]);
    }

    #[test]
    fn accumulates_onto_stale_next() {
        let line = Line1D::new(5).unwrap();
        let read = [0.0, 0.0, 1000.0, 0.0, 0.0];
        let mut write = [0.0, 1.0, 2.0, 3.0, 0.0];
        step::<_, Accumulative>(&line, 0.1, &read, &mut write);
        assert_eq!(write, [0.0, 101.0, 802.0, 103.0, 0.0]);
    }

    #[test]
    fn contributions_next_to_boundary_are_absorbed() {
        let square = Square2D::new(3).unwrap();
        let mut read = vec![0.0; 9];
        read[4] = 100.0;
        let mut write = vec![0.0; 9];
        step::<_, Accumulative>(&square, 0.1, &read, &mut write);

        assert!((write[4] - 60.0).abs() < 1e-4);
        assert_eq!(write.iter().filter(|&&c| c != 0.0).count(), 1);
    }

    fn assert_close(a: &[Cell], b: &[Cell]) {
        for (i, (x, y)) in a.iter().zip(b).enumerate() {
            let tol = 1e-3 * x.abs().max(y.abs()).max(1.0);
            assert!((x - y).abs() <= tol, "cell {i}: {x} vs {y}");
        }
    }

    proptest! {
        #[test]
        fn equals_direct_on_zeroed_next(
            d in 3usize..8,
            values in proptest::collection::vec(0.0f32..100.0, 512),
        ) {
            let cube = Cube3D::new(d).unwrap();
            let n = cube.cell_count();
            let mut read: Vec<Cell> = values[..n].to_vec();
            for (i, v) in read.iter_mut().enumerate() {
                if cube.is_boundary(cube.coord(i)) {
                    *v = 0.0;
                }
            }

            let mut direct = vec![0.0; n];
            let mut scatter = vec![0.0; n];
            step::<_, Direct>(&cube, 0.1, &read, &mut direct);
            step::<_, Accumulative>(&cube, 0.1, &read, &mut scatter);
            assert_close(&direct, &scatter);
        }
    }
}
