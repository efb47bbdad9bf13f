//! Gather-form diffusion step.

use cachediff_core::{Cell, KernelVariant, Lattice};

use crate::access::CellAccess;
use crate::kernel::Kernel;

/// Overwrites each interior cell of `next` from its stencil in `current`:
///
/// ```text
/// next[c] = current[c] + factor * (Σ current[n] − 2N * current[c])
/// ```
///
/// where `n` ranges over the `2N` axis-aligned neighbours. Nothing is read
/// from `next`, so its previous contents never matter.
#[derive(Clone, Copy, Debug, Default)]
pub struct Direct;

impl Kernel for Direct {
    const VARIANT: KernelVariant = KernelVariant::Direct;

    #[inline(always)]
    unsafe fn apply<L: Lattice, C: CellAccess>(lattice: &L, factor: Cell, cells: &mut C) {
        let strides = lattice.strides();
        let weight = L::NEIGHBOURS as Cell;

        lattice.for_each_interior(|i, _| {
            // SAFETY: an interior cell has at least one cell on either side
            // along every axis, so `i ± stride` stays in bounds.
            unsafe {
                let centre = cells.current(i);
                let mut sum = 0.0;
                for &stride in strides.as_ref() {
                    sum += cells.current(i + stride) + cells.current(i - stride);
                }
                cells.set_next(i, centre + factor * (sum - weight * centre));
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::step;
    use cachediff_core::{Cube3D, Line1D, Square2D};

    #[test]
    fn line_of_five_matches_hand_computation() {
        let line = Line1D::new(5).unwrap();
        let read = [0.0, 0.0, 1000.0, 0.0, 0.0];
        let mut write = [0.0; 5];
        step::<_, Direct>(&line, 0.1, &read, &mut write);
        assert_eq!(write, [0.0, 100.0, 800.0, 100.0, 0.0]);
    }

    #[test]
    fn overwrites_stale_next_contents() {
        let line = Line1D::new(5).unwrap();
        let read = [0.0, 0.0, 1000.0, 0.0, 0.0];
        let mut write = [0.0, 55.0, 55.0, 55.0, 0.0];
        step::<_, Direct>(&line, 0.1, &read, &mut write);
        assert_eq!(write, [0.0, 100.0, 800.0, 100.0, 0.0]);
    }

    #[test]
    fn square_impulse_spreads_to_four_neighbours() {
        let square = Square2D::new(5).unwrap();
        let centre = square.offset(square.center());
        let mut read = vec![0.0; 25];
        read[centre] = 10000.0;
        let mut write = vec![0.0; 25];
        step::<_, Direct>(&square, 0.1, &read, &mut write);

        assert!((write[centre] - 6000.0).abs() < 1e-2);
        for nb in square.neighbours(centre) {
            assert!((write[nb] - 1000.0).abs() < 1e-3);
        }
        assert_eq!(write.iter().filter(|&&c| c != 0.0).count(), 5);
    }

    #[test]
    fn cube_impulse_spreads_to_six_neighbours() {
        let cube = Cube3D::new(5).unwrap();
        let centre = cube.offset(cube.center());
        let mut read = vec![0.0; 125];
        read[centre] = 10000.0;
        let mut write = vec![0.0; 125];
        step::<_, Direct>(&cube, 0.1, &read, &mut write);

        assert!((write[centre] - 4000.0).abs() < 1e-2);
        assert_eq!(write.iter().filter(|&&c| c != 0.0).count(), 7);
    }

    #[test]
    fn boundary_cells_untouched() {
        let square = Square2D::new(4).unwrap();
        let read = vec![1.0; 16];
        let mut write = vec![0.0; 16];
        step::<_, Direct>(&square, 0.1, &read, &mut write);
        for i in 0..16 {
            if square.is_boundary(square.coord(i)) {
                assert_eq!(write[i], 0.0);
            } else {
                assert_eq!(write[i], 1.0);
            }
        }
    }
}
