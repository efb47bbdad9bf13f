//! The update-rule trait shared by both kernels.

use std::fmt;

use cachediff_core::{Cell, KernelVariant, Lattice};

use crate::access::CellAccess;

/// One diffusion update rule.
///
/// Implementors are zero-sized markers; the driver picks one at startup
/// and is monomorphized over it.
pub trait Kernel: Copy + Default + fmt::Debug + Send + Sync + 'static {
    /// The config tag naming this rule.
    const VARIANT: KernelVariant;

    /// Advance every interior cell of `lattice` by one step.
    ///
    /// # Safety
    ///
    /// `cells` must give in-bounds access to `lattice.cell_count()` cells
    /// in both buffers.
    unsafe fn apply<L: Lattice, C: CellAccess>(lattice: &L, factor: Cell, cells: &mut C);
}
