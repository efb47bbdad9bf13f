//! Callbacks into the code surrounding a run.
//!
//! The driver never formats or prints anything itself. Reporting and
//! debug dumps go through a [`RunHooks`] implementation supplied by the
//! caller.

use cachediff_arena::AllocationError;
use cachediff_core::{Cell, Dimensionality};

use crate::driver::RunSummary;

/// Observer of a simulation run. Every method defaults to doing nothing.
pub trait RunHooks {
    /// Called once if either buffer fails to allocate, after anything
    /// already allocated has been released.
    fn report_allocation_failure(&mut self, _error: &AllocationError) {}

    /// Called once after every iteration has run and the buffers have
    /// been released.
    fn report_completion(&mut self, _summary: &RunSummary) {}

    /// Called before each step with the read buffer, only when the
    /// config enables `debug_trace`.
    fn debug_print(&mut self, _cells: &[Cell], _dimensionality: Dimensionality, _extent: usize) {}

    /// Called once with the final read buffer, just before release.
    fn final_state(&mut self, _cells: &[Cell], _dimensionality: Dimensionality, _extent: usize) {}
}

/// Hooks that ignore every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHooks;

impl RunHooks for NoopHooks {}

impl<H: RunHooks + ?Sized> RunHooks for &mut H {
    fn report_allocation_failure(&mut self, error: &AllocationError) {
        (**self).report_allocation_failure(error);
    }

    fn report_completion(&mut self, summary: &RunSummary) {
        (**self).report_completion(summary);
    }

    fn debug_print(&mut self, cells: &[Cell], dimensionality: Dimensionality, extent: usize) {
        (**self).debug_print(cells, dimensionality, extent);
    }

    fn final_state(&mut self, cells: &[Cell], dimensionality: Dimensionality, extent: usize) {
        (**self).final_state(cells, dimensionality, extent);
    }
}
