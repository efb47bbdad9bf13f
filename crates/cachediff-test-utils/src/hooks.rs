//! Hooks that record every event of a run.

use cachediff_arena::AllocationError;
use cachediff_core::{Cell, Dimensionality};
use cachediff_engine::{RunHooks, RunSummary};

/// One `debug_print` call.
#[derive(Clone, Debug, PartialEq)]
pub struct DebugSnapshot {
    /// Address of the first cell of the buffer handed to the hook.
    pub addr: usize,
    pub dimensionality: Dimensionality,
    pub extent: usize,
    pub cells: Vec<Cell>,
}

/// Records failures, completions, debug dumps and the final grid.
#[derive(Clone, Debug, Default)]
pub struct RecordingHooks {
    pub failures: Vec<AllocationError>,
    pub completions: Vec<RunSummary>,
    pub snapshots: Vec<DebugSnapshot>,
    pub final_state: Option<Vec<Cell>>,
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Addresses of the buffers passed to each `debug_print`, in order.
    pub fn debug_addrs(&self) -> Vec<usize> {
        self.snapshots.iter().map(|s| s.addr).collect()
    }

    /// The final grid, panicking if the run never finished.
    pub fn final_cells(&self) -> &[Cell] {
        self.final_state
            .as_deref()
            .expect("run did not reach finish")
    }
}

impl RunHooks for RecordingHooks {
    fn report_allocation_failure(&mut self, error: &AllocationError) {
        self.failures.push(error.clone());
    }

    fn report_completion(&mut self, summary: &RunSummary) {
        self.completions.push(summary.clone());
    }

    fn debug_print(&mut self, cells: &[Cell], dimensionality: Dimensionality, extent: usize) {
        self.snapshots.push(DebugSnapshot {
            addr: cells.as_ptr() as usize,
            dimensionality,
            extent,
            cells: cells.to_vec(),
        });
    }

    fn final_state(&mut self, cells: &[Cell], _dimensionality: Dimensionality, _extent: usize) {
        self.final_state = Some(cells.to_vec());
    }
}
