//! The per-run state machine.
//!
//! ```text
//! Uninitialized ──prepare──► Ready ──advance──► Running ──finish──► Completed
//!       │                      │                   │
//!       │                      └──────abort────────┴──► Uninitialized
//!       └──prepare (allocation error)──► Failed
//! ```
//!
//! `finish` is accepted only once every configured iteration has run.
//!
//! [`Simulation::run`] walks the whole machine. The individual steps are
//! public so callers can inspect the grid between iterations.

use std::marker::PhantomData;
use std::time::{Duration, Instant};

use cachediff_arena::{BufferPair, CellAllocator, SystemAllocator};
use cachediff_core::{BenchConfig, Cell, ConfigError, Dimensionality, KernelVariant, Lattice};
use tracing::{debug, error, info, trace, warn};

use crate::error::RunError;
use crate::hooks::RunHooks;
use crate::policy::StepPlan;

/// Lifecycle state of a [`Simulation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DriverState {
    /// Constructed; no buffers yet.
    Uninitialized,
    /// Buffers allocated, zeroed and seeded.
    Ready,
    /// At least one iteration has started.
    Running,
    /// Buffers released after a successful run.
    Completed,
    /// Buffer allocation failed; nothing is held.
    Failed,
}

/// Outcome of a completed run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// Grid dimensionality.
    pub dimensionality: Dimensionality,
    /// Cells per axis.
    pub extent: usize,
    /// Kernel that ran.
    pub kernel: KernelVariant,
    /// Iterations actually executed.
    pub iterations: u64,
    /// Wall time from the first iteration to release.
    pub elapsed: Duration,
    /// Sum of the final read buffer, taken before release.
    pub checksum: f64,
    /// Bytes reserved for both buffers, padding included.
    pub reserved_bytes: usize,
    /// Leading padding of buffer B.
    pub offset_bytes: usize,
}

impl RunSummary {
    /// Interior cells updated per iteration, `(extent - 2)^ndim`.
    pub fn interior_cells(&self) -> u64 {
        ((self.extent - 2) as u64).pow(self.dimensionality.ndim() as u32)
    }

    /// Interior cell updates per second over the whole run.
    ///
    /// Returns `0.0` if no time elapsed.
    pub fn cell_updates_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.interior_cells() as f64 * self.iterations as f64 / secs
    }
}

/// One diffusion run over lattice `L` with step plan `P`.
///
/// The plan decides the kernel and the inlining and aliasing hints; the
/// matching fields of the config are read only by [`run`](crate::run)
/// when it picks `P`. The simulation exclusively owns its buffers from
/// [`prepare`](Self::prepare) until [`finish`](Self::finish) or drop.
pub struct Simulation<L: Lattice, P: StepPlan, A: CellAllocator + Clone = SystemAllocator> {
    config: BenchConfig,
    lattice: L,
    alloc: A,
    buffers: Option<BufferPair<A>>,
    state: DriverState,
    completed: u64,
    started: Option<Instant>,
    _plan: PhantomData<P>,
}

impl<L: Lattice, P: StepPlan> Simulation<L, P, SystemAllocator> {
    /// Create a simulation using the global allocator.
    pub fn new(config: BenchConfig) -> Result<Self, ConfigError> {
        Self::with_allocator(config, SystemAllocator)
    }
}

impl<L: Lattice, P: StepPlan, A: CellAllocator + Clone> Simulation<L, P, A> {
    /// Create a simulation whose buffers come from `alloc`.
    ///
    /// Validates `config` and checks that it names `L`'s dimensionality.
    pub fn with_allocator(config: BenchConfig, alloc: A) -> Result<Self, ConfigError> {
        config.validate()?;
        if config.dimensionality != L::DIMENSIONALITY {
            return Err(ConfigError::DimensionalityMismatch {
                expected: L::DIMENSIONALITY,
                configured: config.dimensionality,
            });
        }
        let lattice = L::new(config.extent)?;

        if P::VARIANT == KernelVariant::Accumulative && config.iterations > 1 {
            warn!(
                iterations = config.iterations,
                "accumulative kernel adds into a write buffer that is never cleared; \
                 results after the first iteration include state from two steps earlier"
            );
        }

        Ok(Self {
            config,
            lattice,
            alloc,
            buffers: None,
            state: DriverState::Uninitialized,
            completed: 0,
            started: None,
            _plan: PhantomData,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// The validated config.
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// The lattice being simulated.
    pub fn lattice(&self) -> &L {
        &self.lattice
    }

    /// Iterations executed so far.
    pub fn completed_iterations(&self) -> u64 {
        self.completed
    }

    /// The buffer pair, while held.
    pub fn buffers(&self) -> Option<&BufferPair<A>> {
        self.buffers.as_ref()
    }

    /// The current (read) buffer, while held.
    pub fn current(&self) -> Option<&[Cell]> {
        self.buffers.as_ref().map(BufferPair::read)
    }

    /// Allocate, zero and seed both buffers: `Uninitialized → Ready`.
    ///
    /// On allocation failure the partial allocation is released, the
    /// failure hook fires once, and the state becomes `Failed`.
    pub fn prepare<H: RunHooks>(&mut self, hooks: &mut H) -> Result<(), RunError> {
        if self.state != DriverState::Uninitialized {
            return Err(RunError::InvalidState { state: self.state });
        }

        let cells = self.lattice.cell_count();
        let padding = self.config.padding_bytes();
        match BufferPair::allocate_in(self.alloc.clone(), cells, padding) {
            Ok(mut buffers) => {
                let seed_offset = self.lattice.offset(self.lattice.center());
                buffers.initialize(seed_offset, self.config.seed_value);
                let (a, b) = buffers.start_addrs();
                let (dimensionality, kernel) = (L::DIMENSIONALITY, P::VARIANT);
                info!(
                    %dimensionality,
                    extent = self.lattice.extent(),
                    cells,
                    offset_bytes = padding,
                    reserved_bytes = buffers.reserved_bytes(),
                    %kernel,
                    inline = P::INLINE,
                    restrict = P::RESTRICT,
                    "buffers ready"
                );
                debug!(
                    buffer_a = format_args!("{a:#x}"),
                    buffer_b = format_args!("{b:#x}"),
                    "buffer addresses"
                );
                self.buffers = Some(buffers);
                self.state = DriverState::Ready;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "buffer allocation failed");
                self.state = DriverState::Failed;
                hooks.report_allocation_failure(&e);
                Err(RunError::Allocation(e))
            }
        }
    }

    /// Run one iteration: debug hook, kernel step, swap.
    ///
    /// Returns `Ok(false)` once every configured iteration has run.
    pub fn advance<H: RunHooks>(&mut self, hooks: &mut H) -> Result<bool, RunError> {
        match self.state {
            DriverState::Ready => {
                self.state = DriverState::Running;
                self.started = Some(Instant::now());
            }
            DriverState::Running => {}
            state => return Err(RunError::InvalidState { state }),
        }
        if self.completed >= self.config.iterations {
            return Ok(false);
        }
        let Some(buffers) = self.buffers.as_mut() else {
            return Err(RunError::InvalidState { state: self.state });
        };

        if self.config.debug_trace {
            trace!(iteration = self.completed, read = %buffers.read_id(), "step");
            hooks.debug_print(buffers.read(), L::DIMENSIONALITY, self.lattice.extent());
        }
        P::step(&self.lattice, self.config.diffuse_factor, buffers);
        buffers.swap();
        self.completed += 1;
        Ok(true)
    }

    /// Release both buffers and report: `Ready | Running → Completed`.
    ///
    /// Rejected with `InvalidState` until every configured iteration has
    /// run. Use [`abort`](Self::abort) to tear down early.
    pub fn finish<H: RunHooks>(&mut self, hooks: &mut H) -> Result<RunSummary, RunError> {
        if !matches!(self.state, DriverState::Ready | DriverState::Running)
            || self.completed < self.config.iterations
        {
            return Err(RunError::InvalidState { state: self.state });
        }
        let Some(buffers) = self.buffers.take() else {
            return Err(RunError::InvalidState { state: self.state });
        };
        let elapsed = self.started.map(|t| t.elapsed()).unwrap_or_default();

        let extent = self.lattice.extent();
        let read = buffers.read();
        let checksum = read.iter().map(|&c| f64::from(c)).sum();
        hooks.final_state(read, L::DIMENSIONALITY, extent);

        let summary = RunSummary {
            dimensionality: L::DIMENSIONALITY,
            extent,
            kernel: P::VARIANT,
            iterations: self.completed,
            elapsed,
            checksum,
            reserved_bytes: buffers.reserved_bytes(),
            offset_bytes: buffers.padding_bytes(),
        };
        buffers.release();
        self.state = DriverState::Completed;

        info!(
            iterations = summary.iterations,
            elapsed_us = summary.elapsed.as_micros() as u64,
            checksum = summary.checksum,
            "simulation completed"
        );
        hooks.report_completion(&summary);
        Ok(summary)
    }

    /// Release any held buffers without reporting completion.
    ///
    /// Returns to `Uninitialized` with the iteration count reset, so the
    /// simulation can be prepared again. Does nothing once `Completed` or
    /// `Failed`.
    pub fn abort(&mut self) {
        if !matches!(self.state, DriverState::Ready | DriverState::Running) {
            return;
        }
        if let Some(buffers) = self.buffers.take() {
            buffers.release();
        }
        debug!(completed = self.completed, "simulation aborted");
        self.state = DriverState::Uninitialized;
        self.completed = 0;
        self.started = None;
    }

    /// Prepare, run every iteration, and finish.
    pub fn run<H: RunHooks>(mut self, hooks: &mut H) -> Result<RunSummary, RunError> {
        self.prepare(hooks)?;
        while self.advance(hooks)? {}
        self.finish(hooks)
    }
}
