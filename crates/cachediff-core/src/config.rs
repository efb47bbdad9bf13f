//! Run configuration and validation.
//!
//! A [`BenchConfig`] is fixed before the run starts and never mutated
//! afterwards. [`validate()`](BenchConfig::validate) rejects every
//! combination the driver cannot run, so nothing downstream re-checks it.

use std::fmt;

use crate::cell::{Cell, CELL_BYTES, DEFAULT_DIFFUSE_FACTOR};
use crate::error::ConfigError;
use crate::lattice::MIN_EXTENT;

// ── Dimensionality ─────────────────────────────────────────────────

/// Number of grid axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dimensionality {
    /// A line of `D` cells.
    One,
    /// A `D x D` square.
    Two,
    /// A `D x D x D` cube.
    Three,
}

impl Dimensionality {
    /// All supported dimensionalities, lowest first.
    pub const ALL: [Dimensionality; 3] = [Self::One, Self::Two, Self::Three];

    /// Number of axes (1, 2 or 3).
    pub fn ndim(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Stencil size: two axis-aligned neighbours per axis.
    pub fn neighbour_count(self) -> usize {
        2 * self.ndim()
    }

    /// Seed impulse placed at the grid centre when the config does not
    /// override it.
    pub fn default_seed(self) -> Cell {
        match self {
            Self::One => 1000.0,
            Self::Two | Self::Three => 10000.0,
        }
    }

    /// Total cell count `extent^ndim`.
    ///
    /// Returns `Err(ConfigError::ExtentTooSmall)` if `extent < 3` and
    /// `Err(ConfigError::CellCountOverflow)` if the count overflows.
    pub fn cell_count(self, extent: usize) -> Result<usize, ConfigError> {
        if extent < MIN_EXTENT {
            return Err(ConfigError::ExtentTooSmall { extent });
        }
        let ndim = self.ndim();
        extent
            .checked_pow(ndim as u32)
            .ok_or(ConfigError::CellCountOverflow { extent, ndim })
    }
}

impl fmt::Display for Dimensionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d", self.ndim())
    }
}

// ── KernelVariant ──────────────────────────────────────────────────

/// Which update rule advances the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum KernelVariant {
    /// Gather form: each interior cell of `next` is overwritten.
    #[default]
    Direct,
    /// Scatter form: contributions are added into `next`, which must
    /// start the call zeroed.
    Accumulative,
}

impl fmt::Display for KernelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::Accumulative => write!(f, "accumulative"),
        }
    }
}

// ── BenchConfig ────────────────────────────────────────────────────

/// Every knob of one benchmark run.
///
/// Constructed with [`BenchConfig::new`] (or struct-update syntax over
/// [`Default`]) and checked once with [`validate()`](Self::validate).
#[derive(Clone, Debug, PartialEq)]
pub struct BenchConfig {
    /// Number of grid axes.
    pub dimensionality: Dimensionality,
    /// Cells per axis (`D`). Must be at least 3.
    pub extent: usize,
    /// Number of kernel invocations.
    pub iterations: u64,
    /// Update rule.
    pub kernel: KernelVariant,
    /// Force the step function inline at its call site. Performance only.
    pub inline_kernel: bool,
    /// Hand the kernel borrowed slices, which the compiler may assume
    /// never overlap. When `false` the kernel works on raw pointers.
    pub aliasing_hint: bool,
    /// Leading padding, in bytes, in front of buffer B. `None` keeps both
    /// buffers identically aligned. Must be a nonzero multiple of
    /// [`CELL_BYTES`] so buffer B's cells stay aligned for `f32`.
    pub offset_bytes: Option<usize>,
    /// Invoke the per-iteration debug hook with the read buffer.
    pub debug_trace: bool,
    /// Diffusion coefficient applied by the kernel.
    pub diffuse_factor: Cell,
    /// Value written into the centre cell before iteration 0.
    pub seed_value: Cell,
}

impl BenchConfig {
    /// Extent used by [`Default`].
    pub const DEFAULT_EXTENT: usize = 64;

    /// Iteration count used by [`Default`].
    pub const DEFAULT_ITERATIONS: u64 = 100;

    /// Create a config with the given shape and all switches off.
    ///
    /// The kernel is [`KernelVariant::Direct`], the factor is
    /// [`DEFAULT_DIFFUSE_FACTOR`], and the seed follows
    /// [`Dimensionality::default_seed`].
    pub fn new(dimensionality: Dimensionality, extent: usize, iterations: u64) -> Self {
        Self {
            dimensionality,
            extent,
            iterations,
            kernel: KernelVariant::Direct,
            inline_kernel: false,
            aliasing_hint: false,
            offset_bytes: None,
            debug_trace: false,
            diffuse_factor: DEFAULT_DIFFUSE_FACTOR,
            seed_value: dimensionality.default_seed(),
        }
    }

    /// Check every startup invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cell_count()?;

        if let Some(offset_bytes) = self.offset_bytes {
            if offset_bytes == 0 {
                return Err(ConfigError::ZeroOffset);
            }
            if offset_bytes % CELL_BYTES != 0 {
                return Err(ConfigError::MisalignedOffset {
                    offset_bytes,
                    cell_bytes: CELL_BYTES,
                });
            }
        }

        if !self.diffuse_factor.is_finite() {
            return Err(ConfigError::InvalidFactor {
                value: self.diffuse_factor,
            });
        }
        if !self.seed_value.is_finite() || self.seed_value == 0.0 {
            return Err(ConfigError::InvalidSeed {
                value: self.seed_value,
            });
        }
        Ok(())
    }

    /// Total number of cells per buffer.
    pub fn cell_count(&self) -> Result<usize, ConfigError> {
        self.dimensionality.cell_count(self.extent)
    }

    /// Padding in front of buffer B, zero when the offset layout is off.
    pub fn padding_bytes(&self) -> usize {
        self.offset_bytes.unwrap_or(0)
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self::new(
            Dimensionality::Two,
            Self::DEFAULT_EXTENT,
            Self::DEFAULT_ITERATIONS,
        )
    }
}
