//! Configuration error types.
//!
//! Every variant describes a misconfigured run. They are detected once at
//! startup by [`BenchConfig::validate()`](crate::BenchConfig::validate) or
//! a lattice constructor, before any buffer is allocated.

use std::error::Error;
use std::fmt;

use crate::cell::Cell;
use crate::config::Dimensionality;

/// Errors detected while validating a [`BenchConfig`](crate::BenchConfig).
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Extent leaves no interior cell on some axis (must be at least 3).
    ExtentTooSmall {
        /// The configured extent.
        extent: usize,
    },
    /// `extent^ndim` does not fit in `usize`.
    CellCountOverflow {
        /// The configured extent.
        extent: usize,
        /// Number of axes.
        ndim: usize,
    },
    /// Offset layout enabled with zero padding bytes.
    ZeroOffset,
    /// Offset padding is not a whole number of cells.
    ///
    /// Buffer B's cells start right after the padding and are read as
    /// `f32`, which needs 4-byte alignment. Padding that is not a multiple
    /// of [`CELL_BYTES`](crate::CELL_BYTES) would misalign them.
    MisalignedOffset {
        /// The configured padding in bytes.
        offset_bytes: usize,
        /// Required multiple.
        cell_bytes: usize,
    },
    /// The diffusion factor is NaN or infinite.
    InvalidFactor {
        /// The rejected value.
        value: Cell,
    },
    /// The seed impulse is zero, NaN or infinite.
    InvalidSeed {
        /// The rejected value.
        value: Cell,
    },
    /// A driver was built for one dimensionality but handed a config for
    /// another.
    DimensionalityMismatch {
        /// Dimensionality the driver was built for.
        expected: Dimensionality,
        /// Dimensionality named by the config.
        configured: Dimensionality,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExtentTooSmall { extent } => {
                write!(f, "extent {extent} is too small (minimum 3)")
            }
            Self::CellCountOverflow { extent, ndim } => {
                write!(f, "cell count {extent}^{ndim} overflows usize")
            }
            Self::ZeroOffset => write!(f, "offset layout enabled with zero offset bytes"),
            Self::MisalignedOffset {
                offset_bytes,
                cell_bytes,
            } => {
                write!(
                    f,
                    "offset of {offset_bytes} bytes is not a multiple of the {cell_bytes}-byte cell"
                )
            }
            Self::InvalidFactor { value } => write!(f, "diffusion factor {value} is not finite"),
            Self::InvalidSeed { value } => {
                write!(f, "seed value {value} must be finite and nonzero")
            }
            Self::DimensionalityMismatch {
                expected,
                configured,
            } => {
                write!(
                    f,
                    "driver built for {expected} grids but config selects {configured}"
                )
            }
        }
    }
}

impl Error for ConfigError {}
