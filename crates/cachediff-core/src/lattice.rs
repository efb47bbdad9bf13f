//! Hypercubic lattices and their flat addressing.
//!
//! Every lattice has the same extent `D` on each axis and is stored
//! row-major, last axis fastest:
//!
//! ```text
//! Line1D    offset(x)       = x
//! Square2D  offset(x, y)    = x*D + y
//! Cube3D    offset(x, y, z) = x*D*D + y*D + z
//! ```
//!
//! Offsets are relative to the first cell of a buffer. Any padding placed
//! in front of a buffer's cells is invisible here.
//!
//! The free `offset_*` functions do no bounds checking and compile to
//! plain arithmetic; callers supply in-range coordinates.

use std::fmt;

use smallvec::SmallVec;

use crate::config::Dimensionality;
use crate::error::ConfigError;

/// Smallest extent that leaves an interior cell on every axis.
pub const MIN_EXTENT: usize = 3;

/// In-range axis-aligned neighbours of a cell (at most six).
pub type Neighbours = SmallVec<[usize; 6]>;

/// Flat offset of `(x)` on a line.
#[inline(always)]
pub const fn offset_1d(x: usize) -> usize {
    x
}

/// Flat offset of `(x, y)` on a square of side `extent`.
#[inline(always)]
pub const fn offset_2d(x: usize, y: usize, extent: usize) -> usize {
    x * extent + y
}

/// Flat offset of `(x, y, z)` on a cube of side `extent`.
#[inline(always)]
pub const fn offset_3d(x: usize, y: usize, z: usize, extent: usize) -> usize {
    x * extent * extent + y * extent + z
}

/// A hypercubic lattice of fixed dimensionality.
///
/// Implemented by [`Line1D`], [`Square2D`] and [`Cube3D`]. Kernels and the
/// driver are generic over this trait so each dimensionality is compiled
/// separately with no runtime branching on the axis count.
pub trait Lattice: Copy + fmt::Debug + Send + Sync + 'static {
    /// Number of axes.
    const NDIM: usize;

    /// Stencil size: two neighbours per axis.
    const NEIGHBOURS: usize = 2 * Self::NDIM;

    /// The matching [`Dimensionality`] tag.
    const DIMENSIONALITY: Dimensionality;

    /// Coordinate tuple, one entry per axis.
    type Coord: Copy + fmt::Debug + PartialEq + AsRef<[usize]>;

    /// Build a lattice with `extent` cells per axis.
    ///
    /// Returns `Err(ConfigError::ExtentTooSmall)` if `extent < 3`, or
    /// `Err(ConfigError::CellCountOverflow)` if `extent^NDIM` overflows.
    fn new(extent: usize) -> Result<Self, ConfigError>;

    /// Cells per axis.
    fn extent(&self) -> usize;

    /// Total number of cells, `extent^NDIM`.
    fn cell_count(&self) -> usize;

    /// Flat offset of `coord`.
    fn offset(&self, coord: Self::Coord) -> usize;

    /// Coordinate of flat offset `offset`. Inverse of [`offset`](Self::offset).
    fn coord(&self, offset: usize) -> Self::Coord;

    /// The seed coordinate: `extent / 2` on every axis.
    fn center(&self) -> Self::Coord;

    /// Flat distance between neighbours along each axis.
    fn strides(&self) -> Self::Coord;

    /// Visit every interior cell in ascending offset order, passing its
    /// flat offset and coordinate.
    fn for_each_interior<F: FnMut(usize, Self::Coord)>(&self, f: F);

    /// Whether `coord` lies on the fixed boundary (any axis at `0` or
    /// `extent - 1`).
    fn is_boundary(&self, coord: Self::Coord) -> bool {
        let last = self.extent() - 1;
        coord.as_ref().iter().any(|&a| a == 0 || a >= last)
    }

    /// Axis-aligned neighbours of `offset` that fall inside the grid.
    fn neighbours(&self, offset: usize) -> Neighbours {
        let coord = self.coord(offset);
        let mut out = Neighbours::new();
        for (&a, &stride) in coord.as_ref().iter().zip(self.strides().as_ref()) {
            if a + 1 < self.extent() {
                out.push(offset + stride);
            }
            if a > 0 {
                out.push(offset - stride);
            }
        }
        out
    }
}

// ── Line1D ─────────────────────────────────────────────────────────

/// A line of `extent` cells.
///
/// # Examples
///
/// ```
/// use cachediff_core::{Lattice, Line1D};
///
/// let line = Line1D::new(5).unwrap();
/// assert_eq!(line.cell_count(), 5);
/// assert_eq!(line.offset(line.center()), 2);
/// assert!(line.is_boundary([4]));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Line1D {
    extent: usize,
}

impl Lattice for Line1D {
    const NDIM: usize = 1;
    const DIMENSIONALITY: Dimensionality = Dimensionality::One;
    type Coord = [usize; 1];

    fn new(extent: usize) -> Result<Self, ConfigError> {
        Self::DIMENSIONALITY.cell_count(extent)?;
        Ok(Self { extent })
    }

    #[inline(always)]
    fn extent(&self) -> usize {
        self.extent
    }

    #[inline(always)]
    fn cell_count(&self) -> usize {
        self.extent
    }

    #[inline(always)]
    fn offset(&self, [x]: [usize; 1]) -> usize {
        offset_1d(x)
    }

    fn coord(&self, offset: usize) -> [usize; 1] {
        [offset]
    }

    fn center(&self) -> [usize; 1] {
        [self.extent / 2]
    }

    #[inline(always)]
    fn strides(&self) -> [usize; 1] {
        [1]
    }

    #[inline(always)]
    fn for_each_interior<F: FnMut(usize, [usize; 1])>(&self, mut f: F) {
        for x in 1..self.extent - 1 {
            f(offset_1d(x), [x]);
        }
    }
}

// ── Square2D ───────────────────────────────────────────────────────

/// A square of `extent x extent` cells, `y` fastest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Square2D {
    extent: usize,
}

impl Lattice for Square2D {
    const NDIM: usize = 2;
    const DIMENSIONALITY: Dimensionality = Dimensionality::Two;
    type Coord = [usize; 2];

    fn new(extent: usize) -> Result<Self, ConfigError> {
        Self::DIMENSIONALITY.cell_count(extent)?;
        Ok(Self { extent })
    }

    #[inline(always)]
    fn extent(&self) -> usize {
        self.extent
    }

    #[inline(always)]
    fn cell_count(&self) -> usize {
        self.extent * self.extent
    }

    #[inline(always)]
    fn offset(&self, [x, y]: [usize; 2]) -> usize {
        offset_2d(x, y, self.extent)
    }

    fn coord(&self, offset: usize) -> [usize; 2] {
        [offset / self.extent, offset % self.extent]
    }

    fn center(&self) -> [usize; 2] {
        let c = self.extent / 2;
        [c, c]
    }

    #[inline(always)]
    fn strides(&self) -> [usize; 2] {
        [self.extent, 1]
    }

    #[inline(always)]
    fn for_each_interior<F: FnMut(usize, [usize; 2])>(&self, mut f: F) {
        let d = self.extent;
        for x in 1..d - 1 {
            for y in 1..d - 1 {
                f(offset_2d(x, y, d), [x, y]);
            }
        }
    }
}

// ── Cube3D ─────────────────────────────────────────────────────────

/// A cube of `extent^3` cells, `z` fastest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cube3D {
    extent: usize,
}

impl Lattice for Cube3D {
    const NDIM: usize = 3;
    const DIMENSIONALITY: Dimensionality = Dimensionality::Three;
    type Coord = [usize; 3];

    fn new(extent: usize) -> Result<Self, ConfigError> {
        Self::DIMENSIONALITY.cell_count(extent)?;
        Ok(Self { extent })
    }

    #[inline(always)]
    fn extent(&self) -> usize {
        self.extent
    }

    #[inline(always)]
    fn cell_count(&self) -> usize {
        self.extent * self.extent * self.extent
    }

    #[inline(always)]
    fn offset(&self, [x, y, z]: [usize; 3]) -> usize {
        offset_3d(x, y, z, self.extent)
    }

    fn coord(&self, offset: usize) -> [usize; 3] {
        let d = self.extent;
        [offset / (d * d), (offset / d) % d, offset % d]
    }

    fn center(&self) -> [usize; 3] {
        let c = self.extent / 2;
        [c, c, c]
    }

    #[inline(always)]
    fn strides(&self) -> [usize; 3] {
        [self.extent * self.extent, self.extent, 1]
    }

    #[inline(always)]
    fn for_each_interior<F: FnMut(usize, [usize; 3])>(&self, mut f: F) {
        let d = self.extent;
        for x in 1..d - 1 {
            for y in 1..d - 1 {
                for z in 1..d - 1 {
                    f(offset_3d(x, y, z, d), [x, y, z]);
                }
            }
        }
    }
}
