//! Core types for the cachediff stencil benchmark.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! cell type, lattice addressing for 1-, 2- and 3-dimensional grids, and
//! the [`BenchConfig`] that selects every variant of a run.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod config;
pub mod error;
pub mod lattice;

pub use cell::{Cell, CELL_BYTES, DEFAULT_DIFFUSE_FACTOR};
pub use config::{BenchConfig, Dimensionality, KernelVariant};
pub use error::ConfigError;
pub use lattice::{Cube3D, Lattice, Line1D, Neighbours, Square2D, MIN_EXTENT};
