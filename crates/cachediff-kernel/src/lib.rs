//! Diffusion stencil kernels for the cachediff benchmark.
//!
//! A kernel advances the grid by one step, reading the current buffer and
//! writing the next one. Only interior cells are written; the boundary is
//! a fixed absorbing layer held at zero.
//!
//! Two update rules are provided:
//!
//! - [`Direct`]: gather form, `next[c]` is overwritten from its stencil.
//! - [`Accumulative`]: scatter form, each cell adds its contributions into
//!   `next`. Correct only when `next` starts the call zeroed.
//!
//! Both are generic over the [`Lattice`](cachediff_core::Lattice) and over a
//! [`CellAccess`] strategy. [`step`] hands the kernel borrowed slices, which
//! the compiler may treat as non-overlapping; [`step_raw`] hands it raw
//! pointers, where that promise is not made.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(unsafe_op_in_unsafe_fn)]

pub mod access;
pub mod accumulative;
pub mod direct;
pub mod kernel;
pub mod step;

pub use access::{CellAccess, MayAlias, NoAlias};
pub use accumulative::Accumulative;
pub use direct::Direct;
pub use kernel::Kernel;
pub use step::{step, step_raw};
