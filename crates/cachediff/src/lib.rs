//! cachediff: a micro-benchmark of memory layout and access pattern in a
//! diffusion stencil over 1D, 2D and 3D grids.
//!
//! This is the facade crate that re-exports the public API of the
//! cachediff sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use cachediff::prelude::*;
//!
//! let config = BenchConfig {
//!     offset_bytes: Some(64),
//!     ..BenchConfig::new(Dimensionality::Two, 32, 10)
//! };
//! let summary = run(&config, &mut NoopHooks).unwrap();
//! assert_eq!(summary.iterations, 10);
//! assert_eq!(summary.offset_bytes, 64);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `cachediff-core` | Cells, config, lattices and addressing |
//! | [`arena`] | `cachediff-arena` | The buffer pair and the allocator seam |
//! | [`kernel`] | `cachediff-kernel` | Direct and accumulative stencil kernels |
//! | [`engine`] | `cachediff-engine` | The simulation driver, hooks and dispatch |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Cells, configuration, errors and grid addressing (`cachediff-core`).
pub use cachediff_core as types;

/// The double-buffered cell storage (`cachediff-arena`).
pub use cachediff_arena as arena;

/// Stencil kernels and single-step entry points (`cachediff-kernel`).
pub use cachediff_kernel as kernel;

/// Simulation driver, step plans and run hooks (`cachediff-engine`).
pub use cachediff_engine as engine;

/// Common imports for running a benchmark.
///
/// ```rust
/// use cachediff::prelude::*;
/// ```
pub mod prelude {
    // Config and addressing
    pub use cachediff_core::{
        BenchConfig, Cell, Cube3D, Dimensionality, KernelVariant, Lattice, Line1D, Square2D,
    };

    // Errors
    pub use cachediff_arena::AllocationError;
    pub use cachediff_core::ConfigError;
    pub use cachediff_engine::RunError;

    // Engine
    pub use cachediff_engine::{run, NoopHooks, RunHooks, RunSummary, Simulation};
}
