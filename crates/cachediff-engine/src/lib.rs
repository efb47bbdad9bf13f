//! Simulation driver for the cachediff benchmark.
//!
//! [`Simulation`] owns the buffer pair for one run and walks the state
//! machine `Uninitialized → Ready → Running → Completed` (or `Failed` on
//! allocation error). [`run`] validates a [`BenchConfig`], picks the
//! lattice, kernel, inlining and aliasing policies once, and drives a
//! simulation monomorphized over that choice.
//!
//! External collaborators plug in through [`RunHooks`].
//!
//! [`BenchConfig`]: cachediff_core::BenchConfig

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod dispatch;
pub mod driver;
pub mod error;
pub mod hooks;
pub mod policy;

pub use dispatch::{run, run_with_allocator};
pub use driver::{DriverState, RunSummary, Simulation};
pub use error::RunError;
pub use hooks::{NoopHooks, RunHooks};
pub use policy::{
    AliasHint, InlineHint, Inlined, MayAliasPolicy, Outlined, Plan, RestrictPolicy, StepPlan,
};
