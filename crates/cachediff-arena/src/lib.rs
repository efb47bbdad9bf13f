//! Double-buffered cell storage for the cachediff benchmark.
//!
//! [`BufferPair`] owns the two simulation buffers for the whole run. One of
//! them (buffer B) may carry leading padding so that its cells start at a
//! different offset within a cache line, and within cache sets, than the
//! corresponding cells of buffer A.
//!
//! # Layout
//!
//! ```text
//! buffer A: base ─► [cell 0][cell 1] ... [cell SIZE-1]
//! buffer B: base ─► [padding (offset_bytes)][cell 0] ... [cell SIZE-1]
//!                                            ▲
//!                                            └── logical start
//! ```
//!
//! Both bases are aligned to [`CACHE_LINE_BYTES`], so the configured
//! padding is exactly the relative misalignment between the buffers.
//! Each buffer remembers its base and layout next to its logical start,
//! and is always released from the base.
//!
//! All memory is obtained through a [`CellAllocator`], which lets tests
//! inject allocation failures and count outstanding allocations. This
//! crate confines its `unsafe` code to `alloc.rs` and `raw.rs`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod alloc;
pub mod error;
pub mod pair;
mod raw;

pub use alloc::{CellAllocator, SystemAllocator, CACHE_LINE_BYTES};
pub use error::{AllocationError, BufferId};
pub use pair::BufferPair;
