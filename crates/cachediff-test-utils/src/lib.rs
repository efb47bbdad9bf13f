//! Test utilities for cachediff development.
//!
//! Provides [`RecordingHooks`], a [`RunHooks`](cachediff_engine::RunHooks)
//! implementation that keeps everything a run reports, and
//! [`CountingAllocator`], a [`CellAllocator`](cachediff_arena::CellAllocator)
//! that counts live blocks and fails chosen allocations on demand.

#![deny(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod alloc;
pub mod hooks;

pub use alloc::CountingAllocator;
pub use hooks::{DebugSnapshot, RecordingHooks};
