//! Benchmark profiles, console output, and exit-status mapping for the
//! cachediff runner.
//!
//! - [`profiles`]: fixed named configurations, contiguous vs offset layout
//!   for each dimensionality plus an accumulative-kernel pair
//! - [`ConsoleHooks`]: prints debug grids and outcome messages
//! - [`exit_code`]: maps a run outcome to a process exit status

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod console;
pub mod profiles;
pub mod status;

pub use console::{format_grid, ConsoleHooks};
pub use profiles::Profile;
pub use status::exit_code;
