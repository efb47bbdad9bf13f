//! Runs every benchmark profile in order and reports its throughput.
//!
//! ```bash
//! RUST_LOG=cachediff_engine=debug cargo run --release -p cachediff-bench --bin cachediff
//! ```
//!
//! Stops at the first failing profile. Exit status is 0 on success, 1 on
//! allocation failure and 2 on a rejected configuration.

use std::process::ExitCode;

use cachediff_bench::{exit_code, profiles, ConsoleHooks};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    for profile in profiles::all() {
        let mut hooks = ConsoleHooks::stdout(profile.config.debug_trace);
        let outcome = cachediff_engine::run(&profile.config, &mut hooks);
        if let Some(e) = hooks.take_error() {
            error!(profile = profile.name, error = %e, "console write failed");
        }
        match &outcome {
            Ok(summary) => {
                info!(profile = profile.name, checksum = summary.checksum, "profile done");
                println!(
                    "{:<28} {:>10.3} ms {:>10.1} Mcell/s",
                    profile.name,
                    summary.elapsed.as_secs_f64() * 1e3,
                    summary.cell_updates_per_sec() / 1e6,
                );
            }
            Err(e) => {
                error!(profile = profile.name, error = %e, "profile failed");
                return ExitCode::from(exit_code(&outcome));
            }
        }
    }
    ExitCode::SUCCESS
}
