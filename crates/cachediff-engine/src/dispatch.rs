//! One-time selection of the monomorphized driver for a config.
//!
//! [`run`] matches on the config exactly once, walking four levels of
//! generic functions (lattice, kernel, inline hint, aliasing hint) down to
//! a [`Simulation`] whose every choice is a type parameter.

use cachediff_arena::{CellAllocator, SystemAllocator};
use cachediff_core::{BenchConfig, Cube3D, Dimensionality, KernelVariant, Lattice, Line1D, Square2D};
use cachediff_kernel::{Accumulative, Direct, Kernel};
use tracing::debug;

use crate::driver::{RunSummary, Simulation};
use crate::error::RunError;
use crate::hooks::RunHooks;
use crate::policy::{InlineHint, Inlined, MayAliasPolicy, Outlined, Plan, RestrictPolicy, StepPlan};

/// Validate `config` and run it to completion with the global allocator.
///
/// # Examples
///
/// ```
/// use cachediff_core::{BenchConfig, Dimensionality};
/// use cachediff_engine::{run, NoopHooks};
///
/// let config = BenchConfig::new(Dimensionality::One, 5, 1);
/// let summary = run(&config, &mut NoopHooks).unwrap();
/// assert_eq!(summary.iterations, 1);
/// assert!((summary.checksum - 1000.0).abs() < 1e-3);
/// ```
pub fn run<H: RunHooks>(config: &BenchConfig, hooks: &mut H) -> Result<RunSummary, RunError> {
    run_with_allocator(config, SystemAllocator, hooks)
}

/// Validate `config` and run it to completion with buffers from `alloc`.
///
/// A config error is returned before anything is allocated and fires no
/// hook. An allocation error fires
/// [`report_allocation_failure`](RunHooks::report_allocation_failure)
/// once and is returned after cleanup.
pub fn run_with_allocator<A, H>(
    config: &BenchConfig,
    alloc: A,
    hooks: &mut H,
) -> Result<RunSummary, RunError>
where
    A: CellAllocator + Clone,
    H: RunHooks,
{
    config.validate()?;
    debug!(
        dimensionality = %config.dimensionality,
        kernel = %config.kernel,
        inline = config.inline_kernel,
        restrict = config.aliasing_hint,
        "dispatching"
    );
    match config.dimensionality {
        Dimensionality::One => with_lattice::<Line1D, A, H>(config, alloc, hooks),
        Dimensionality::Two => with_lattice::<Square2D, A, H>(config, alloc, hooks),
        Dimensionality::Three => with_lattice::<Cube3D, A, H>(config, alloc, hooks),
    }
}

fn with_lattice<L, A, H>(config: &BenchConfig, alloc: A, hooks: &mut H) -> Result<RunSummary, RunError>
where
    L: Lattice,
    A: CellAllocator + Clone,
    H: RunHooks,
{
    match config.kernel {
        KernelVariant::Direct => with_kernel::<L, Direct, A, H>(config, alloc, hooks),
        KernelVariant::Accumulative => with_kernel::<L, Accumulative, A, H>(config, alloc, hooks),
    }
}

fn with_kernel<L, K, A, H>(config: &BenchConfig, alloc: A, hooks: &mut H) -> Result<RunSummary, RunError>
where
    L: Lattice,
    K: Kernel,
    A: CellAllocator + Clone,
    H: RunHooks,
{
    if config.inline_kernel {
        with_inline::<L, K, Inlined, A, H>(config, alloc, hooks)
    } else {
        with_inline::<L, K, Outlined, A, H>(config, alloc, hooks)
    }
}

fn with_inline<L, K, I, A, H>(config: &BenchConfig, alloc: A, hooks: &mut H) -> Result<RunSummary, RunError>
where
    L: Lattice,
    K: Kernel,
    I: InlineHint,
    A: CellAllocator + Clone,
    H: RunHooks,
{
    if config.aliasing_hint {
        drive::<L, Plan<K, I, RestrictPolicy>, A, H>(config, alloc, hooks)
    } else {
        drive::<L, Plan<K, I, MayAliasPolicy>, A, H>(config, alloc, hooks)
    }
}

fn drive<L, P, A, H>(config: &BenchConfig, alloc: A, hooks: &mut H) -> Result<RunSummary, RunError>
where
    L: Lattice,
    P: StepPlan,
    A: CellAllocator + Clone,
    H: RunHooks,
{
    Simulation::<L, P, A>::with_allocator(config.clone(), alloc)?.run(hooks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::NoopHooks;
    use cachediff_core::ConfigError;

    #[test]
    fn invalid_config_rejected_before_allocation() {
        let config = BenchConfig::new(Dimensionality::Three, 2, 1);
        assert_eq!(
            run(&config, &mut NoopHooks),
            Err(RunError::Config(ConfigError::ExtentTooSmall { extent: 2 }))
        );
    }

    #[test]
    fn every_combination_runs() {
        for dimensionality in Dimensionality::ALL {
            for kernel in [KernelVariant::Direct, KernelVariant::Accumulative] {
                for inline_kernel in [false, true] {
                    for aliasing_hint in [false, true] {
                        let config = BenchConfig {
                            kernel,
                            inline_kernel,
                            aliasing_hint,
                            offset_bytes: Some(4),
                            ..BenchConfig::new(dimensionality, 6, 3)
                        };
                        let summary = run(&config, &mut NoopHooks).unwrap();
                        assert_eq!(summary.kernel, kernel);
                        assert_eq!(summary.dimensionality, dimensionality);
                        assert_eq!(summary.iterations, 3);
                        assert_eq!(summary.offset_bytes, 4);
                    }
                }
            }
        }
    }
}
