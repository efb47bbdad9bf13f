//! Integration test: end-to-end diffusion runs through the public entry
//! point, observed via recording hooks.

use cachediff_core::{BenchConfig, Cell, Dimensionality, KernelVariant};
use cachediff_engine::run;
use cachediff_test_utils::RecordingHooks;
use proptest::prelude::*;

fn final_grid(config: &BenchConfig) -> Vec<Cell> {
    let mut hooks = RecordingHooks::new();
    run(config, &mut hooks).unwrap();
    hooks.final_cells().to_vec()
}

/// Whether flat index `i` lies on the outer shell of an `extent`-wide
/// grid of `ndim` dimensions.
fn on_boundary(mut i: usize, extent: usize, ndim: usize) -> bool {
    (0..ndim).any(|_| {
        let c = i % extent;
        i /= extent;
        c == 0 || c == extent - 1
    })
}

fn assert_close(actual: &[Cell], expected: &[Cell]) {
    assert_eq!(actual.len(), expected.len());
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        let tol = 1e-4 * a.abs().max(e.abs()).max(1.0);
        assert!((a - e).abs() <= tol, "cell {i}: {a} != {e}");
    }
}

// ── Single-step shapes ───────────────────────────────────────────────

#[test]
fn line_one_step_spreads_to_neighbours() {
    let config = BenchConfig::new(Dimensionality::One, 5, 1);
    assert_eq!(final_grid(&config), vec![0.0, 100.0, 800.0, 100.0, 0.0]);
}

#[test]
fn line_two_steps_direct() {
    let config = BenchConfig::new(Dimensionality::One, 5, 2);
    assert_close(&final_grid(&config), &[0.0, 160.0, 660.0, 160.0, 0.0]);
}

#[test]
fn square_one_step_is_a_plus() {
    let config = BenchConfig::new(Dimensionality::Two, 5, 1);
    let grid = final_grid(&config);
    let at = |x: usize, y: usize| grid[x * 5 + y];
    assert!((at(2, 2) - 6000.0).abs() < 1e-2);
    for (x, y) in [(1, 2), (3, 2), (2, 1), (2, 3)] {
        assert!((at(x, y) - 1000.0).abs() < 1e-2);
    }
    for (x, y) in [(1, 1), (1, 3), (3, 1), (3, 3)] {
        assert_eq!(at(x, y), 0.0);
    }
}

#[test]
fn cube_one_step_touches_six_neighbours() {
    let config = BenchConfig::new(Dimensionality::Three, 5, 1);
    let grid = final_grid(&config);
    let at = |x: usize, y: usize, z: usize| grid[x * 25 + y * 5 + z];
    assert!((at(2, 2, 2) - 4000.0).abs() < 1e-2);
    for (x, y, z) in [(1, 2, 2), (3, 2, 2), (2, 1, 2), (2, 3, 2), (2, 2, 1), (2, 2, 3)] {
        assert!((at(x, y, z) - 1000.0).abs() < 1e-2);
    }
    let touched = grid.iter().filter(|&&c| c != 0.0).count();
    assert_eq!(touched, 7);
}

#[test]
fn direct_kernel_stays_symmetric() {
    let config = BenchConfig::new(Dimensionality::Two, 9, 6);
    let grid = final_grid(&config);
    for x in 0..9 {
        for y in 0..9 {
            let v = grid[x * 9 + y];
            assert_eq!(v, grid[y * 9 + x], "transpose at ({x},{y})");
            assert_eq!(v, grid[(8 - x) * 9 + y], "mirror at ({x},{y})");
        }
    }
}

// ── Buffer roles ─────────────────────────────────────────────────────

#[test]
fn read_buffer_alternates_between_steps() {
    let config = BenchConfig {
        debug_trace: true,
        offset_bytes: Some(16),
        ..BenchConfig::new(Dimensionality::One, 6, 4)
    };
    let mut hooks = RecordingHooks::new();
    run(&config, &mut hooks).unwrap();

    let addrs = hooks.debug_addrs();
    assert_eq!(addrs.len(), 4);
    assert_ne!(addrs[0], addrs[1]);
    assert_eq!(addrs[0], addrs[2]);
    assert_eq!(addrs[1], addrs[3]);
    // Buffer B carries the padding; its cells are not cache-line aligned.
    assert_eq!(addrs[0] % 64, 0);
    assert_eq!(addrs[1] % 64, 16);
    // The first dump is the seeded grid.
    assert_eq!(hooks.snapshots[0].cells, vec![0.0, 0.0, 0.0, 1000.0, 0.0, 0.0]);
}

#[test]
fn debug_trace_off_prints_nothing() {
    let mut hooks = RecordingHooks::new();
    run(&BenchConfig::new(Dimensionality::Two, 6, 3), &mut hooks).unwrap();
    assert!(hooks.snapshots.is_empty());
    assert_eq!(hooks.completions.len(), 1);
}

// ── Accumulative kernel ──────────────────────────────────────────────

#[test]
fn accumulative_matches_direct_on_first_step() {
    for dimensionality in Dimensionality::ALL {
        let direct = BenchConfig::new(dimensionality, 7, 1);
        let accumulative = BenchConfig {
            kernel: KernelVariant::Accumulative,
            ..direct.clone()
        };
        assert_close(&final_grid(&accumulative), &final_grid(&direct));
    }
}

#[test]
fn accumulative_second_step_keeps_stale_seed() {
    let accumulative = BenchConfig {
        kernel: KernelVariant::Accumulative,
        ..BenchConfig::new(Dimensionality::One, 5, 2)
    };
    // Direct result plus the seeded grid the write buffer still holds.
    assert_close(&final_grid(&accumulative), &[0.0, 160.0, 1660.0, 160.0, 0.0]);
}

// ── Layout transparency ──────────────────────────────────────────────

#[test]
fn offset_does_not_change_results() {
    for dimensionality in Dimensionality::ALL {
        for kernel in [KernelVariant::Direct, KernelVariant::Accumulative] {
            let base = BenchConfig {
                kernel,
                ..BenchConfig::new(dimensionality, 8, 5)
            };
            let expected: Vec<u32> = final_grid(&base).iter().map(|c| c.to_bits()).collect();
            for offset in [4, 32, 60, 64, 4096] {
                let shifted = BenchConfig {
                    offset_bytes: Some(offset),
                    ..base.clone()
                };
                let actual: Vec<u32> = final_grid(&shifted).iter().map(|c| c.to_bits()).collect();
                assert_eq!(actual, expected, "{dimensionality} {kernel} offset {offset}");
            }
        }
    }
}

#[test]
fn hints_do_not_change_results() {
    let base = BenchConfig::new(Dimensionality::Three, 7, 4);
    let expected = final_grid(&base);
    for inline_kernel in [false, true] {
        for aliasing_hint in [false, true] {
            let config = BenchConfig {
                inline_kernel,
                aliasing_hint,
                ..base.clone()
            };
            assert_eq!(final_grid(&config), expected);
        }
    }
}

// ── Boundary invariance ──────────────────────────────────────────────

fn arb_config() -> impl Strategy<Value = BenchConfig> {
    (
        prop::sample::select(Dimensionality::ALL.to_vec()),
        3usize..9,
        0u64..6,
        prop::bool::ANY,
        prop::bool::ANY,
        prop::bool::ANY,
        prop::option::of(1usize..32),
    )
        .prop_map(
            |(dimensionality, extent, iterations, accumulative, inline_kernel, aliasing_hint, pad)| {
                BenchConfig {
                    kernel: if accumulative {
                        KernelVariant::Accumulative
                    } else {
                        KernelVariant::Direct
                    },
                    inline_kernel,
                    aliasing_hint,
                    offset_bytes: pad.map(|cells| cells * 4),
                    ..BenchConfig::new(dimensionality, extent, iterations)
                }
            },
        )
}

proptest! {
    #[test]
    fn boundary_cells_stay_zero(config in arb_config()) {
        let grid = final_grid(&config);
        let ndim = config.dimensionality.ndim();
        for (i, &c) in grid.iter().enumerate() {
            if on_boundary(i, config.extent, ndim) {
                prop_assert_eq!(c, 0.0, "boundary cell {} of {:?}", i, config);
            }
        }
    }

    #[test]
    fn direct_values_stay_finite_and_non_negative(config in arb_config()) {
        let config = BenchConfig { kernel: KernelVariant::Direct, ..config };
        for c in final_grid(&config) {
            prop_assert!(c.is_finite());
            prop_assert!(c >= 0.0);
        }
    }
}
