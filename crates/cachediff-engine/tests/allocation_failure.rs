//! Integration test: allocation failure is reported once, nothing leaks,
//! and no iteration runs.

use cachediff_arena::{AllocationError, BufferId};
use cachediff_core::{BenchConfig, Dimensionality};
use cachediff_engine::{run_with_allocator, RunError};
use cachediff_test_utils::{CountingAllocator, RecordingHooks};

fn config() -> BenchConfig {
    BenchConfig {
        offset_bytes: Some(32),
        debug_trace: true,
        ..BenchConfig::new(Dimensionality::Two, 16, 10)
    }
}

fn run_failing(attempts: &[usize]) -> (Result<(), RunError>, RecordingHooks, CountingAllocator) {
    let alloc = CountingAllocator::failing_on(attempts);
    let mut hooks = RecordingHooks::new();
    let result = run_with_allocator(&config(), alloc.clone(), &mut hooks).map(|_| ());
    (result, hooks, alloc)
}

fn failed_buffer(result: &Result<(), RunError>) -> BufferId {
    match result {
        Err(RunError::Allocation(e)) => e.buffer(),
        other => panic!("expected allocation error, got {other:?}"),
    }
}

#[test]
fn buffer_a_failure_releases_b() {
    let (result, hooks, alloc) = run_failing(&[0]);
    assert_eq!(failed_buffer(&result), BufferId::A);
    assert_eq!(alloc.attempts(), 2);
    assert_eq!(alloc.allocations(), 1);
    assert_eq!(alloc.live(), 0);

    assert_eq!(hooks.failures.len(), 1);
    assert!(hooks.completions.is_empty());
    assert!(hooks.snapshots.is_empty());
    assert!(hooks.final_state.is_none());
}

#[test]
fn buffer_b_failure_releases_a() {
    let (result, hooks, alloc) = run_failing(&[1]);
    assert_eq!(failed_buffer(&result), BufferId::B);
    assert_eq!(alloc.deallocations(), 1);
    assert_eq!(alloc.live(), 0);
    assert_eq!(hooks.failures.len(), 1);
    assert!(hooks.completions.is_empty());
}

#[test]
fn both_failing_reports_a_once() {
    let (result, hooks, alloc) = run_failing(&[0, 1]);
    assert_eq!(failed_buffer(&result), BufferId::A);
    assert_eq!(alloc.allocations(), 0);
    assert_eq!(alloc.live(), 0);
    assert_eq!(
        hooks.failures,
        vec![AllocationError::OutOfMemory {
            buffer: BufferId::A,
            requested_bytes: 16 * 16 * 4,
        }]
    );
}

#[test]
fn successful_run_releases_everything() {
    let alloc = CountingAllocator::new();
    let mut hooks = RecordingHooks::new();
    run_with_allocator(&config(), alloc.clone(), &mut hooks).unwrap();
    assert_eq!(alloc.allocations(), 2);
    assert_eq!(alloc.deallocations(), 2);
    assert_eq!(alloc.live(), 0);
    assert!(hooks.failures.is_empty());
    assert_eq!(hooks.completions.len(), 1);
    assert_eq!(hooks.snapshots.len(), 10);
}
