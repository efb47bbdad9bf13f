//! Compile-time step policies.
//!
//! A [`Plan`] fixes three choices as types: the kernel, whether the step
//! is forced inline ([`Inlined`] / [`Outlined`]), and whether the kernel
//! gets the no-aliasing promise ([`RestrictPolicy`] / [`MayAliasPolicy`]).
//! The driver is generic over a [`StepPlan`], so the kernel loop contains
//! no branches on configuration.

#![allow(unsafe_code)]

use std::marker::PhantomData;

use cachediff_arena::{BufferPair, CellAllocator};
use cachediff_core::{Cell, KernelVariant, Lattice};
use cachediff_kernel::{step, step_raw, Kernel};

/// Inlining hint for the step call. Has no semantic effect.
pub trait InlineHint: 'static {
    /// Whether this policy forces inlining.
    const INLINE: bool;

    /// Run `f` under this hint.
    fn call<F: FnOnce()>(f: F);
}

/// Forces the step into the driver loop.
#[derive(Clone, Copy, Debug, Default)]
pub struct Inlined;

impl InlineHint for Inlined {
    const INLINE: bool = true;

    #[inline(always)]
    fn call<F: FnOnce()>(f: F) {
        f()
    }
}

/// Keeps the step behind a real call.
#[derive(Clone, Copy, Debug, Default)]
pub struct Outlined;

impl InlineHint for Outlined {
    const INLINE: bool = false;

    #[inline(never)]
    fn call<F: FnOnce()>(f: F) {
        f()
    }
}

/// How the read and write buffers are handed to the kernel.
pub trait AliasHint: 'static {
    /// Whether the kernel gets the no-aliasing promise.
    const RESTRICT: bool;

    /// Run kernel `K` once from the pair's read buffer into its write
    /// buffer.
    fn step<L: Lattice, K: Kernel, A: CellAllocator>(
        lattice: &L,
        factor: Cell,
        buffers: &mut BufferPair<A>,
    );
}

/// Borrowed slices: the compiler may assume read and write never overlap.
#[derive(Clone, Copy, Debug, Default)]
pub struct RestrictPolicy;

impl AliasHint for RestrictPolicy {
    const RESTRICT: bool = true;

    #[inline(always)]
    fn step<L: Lattice, K: Kernel, A: CellAllocator>(
        lattice: &L,
        factor: Cell,
        buffers: &mut BufferPair<A>,
    ) {
        let (read, write) = buffers.read_write();
        step::<L, K>(lattice, factor, read, write);
    }
}

/// Raw pointers: no overlap promise reaches the compiler.
#[derive(Clone, Copy, Debug, Default)]
pub struct MayAliasPolicy;

impl AliasHint for MayAliasPolicy {
    const RESTRICT: bool = false;

    #[inline(always)]
    fn step<L: Lattice, K: Kernel, A: CellAllocator>(
        lattice: &L,
        factor: Cell,
        buffers: &mut BufferPair<A>,
    ) {
        let cells = lattice.cell_count();
        assert!(
            buffers.cell_count() >= cells,
            "buffers hold {} cells, lattice needs {cells}",
            buffers.cell_count(),
        );
        let (read, write) = buffers.read_write_ptrs();
        // SAFETY: the pair's buffers are distinct allocations holding at
        // least `cells` cells each (checked above), and `buffers` stays
        // exclusively borrowed for the call.
        unsafe { step_raw::<L, K>(lattice, factor, read, write) }
    }
}

/// Everything that happens in one step, chosen at compile time.
pub trait StepPlan: 'static {
    /// The kernel's config tag.
    const VARIANT: KernelVariant;

    /// Whether the step is forced inline.
    const INLINE: bool;

    /// Whether the kernel gets the no-aliasing promise.
    const RESTRICT: bool;

    /// Run one step from the pair's read buffer into its write buffer.
    /// Does not swap.
    fn step<L: Lattice, A: CellAllocator>(lattice: &L, factor: Cell, buffers: &mut BufferPair<A>);
}

/// The [`StepPlan`] combining kernel `K`, inline hint `I` and aliasing
/// hint `R`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Plan<K, I, R>(PhantomData<(K, I, R)>);

impl<K: Kernel, I: InlineHint, R: AliasHint> StepPlan for Plan<K, I, R> {
    const VARIANT: KernelVariant = K::VARIANT;
    const INLINE: bool = I::INLINE;
    const RESTRICT: bool = R::RESTRICT;

    #[inline(always)]
    fn step<L: Lattice, A: CellAllocator>(lattice: &L, factor: Cell, buffers: &mut BufferPair<A>) {
        I::call(|| R::step::<L, K, A>(lattice, factor, buffers));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cachediff_core::{Line1D, Square2D};
    use cachediff_kernel::{Accumulative, Direct};

    fn one_step<P: StepPlan>() -> Vec<Cell> {
        let line = Line1D::new(5).unwrap();
        let mut pair = BufferPair::allocate(5, 8).unwrap();
        pair.initialize(2, 1000.0);
        P::step(&line, 0.1, &mut pair);
        pair.write().to_vec()
    }

    #[test]
    fn every_plan_produces_the_same_first_step() {
        let expected = vec![0.0, 100.0, 800.0, 100.0, 0.0];
        assert_eq!(one_step::<Plan<Direct, Inlined, RestrictPolicy>>(), expected);
        assert_eq!(one_step::<Plan<Direct, Outlined, MayAliasPolicy>>(), expected);
        assert_eq!(one_step::<Plan<Accumulative, Inlined, MayAliasPolicy>>(), expected);
        assert_eq!(one_step::<Plan<Accumulative, Outlined, RestrictPolicy>>(), expected);
    }

    #[test]
    #[should_panic(expected = "lattice needs 16")]
    fn may_alias_step_rejects_undersized_buffers() {
        let square = Square2D::new(4).unwrap();
        let mut pair = BufferPair::allocate(9, 0).unwrap();
        pair.initialize(4, 1000.0);
        Plan::<Direct, Inlined, MayAliasPolicy>::step(&square, 0.1, &mut pair);
    }

    #[test]
    #[should_panic(expected = "lattice needs 16")]
    fn restrict_step_rejects_undersized_buffers() {
        let square = Square2D::new(4).unwrap();
        let mut pair = BufferPair::allocate(9, 0).unwrap();
        Plan::<Accumulative, Outlined, RestrictPolicy>::step(&square, 0.1, &mut pair);
    }

    #[test]
    fn plan_constants_reflect_components() {
        type P = Plan<Accumulative, Outlined, RestrictPolicy>;
        assert_eq!(P::VARIANT, KernelVariant::Accumulative);
        assert!(!P::INLINE);
        assert!(P::RESTRICT);
    }
}
