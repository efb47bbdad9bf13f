//! Fixed benchmark profiles.
//!
//! Each dimensionality gets a contiguous and an offset layout at a
//! power-of-two extent, where same-index cells of the two buffers are
//! most likely to compete for a cache set. The accumulative pair repeats
//! the 2D layouts with the scatter-form kernel.

use cachediff_core::{BenchConfig, Dimensionality, KernelVariant};

/// Leading padding of buffer B in the offset profiles: one cache line
/// plus one cell.
pub const OFFSET_BYTES: usize = 68;

/// A named configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    /// Short name used in reports.
    pub name: &'static str,
    /// The configuration to run.
    pub config: BenchConfig,
}

impl Profile {
    fn new(name: &'static str, config: BenchConfig) -> Self {
        Self { name, config }
    }
}

fn layout(
    dimensionality: Dimensionality,
    extent: usize,
    iterations: u64,
    offset: bool,
) -> BenchConfig {
    BenchConfig {
        offset_bytes: offset.then_some(OFFSET_BYTES),
        ..BenchConfig::new(dimensionality, extent, iterations)
    }
}

/// 1D line of 65536 cells, 200 iterations.
pub fn line(offset: bool) -> BenchConfig {
    layout(Dimensionality::One, 1 << 16, 200, offset)
}

/// 2D square of 1024x1024 cells, 20 iterations.
pub fn square(offset: bool) -> BenchConfig {
    layout(Dimensionality::Two, 1 << 10, 20, offset)
}

/// 3D cube of 128^3 cells, 10 iterations.
pub fn cube(offset: bool) -> BenchConfig {
    layout(Dimensionality::Three, 1 << 7, 10, offset)
}

/// [`square`] with the accumulative kernel.
pub fn square_accumulative(offset: bool) -> BenchConfig {
    BenchConfig {
        kernel: KernelVariant::Accumulative,
        ..square(offset)
    }
}

/// A 7-cell line run for 3 iterations with debug tracing on.
pub fn trace_demo() -> BenchConfig {
    BenchConfig {
        debug_trace: true,
        ..BenchConfig::new(Dimensionality::One, 7, 3)
    }
}

/// Every profile the runner executes, in order.
pub fn all() -> Vec<Profile> {
    vec![
        Profile::new("trace-demo", trace_demo()),
        Profile::new("1d-contiguous", line(false)),
        Profile::new("1d-offset", line(true)),
        Profile::new("2d-contiguous", square(false)),
        Profile::new("2d-offset", square(true)),
        Profile::new("3d-contiguous", cube(false)),
        Profile::new("3d-offset", cube(true)),
        Profile::new("2d-accumulative-contiguous", square_accumulative(false)),
        Profile::new("2d-accumulative-offset", square_accumulative(true)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_profile_validates() {
        for profile in all() {
            assert_eq!(profile.config.validate(), Ok(()), "{}", profile.name);
        }
    }

    #[test]
    fn names_are_unique() {
        let profiles = all();
        for (i, a) in profiles.iter().enumerate() {
            for b in &profiles[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn offset_pairs_differ_only_in_padding() {
        for pair in [(line(false), line(true)), (cube(false), cube(true))] {
            let (contiguous, offset) = pair;
            assert_eq!(contiguous.padding_bytes(), 0);
            assert_eq!(offset.padding_bytes(), OFFSET_BYTES);
            assert_eq!(
                BenchConfig {
                    offset_bytes: None,
                    ..offset
                },
                contiguous
            );
        }
    }
}
