//! Process exit status for a run outcome.

use cachediff_engine::RunError;

/// Exit status for a successful run.
pub const EXIT_SUCCESS: u8 = 0;
/// Exit status when a buffer could not be allocated.
pub const EXIT_ALLOCATION: u8 = 1;
/// Exit status when the configuration was rejected.
pub const EXIT_CONFIG: u8 = 2;

/// Map a run outcome to the runner's exit status.
///
/// A driver state error cannot come out of a full run; it is treated as
/// a runtime failure.
pub fn exit_code<T>(outcome: &Result<T, RunError>) -> u8 {
    match outcome {
        Ok(_) => EXIT_SUCCESS,
        Err(RunError::Config(_)) => EXIT_CONFIG,
        Err(RunError::Allocation(_) | RunError::InvalidState { .. }) => EXIT_ALLOCATION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cachediff_arena::{AllocationError, BufferId};
    use cachediff_core::ConfigError;

    #[test]
    fn maps_each_outcome() {
        assert_eq!(exit_code::<()>(&Ok(())), 0);
        assert_eq!(exit_code::<()>(&Err(ConfigError::ZeroOffset.into())), 2);
        let alloc = AllocationError::OutOfMemory {
            buffer: BufferId::A,
            requested_bytes: 4,
        };
        assert_eq!(exit_code::<()>(&Err(alloc.into())), 1);
    }
}
