//! Errors returned by a simulation run.

use std::error::Error;
use std::fmt;

use cachediff_arena::AllocationError;
use cachediff_core::ConfigError;

use crate::driver::DriverState;

/// Why a run did not complete.
#[derive(Clone, Debug, PartialEq)]
pub enum RunError {
    /// The config was rejected at startup. Nothing was allocated.
    Config(ConfigError),
    /// A simulation buffer could not be allocated. Anything that was
    /// allocated has been released.
    Allocation(AllocationError),
    /// A driver operation was called in a state that does not allow it.
    InvalidState {
        /// The state the driver was in.
        state: DriverState,
    },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
            Self::Allocation(e) => write!(f, "allocation failed: {e}"),
            Self::InvalidState { state } => {
                write!(f, "operation not allowed in state {state:?}")
            }
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Allocation(e) => Some(e),
            Self::InvalidState { .. } => None,
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<AllocationError> for RunError {
    fn from(e: AllocationError) -> Self {
        Self::Allocation(e)
    }
}
