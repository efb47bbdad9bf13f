//! Buffer allocation errors.

use std::error::Error;
use std::fmt;

/// One of the two simulation buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BufferId {
    /// The unpadded buffer. Holds the seed and is read first.
    A,
    /// The buffer that carries the offset padding, if any.
    B,
}

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Failure to obtain storage for a simulation buffer.
///
/// When both buffers fail, the error names buffer A.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocationError {
    /// The allocator returned no memory.
    OutOfMemory {
        /// The buffer that could not be allocated.
        buffer: BufferId,
        /// Bytes requested, padding included.
        requested_bytes: usize,
    },
    /// The requested size cannot be expressed as an allocation layout.
    LayoutOverflow {
        /// The buffer whose layout overflowed.
        buffer: BufferId,
        /// Logical cell count.
        cells: usize,
        /// Leading padding in bytes.
        padding_bytes: usize,
    },
    /// Padding that is not a whole number of cells would misalign the
    /// buffer's cells.
    MisalignedPadding {
        /// The rejected padding in bytes.
        padding_bytes: usize,
    },
}

impl AllocationError {
    /// The buffer this error refers to.
    pub fn buffer(&self) -> BufferId {
        match self {
            Self::OutOfMemory { buffer, .. } | Self::LayoutOverflow { buffer, .. } => *buffer,
            Self::MisalignedPadding { .. } => BufferId::B,
        }
    }
}

impl fmt::Display for AllocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory {
                buffer,
                requested_bytes,
            } => {
                write!(
                    f,
                    "failed to allocate buffer {buffer}: {requested_bytes} bytes requested"
                )
            }
            Self::LayoutOverflow {
                buffer,
                cells,
                padding_bytes,
            } => {
                write!(
                    f,
                    "buffer {buffer} layout overflows: {cells} cells plus {padding_bytes} padding bytes"
                )
            }
            Self::MisalignedPadding { padding_bytes } => {
                write!(f, "padding of {padding_bytes} bytes is not a whole number of cells")
            }
        }
    }
}

impl Error for AllocationError {}
