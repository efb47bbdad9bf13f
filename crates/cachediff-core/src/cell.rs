//! The scalar stored in every grid cell.

/// One cell of the simulated quantity (heat, concentration).
pub type Cell = f32;

/// Size of a [`Cell`] in bytes. Offset padding must be a multiple of this.
pub const CELL_BYTES: usize = std::mem::size_of::<Cell>();

/// Diffusion coefficient used when a config does not override it.
pub const DEFAULT_DIFFUSE_FACTOR: Cell = 0.1;
